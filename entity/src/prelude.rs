pub use super::account::Entity as Account;
pub use super::client::Entity as Client;
pub use super::contact::Entity as Contact;
pub use super::lawyer::Entity as Lawyer;
pub use super::location::Entity as Location;
pub use super::matter::Entity as Matter;
pub use super::matter_contact::Entity as MatterContact;
pub use super::negotiation::Entity as Negotiation;
pub use super::pretask::Entity as Pretask;
