//! Persistent records of the legal-services domain.
//!
//! Every entity is a plain sea-orm model. Business invariants are not hooked
//! into `ActiveModelBehavior`; callers run [`Validate::full_clean`] on the
//! candidate model before writing it.

pub mod account;
pub mod client;
pub mod contact;
pub mod fixed;
pub mod lawyer;
pub mod location;
pub mod matter;
pub mod matter_contact;
pub mod negotiation;
pub mod prelude;
pub mod pretask;
pub mod validation;

pub use validation::{ContactSubject, Validate, ValidationError};

/// Cost model shared by matters and negotiations.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    sea_orm::EnumIter,
    sea_orm::DeriveActiveEnum,
    Eq,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(1))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CostType {
    #[default]
    #[sea_orm(string_value = "P")]
    Price,
    #[sea_orm(string_value = "R")]
    Rate,
}

impl CostType {
    pub fn label(self) -> &'static str {
        match self {
            CostType::Price => "Price",
            CostType::Rate => "Rate",
        }
    }
}
