use std::fmt;

use sea_orm::entity::prelude::*;

use crate::validation::{self, ContactSubject, Validate, ValidationResult};

/// External service or third party involved in one or more matters.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "contact")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    #[sea_orm(indexed)]
    pub address_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::AddressId",
        to = "super::location::Column::Id",
        on_delete = "SetNull"
    )]
    Address,
    #[sea_orm(has_many = "super::matter_contact::Entity")]
    MatterContact,
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::matter_contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatterContact.def()
    }
}

impl Related<super::matter::Entity> for Entity {
    fn to() -> RelationDef {
        super::matter_contact::Relation::Matter.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::matter_contact::Relation::Contact.def().rev())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.company.as_deref().filter(|company| !company.is_empty()) {
            Some(company) => write!(f, "{} {} from {}", self.first_name, self.last_name, company),
            None => write!(f, "{} {}", self.first_name, self.last_name),
        }
    }
}

impl Validate for Model {
    fn clean_fields(&self) -> ValidationResult {
        validation::required_text("first_name", &self.first_name, 32)?;
        validation::required_text("last_name", &self.last_name, 32)?;
        validation::optional_text("company", &self.company, 64)?;
        validation::optional_email("email", &self.email)?;
        validation::optional_text("phone", &self.phone, 64)?;
        validation::optional_text("website", &self.website, 128)
    }

    fn validate_as_of(&self, _today: Date) -> ValidationResult {
        validation::require_contact_info(
            ContactSubject::ExternalService,
            &self.email,
            &self.phone,
            &self.website,
            self.address_id,
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn notary() -> Model {
        Model {
            id: Uuid::new_v4(),
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            company: Some("Harbour Notaries".into()),
            email: Some("grace@harbour.example".into()),
            phone: Some("555-0100".into()),
            website: Some("harbour.example".into()),
            address_id: Some(Uuid::new_v4()),
        }
    }

    #[test]
    fn complete_contact_passes() {
        assert_eq!(notary().full_clean(), Ok(()));
    }

    #[test]
    fn each_missing_channel_is_rejected() {
        let expected = Err(ValidationError::IncompleteContactInfo {
            subject: ContactSubject::ExternalService,
        });
        let mutations: [fn(&mut Model); 4] = [
            |c| c.email = None,
            |c| c.phone = None,
            |c| c.website = Some(String::new()),
            |c| c.address_id = None,
        ];
        for mutate in mutations {
            let mut contact = notary();
            mutate(&mut contact);
            assert_eq!(contact.validate(), expected);
        }
    }

    #[test]
    fn names_are_required() {
        let mut contact = notary();
        contact.last_name = " ".into();
        assert_eq!(
            contact.full_clean(),
            Err(ValidationError::Blank { field: "last_name" })
        );
    }

    #[test]
    fn display_mentions_company_when_known() {
        assert_eq!(notary().to_string(), "Grace Hopper from Harbour Notaries");
        let mut contact = notary();
        contact.company = None;
        assert_eq!(contact.to_string(), "Grace Hopper");
    }
}
