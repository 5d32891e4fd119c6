use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ContactSubject, Validate, ValidationResult};

/// Registered user of the site, either a legal service or a client.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Identity issued by the authentication layer in front of the service.
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub user_type: UserType,
    pub company: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
    #[sea_orm(unique)]
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
    #[sea_orm(has_one = "super::lawyer::Entity")]
    Lawyer,
    #[sea_orm(has_one = "super::client::Entity")]
    Client,
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::lawyer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lawyer.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    #[sea_orm(num_value = 1)]
    Lawyer,
    #[default]
    #[sea_orm(num_value = 2)]
    Client,
}

impl UserType {
    pub fn label(self) -> &'static str {
        match self {
            UserType::Lawyer => "As a legal service",
            UserType::Client => "As a client",
        }
    }
}

impl Validate for Model {
    fn clean_fields(&self) -> ValidationResult {
        validation::optional_text("company", &self.company, 64)?;
        validation::optional_email("email", &self.email)?;
        validation::optional_text("phone", &self.phone, 64)?;
        validation::optional_text("website", &self.website, 128)
    }

    fn validate_as_of(&self, _today: Date) -> ValidationResult {
        validation::require_contact_info(
            ContactSubject::Account,
            &self.email,
            &self.phone,
            &self.website,
            self.address_id,
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
