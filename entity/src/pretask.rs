use std::fmt;

use sea_orm::entity::prelude::*;

use crate::validation::{self, Validate, ValidationResult};

/// Something the client has to do before work on a matter begins.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "pretask")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub is_complete: bool,
    pub is_active: bool,
    #[sea_orm(indexed)]
    pub matter_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matter::Entity",
        from = "Column::MatterId",
        to = "super::matter::Column::Id",
        on_delete = "Cascade"
    )]
    Matter,
}

impl Related<super::matter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matter.def()
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl Validate for Model {
    fn clean_fields(&self) -> ValidationResult {
        validation::required_text("title", &self.title, 32)?;
        validation::required_text("description", &self.description, 256)
    }

    fn validate_as_of(&self, _today: Date) -> ValidationResult {
        Ok(())
    }
}

impl ActiveModelBehavior for ActiveModel {}
