use std::fmt;

use sea_orm::entity::prelude::*;

use crate::CostType;
use crate::validation::{self, Validate, ValidationError, ValidationResult};

/// Fee proposal exchanged between a lawyer and a client before engagement.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "negotiation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub title: String,
    pub cost_type: CostType,
    /// Base cost for hiring the lawyer.
    pub amount_cents: i64,
    /// Share of the base cost due before work begins.
    pub initial_amount_cents: i64,
    /// Spending limit on the base cost.
    pub budget_cents: i64,
    pub is_accepted: bool,
    pub is_changeable: bool,
    #[sea_orm(indexed)]
    pub lawyer_id: Uuid,
    #[sea_orm(indexed)]
    pub client_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lawyer::Entity",
        from = "Column::LawyerId",
        to = "super::lawyer::Column::AccountId",
        on_delete = "Cascade"
    )]
    Lawyer,
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::AccountId",
        on_delete = "Cascade"
    )]
    Client,
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

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl Validate for Model {
    fn clean_fields(&self) -> ValidationResult {
        validation::required_text("title", &self.title, 64)?;
        validation::fixed_range("amount", self.amount_cents)?;
        validation::fixed_range("initial_amount", self.initial_amount_cents)?;
        validation::fixed_range("budget", self.budget_cents)
    }

    fn validate_as_of(&self, _today: Date) -> ValidationResult {
        if self.initial_amount_cents > self.amount_cents {
            return Err(ValidationError::InitialExceedsBase);
        }
        Ok(())
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(amount_cents: i64, initial_amount_cents: i64) -> Model {
        Model {
            id: Uuid::new_v4(),
            title: "Retainer".into(),
            cost_type: CostType::Rate,
            amount_cents,
            initial_amount_cents,
            budget_cents: 10_000,
            is_accepted: false,
            is_changeable: false,
            lawyer_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn initial_equal_to_base_is_accepted() {
        assert_eq!(offer(10_000, 10_000).validate(), Ok(()));
    }

    #[test]
    fn initial_above_base_is_rejected() {
        assert_eq!(
            offer(5_000, 5_001).validate(),
            Err(ValidationError::InitialExceedsBase)
        );
    }

    #[test]
    fn initial_below_base_is_accepted() {
        assert_eq!(offer(5_000, 0).full_clean(), Ok(()));
    }

    #[test]
    fn budget_is_range_checked() {
        let mut negotiation = offer(100, 0);
        negotiation.budget_cents = 1_000_000;
        assert_eq!(
            negotiation.full_clean(),
            Err(ValidationError::OutOfRange { field: "budget" })
        );
    }
}
