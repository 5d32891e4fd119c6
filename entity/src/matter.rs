use std::fmt;

use sea_orm::entity::prelude::*;

use crate::CostType;
use crate::validation::{self, Validate, ValidationError, ValidationResult};

/// Unit of legal work a lawyer carries out for a client.
///
/// Money and hours are stored in hundredths, see [`crate::fixed`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "matter")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub title: String,
    pub description: String,
    pub cost_type: CostType,
    pub amount_cents: i64,
    pub estimated_hours_hundredths: i64,
    pub logged_hours_hundredths: i64,
    pub start_date: Date,
    pub due_date: Option<Date>,
    pub has_client_permission: bool,
    pub has_external_services: bool,
    pub has_client_pre_tasks: bool,
    pub has_related_articles: bool,
    pub is_changeable: bool,
    pub is_active: bool,
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
    #[sea_orm(has_many = "super::pretask::Entity")]
    Pretask,
    #[sea_orm(has_many = "super::matter_contact::Entity")]
    MatterContact,
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

impl Related<super::pretask::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pretask.def()
    }
}

impl Related<super::matter_contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatterContact.def()
    }
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        super::matter_contact::Relation::Contact.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::matter_contact::Relation::Matter.def().rev())
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
        validation::required_text("description", &self.description, 512)?;
        validation::fixed_range("amount", self.amount_cents)?;
        validation::fixed_range("estimated_hours", self.estimated_hours_hundredths)?;
        validation::fixed_range("logged_hours", self.logged_hours_hundredths)
    }

    /// Without the client's go-ahead nothing may start: no pre-tasks, no
    /// external services, no logged hours and no start date in the past.
    /// Only the first violation is reported.
    fn validate_as_of(&self, today: Date) -> ValidationResult {
        if self.has_client_permission {
            return Ok(());
        }
        if self.has_client_pre_tasks {
            Err(ValidationError::PretaskNotPermitted)
        } else if self.has_external_services {
            Err(ValidationError::ExternalServiceNotPermitted)
        } else if self.logged_hours_hundredths > 0 || self.start_date < today {
            Err(ValidationError::UnauthorizedWorkLogged)
        } else {
            Ok(())
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> Date {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    fn pending() -> Model {
        Model {
            id: Uuid::new_v4(),
            title: "Lease review".into(),
            description: "Review the commercial lease before signing.".into(),
            cost_type: CostType::Price,
            amount_cents: 45_000,
            estimated_hours_hundredths: 500,
            logged_hours_hundredths: 0,
            start_date: today(),
            due_date: None,
            has_client_permission: false,
            has_external_services: false,
            has_client_pre_tasks: false,
            has_related_articles: false,
            is_changeable: false,
            is_active: true,
            lawyer_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn untouched_matter_without_permission_passes() {
        assert_eq!(pending().validate_as_of(today()), Ok(()));
        assert_eq!(pending().full_clean_as_of(today()), Ok(()));
    }

    #[test]
    fn pretasks_win_over_every_other_violation() {
        let mut matter = pending();
        matter.has_client_pre_tasks = true;
        matter.has_external_services = true;
        matter.logged_hours_hundredths = 250;
        matter.start_date = today().pred_opt().unwrap();
        assert_eq!(
            matter.validate_as_of(today()),
            Err(ValidationError::PretaskNotPermitted)
        );
    }

    #[test]
    fn external_services_win_over_logged_work() {
        let mut matter = pending();
        matter.has_external_services = true;
        matter.logged_hours_hundredths = 100;
        assert_eq!(
            matter.validate_as_of(today()),
            Err(ValidationError::ExternalServiceNotPermitted)
        );
    }

    #[test]
    fn logged_hours_need_permission() {
        let mut matter = pending();
        matter.logged_hours_hundredths = 1;
        assert_eq!(
            matter.validate_as_of(today()),
            Err(ValidationError::UnauthorizedWorkLogged)
        );
    }

    #[test]
    fn past_start_date_needs_permission() {
        let mut matter = pending();
        matter.start_date = today().pred_opt().unwrap();
        assert_eq!(
            matter.validate_as_of(today()),
            Err(ValidationError::UnauthorizedWorkLogged)
        );

        matter.start_date = today().succ_opt().unwrap();
        assert_eq!(matter.validate_as_of(today()), Ok(()));
    }

    #[test]
    fn permission_lifts_every_restriction() {
        let mut matter = pending();
        matter.has_client_permission = true;
        matter.has_client_pre_tasks = true;
        matter.has_external_services = true;
        matter.logged_hours_hundredths = 1_200;
        matter.start_date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(matter.validate_as_of(today()), Ok(()));
    }

    #[test]
    fn field_rules_bound_hours_and_amount() {
        let mut matter = pending();
        matter.estimated_hours_hundredths = 1_000_000;
        assert_eq!(
            matter.clean_fields(),
            Err(ValidationError::OutOfRange {
                field: "estimated_hours"
            })
        );

        let mut matter = pending();
        matter.amount_cents = -1;
        assert_eq!(
            matter.full_clean_as_of(today()),
            Err(ValidationError::OutOfRange { field: "amount" })
        );

        let mut matter = pending();
        matter.title = "t".repeat(65);
        assert_eq!(
            matter.clean_fields(),
            Err(ValidationError::TooLong {
                field: "title",
                max: 64
            })
        );
    }

    #[test]
    fn displays_title() {
        assert_eq!(pending().to_string(), "Lease review");
    }
}
