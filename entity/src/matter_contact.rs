use sea_orm::entity::prelude::*;

/// Link between an external contact and a matter it serves.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "matter_contact")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub contact_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub matter_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contact::Entity",
        from = "Column::ContactId",
        to = "super::contact::Column::Id",
        on_delete = "Cascade"
    )]
    Contact,
    #[sea_orm(
        belongs_to = "super::matter::Entity",
        from = "Column::MatterId",
        to = "super::matter::Column::Id",
        on_delete = "Cascade"
    )]
    Matter,
}

impl Related<super::contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

impl Related<super::matter::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matter.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
