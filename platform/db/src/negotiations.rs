use entity::{CostType, Validate, negotiation};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{DbError, DbPool, DbResult, accounts, write};

#[derive(Clone, Debug)]
pub struct NewNegotiation {
    pub title: String,
    pub cost_type: CostType,
    pub amount_cents: i64,
    pub initial_amount_cents: i64,
    pub budget_cents: i64,
    pub is_accepted: bool,
    pub is_changeable: bool,
    pub lawyer_id: Uuid,
    pub client_id: Uuid,
}

impl NewNegotiation {
    pub fn new(title: impl Into<String>, lawyer_id: Uuid, client_id: Uuid) -> Self {
        Self {
            title: title.into(),
            cost_type: CostType::default(),
            amount_cents: 0,
            initial_amount_cents: 0,
            budget_cents: 10_000,
            is_accepted: false,
            is_changeable: false,
            lawyer_id,
            client_id,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct NegotiationChanges {
    pub title: Option<String>,
    pub cost_type: Option<CostType>,
    pub amount_cents: Option<i64>,
    pub initial_amount_cents: Option<i64>,
    pub budget_cents: Option<i64>,
    pub is_accepted: Option<bool>,
    pub is_changeable: Option<bool>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NegotiationFilter {
    pub lawyer_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
}

#[instrument(name = "db.negotiations.create", skip_all)]
pub async fn create(db: &DbPool, input: NewNegotiation) -> DbResult<negotiation::Model> {
    let candidate = negotiation::Model {
        id: Uuid::new_v4(),
        title: input.title,
        cost_type: input.cost_type,
        amount_cents: input.amount_cents,
        initial_amount_cents: input.initial_amount_cents,
        budget_cents: input.budget_cents,
        is_accepted: input.is_accepted,
        is_changeable: input.is_changeable,
        lawyer_id: input.lawyer_id,
        client_id: input.client_id,
    };
    candidate.full_clean()?;
    accounts::ensure_lawyer(db, candidate.lawyer_id).await?;
    accounts::ensure_client(db, candidate.client_id).await?;
    let saved = write::all_set(candidate.into_active_model())
        .insert(db)
        .await?;
    info!(negotiation_id = %saved.id, title = %saved, "negotiation created");
    Ok(saved)
}

pub async fn find(db: &DbPool, id: Uuid) -> DbResult<negotiation::Model> {
    negotiation::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbError::NotFound { entity: "negotiation" })
}

pub async fn list(db: &DbPool, filter: NegotiationFilter) -> DbResult<Vec<negotiation::Model>> {
    let mut query = negotiation::Entity::find()
        .order_by_asc(negotiation::Column::Title)
        .order_by_asc(negotiation::Column::Id);
    if let Some(lawyer_id) = filter.lawyer_id {
        query = query.filter(negotiation::Column::LawyerId.eq(lawyer_id));
    }
    if let Some(client_id) = filter.client_id {
        query = query.filter(negotiation::Column::ClientId.eq(client_id));
    }
    Ok(query.all(db).await?)
}

#[instrument(name = "db.negotiations.update", skip(db, changes))]
pub async fn update(
    db: &DbPool,
    id: Uuid,
    changes: NegotiationChanges,
) -> DbResult<negotiation::Model> {
    let mut candidate = find(db, id).await?;
    write::patch(&mut candidate.title, changes.title);
    write::patch(&mut candidate.cost_type, changes.cost_type);
    write::patch(&mut candidate.amount_cents, changes.amount_cents);
    write::patch(&mut candidate.initial_amount_cents, changes.initial_amount_cents);
    write::patch(&mut candidate.budget_cents, changes.budget_cents);
    write::patch(&mut candidate.is_accepted, changes.is_accepted);
    write::patch(&mut candidate.is_changeable, changes.is_changeable);
    candidate.full_clean()?;
    Ok(write::all_set(candidate.into_active_model()).update(db).await?)
}

pub async fn delete(db: &DbPool, id: Uuid) -> DbResult<()> {
    let result = negotiation::Entity::delete_by_id(id).exec(db).await?;
    write::deleted(result.rows_affected, "negotiation")?;
    info!(negotiation_id = %id, "negotiation deleted");
    Ok(())
}
