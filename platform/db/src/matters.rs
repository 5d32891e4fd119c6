//! Matters: the unit of legal work between one lawyer and one client.

use chrono::NaiveDate;
use entity::{CostType, Validate, matter};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{DbError, DbPool, DbResult, accounts, write};

#[derive(Clone, Debug)]
pub struct NewMatter {
    pub title: String,
    pub description: String,
    pub cost_type: CostType,
    pub amount_cents: i64,
    pub estimated_hours_hundredths: i64,
    pub logged_hours_hundredths: i64,
    /// Defaults to the current day when omitted.
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub has_client_permission: bool,
    pub has_external_services: bool,
    pub has_client_pre_tasks: bool,
    pub has_related_articles: bool,
    pub is_changeable: bool,
    pub is_active: bool,
    pub lawyer_id: Uuid,
    pub client_id: Uuid,
}

impl NewMatter {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        lawyer_id: Uuid,
        client_id: Uuid,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            cost_type: CostType::default(),
            amount_cents: 0,
            estimated_hours_hundredths: 500,
            logged_hours_hundredths: 0,
            start_date: None,
            due_date: None,
            has_client_permission: false,
            has_external_services: false,
            has_client_pre_tasks: false,
            has_related_articles: false,
            is_changeable: false,
            is_active: true,
            lawyer_id,
            client_id,
        }
    }
}

/// Editable matter fields; the owning lawyer and client are fixed.
#[derive(Clone, Debug, Default)]
pub struct MatterChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cost_type: Option<CostType>,
    pub amount_cents: Option<i64>,
    pub estimated_hours_hundredths: Option<i64>,
    pub logged_hours_hundredths: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<Option<NaiveDate>>,
    pub has_client_permission: Option<bool>,
    pub has_external_services: Option<bool>,
    pub has_client_pre_tasks: Option<bool>,
    pub has_related_articles: Option<bool>,
    pub is_changeable: Option<bool>,
    pub is_active: Option<bool>,
}

impl MatterChanges {
    fn apply(self, matter: &mut matter::Model) {
        write::patch(&mut matter.title, self.title);
        write::patch(&mut matter.description, self.description);
        write::patch(&mut matter.cost_type, self.cost_type);
        write::patch(&mut matter.amount_cents, self.amount_cents);
        write::patch(
            &mut matter.estimated_hours_hundredths,
            self.estimated_hours_hundredths,
        );
        write::patch(&mut matter.logged_hours_hundredths, self.logged_hours_hundredths);
        write::patch(&mut matter.start_date, self.start_date);
        write::patch(&mut matter.due_date, self.due_date);
        write::patch(&mut matter.has_client_permission, self.has_client_permission);
        write::patch(&mut matter.has_external_services, self.has_external_services);
        write::patch(&mut matter.has_client_pre_tasks, self.has_client_pre_tasks);
        write::patch(&mut matter.has_related_articles, self.has_related_articles);
        write::patch(&mut matter.is_changeable, self.is_changeable);
        write::patch(&mut matter.is_active, self.is_active);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MatterFilter {
    pub lawyer_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

#[instrument(name = "db.matters.create", skip_all)]
pub async fn create(db: &DbPool, input: NewMatter) -> DbResult<matter::Model> {
    let today = entity::validation::today();
    let candidate = matter::Model {
        id: Uuid::new_v4(),
        title: input.title,
        description: input.description,
        cost_type: input.cost_type,
        amount_cents: input.amount_cents,
        estimated_hours_hundredths: input.estimated_hours_hundredths,
        logged_hours_hundredths: input.logged_hours_hundredths,
        start_date: input.start_date.unwrap_or(today),
        due_date: input.due_date,
        has_client_permission: input.has_client_permission,
        has_external_services: input.has_external_services,
        has_client_pre_tasks: input.has_client_pre_tasks,
        has_related_articles: input.has_related_articles,
        is_changeable: input.is_changeable,
        is_active: input.is_active,
        lawyer_id: input.lawyer_id,
        client_id: input.client_id,
    };
    candidate.full_clean_as_of(today)?;
    accounts::ensure_lawyer(db, candidate.lawyer_id).await?;
    accounts::ensure_client(db, candidate.client_id).await?;

    let saved = write::all_set(candidate.into_active_model())
        .insert(db)
        .await?;
    info!(matter_id = %saved.id, title = %saved, "matter created");
    Ok(saved)
}

pub async fn find(db: &DbPool, id: Uuid) -> DbResult<matter::Model> {
    matter::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbError::NotFound { entity: "matter" })
}

/// Matters in alphabetical order of their title.
pub async fn list(db: &DbPool, filter: MatterFilter) -> DbResult<Vec<matter::Model>> {
    let mut query = matter::Entity::find()
        .order_by_asc(matter::Column::Title)
        .order_by_asc(matter::Column::Id);
    if let Some(lawyer_id) = filter.lawyer_id {
        query = query.filter(matter::Column::LawyerId.eq(lawyer_id));
    }
    if let Some(client_id) = filter.client_id {
        query = query.filter(matter::Column::ClientId.eq(client_id));
    }
    if let Some(is_active) = filter.is_active {
        query = query.filter(matter::Column::IsActive.eq(is_active));
    }
    Ok(query.all(db).await?)
}

#[instrument(name = "db.matters.update", skip(db, changes))]
pub async fn update(db: &DbPool, id: Uuid, changes: MatterChanges) -> DbResult<matter::Model> {
    let mut candidate = find(db, id).await?;
    changes.apply(&mut candidate);
    candidate.full_clean()?;
    Ok(write::all_set(candidate.into_active_model()).update(db).await?)
}

/// Pre-tasks and contact links go with the matter; the contacts stay.
pub async fn delete(db: &DbPool, id: Uuid) -> DbResult<()> {
    let result = matter::Entity::delete_by_id(id).exec(db).await?;
    write::deleted(result.rows_affected, "matter")?;
    info!(matter_id = %id, "matter deleted");
    Ok(())
}

pub(crate) async fn ensure(db: &DbPool, id: Uuid) -> DbResult<()> {
    write::ensure_exists::<matter::Entity, _>(db, id, "matter").await
}
