use entity::{Validate, pretask};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder};
use tracing::info;
use uuid::Uuid;

use crate::{DbError, DbPool, DbResult, matters, write};

#[derive(Clone, Debug)]
pub struct NewPretask {
    pub title: String,
    pub description: String,
    pub is_complete: bool,
    pub is_active: bool,
}

impl NewPretask {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            is_complete: false,
            is_active: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PretaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_complete: Option<bool>,
    pub is_active: Option<bool>,
}

pub async fn create(db: &DbPool, matter_id: Uuid, input: NewPretask) -> DbResult<pretask::Model> {
    let candidate = pretask::Model {
        id: Uuid::new_v4(),
        title: input.title,
        description: input.description,
        is_complete: input.is_complete,
        is_active: input.is_active,
        matter_id,
    };
    candidate.full_clean()?;
    matters::ensure(db, matter_id).await?;
    let saved = write::all_set(candidate.into_active_model())
        .insert(db)
        .await?;
    info!(pretask_id = %saved.id, matter_id = %matter_id, "pretask created");
    Ok(saved)
}

pub async fn find(db: &DbPool, id: Uuid) -> DbResult<pretask::Model> {
    pretask::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbError::NotFound { entity: "pretask" })
}

pub async fn list_for_matter(db: &DbPool, matter_id: Uuid) -> DbResult<Vec<pretask::Model>> {
    matters::find(db, matter_id).await?;
    Ok(pretask::Entity::find()
        .filter(pretask::Column::MatterId.eq(matter_id))
        .order_by_asc(pretask::Column::Title)
        .all(db)
        .await?)
}

pub async fn update(db: &DbPool, id: Uuid, changes: PretaskChanges) -> DbResult<pretask::Model> {
    let mut candidate = find(db, id).await?;
    write::patch(&mut candidate.title, changes.title);
    write::patch(&mut candidate.description, changes.description);
    write::patch(&mut candidate.is_complete, changes.is_complete);
    write::patch(&mut candidate.is_active, changes.is_active);
    candidate.full_clean()?;
    Ok(write::all_set(candidate.into_active_model()).update(db).await?)
}

pub async fn delete(db: &DbPool, id: Uuid) -> DbResult<()> {
    let result = pretask::Entity::delete_by_id(id).exec(db).await?;
    write::deleted(result.rows_affected, "pretask")?;
    info!(pretask_id = %id, "pretask deleted");
    Ok(())
}
