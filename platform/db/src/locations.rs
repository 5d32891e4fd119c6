use entity::location;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use tracing::info;
use uuid::Uuid;

use crate::{DbError, DbPool, DbResult, write};

pub async fn create(db: &DbPool) -> DbResult<location::Model> {
    let saved = location::ActiveModel {
        id: Set(Uuid::new_v4()),
    }
    .insert(db)
    .await?;
    info!(location_id = %saved.id, "location created");
    Ok(saved)
}

pub async fn find(db: &DbPool, id: Uuid) -> DbResult<location::Model> {
    location::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbError::NotFound { entity: "location" })
}

/// Accounts and contacts pointing at the location keep existing with no address.
pub async fn delete(db: &DbPool, id: Uuid) -> DbResult<()> {
    let result = location::Entity::delete_by_id(id).exec(db).await?;
    write::deleted(result.rows_affected, "location")?;
    info!(location_id = %id, "location deleted");
    Ok(())
}

pub(crate) async fn ensure_address<C: ConnectionTrait>(db: &C, id: Option<Uuid>) -> DbResult<()> {
    match id {
        Some(id) => write::ensure_exists::<location::Entity, _>(db, id, "location").await,
        None => Ok(()),
    }
}
