//! External contacts and their many-to-many links to matters.

use entity::{Validate, contact, matter_contact};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{DbError, DbPool, DbResult, locations, matters, write};

#[derive(Clone, Debug, Default)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address_id: Option<Uuid>,
    /// Matters the contact is linked to right away.
    pub matter_ids: Vec<Uuid>,
}

#[derive(Clone, Debug, Default)]
pub struct ContactChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub address_id: Option<Option<Uuid>>,
}

#[instrument(name = "db.contacts.create", skip_all)]
pub async fn create(db: &DbPool, input: NewContact) -> DbResult<contact::Model> {
    let candidate = contact::Model {
        id: Uuid::new_v4(),
        first_name: input.first_name,
        last_name: input.last_name,
        company: input.company,
        email: input.email,
        phone: input.phone,
        website: input.website,
        address_id: input.address_id,
    };
    candidate.full_clean()?;
    locations::ensure_address(db, candidate.address_id).await?;
    for matter_id in &input.matter_ids {
        matters::ensure(db, *matter_id).await?;
    }

    let txn = db.begin().await?;
    let saved = write::all_set(candidate.into_active_model())
        .insert(&txn)
        .await?;
    for matter_id in dedup(input.matter_ids) {
        matter_contact::ActiveModel {
            contact_id: Set(saved.id),
            matter_id: Set(matter_id),
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;

    info!(contact_id = %saved.id, contact = %saved, "contact created");
    Ok(saved)
}

pub async fn find(db: &DbPool, id: Uuid) -> DbResult<contact::Model> {
    contact::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbError::NotFound { entity: "contact" })
}

pub async fn list_for_matter(db: &DbPool, matter_id: Uuid) -> DbResult<Vec<contact::Model>> {
    let matter = matters::find(db, matter_id).await?;
    Ok(matter
        .find_related(contact::Entity)
        .order_by_asc(contact::Column::LastName)
        .order_by_asc(contact::Column::FirstName)
        .all(db)
        .await?)
}

/// Ids of the matters a contact is linked to.
pub async fn matter_ids(db: &DbPool, contact_id: Uuid) -> DbResult<Vec<Uuid>> {
    let links = matter_contact::Entity::find()
        .filter(matter_contact::Column::ContactId.eq(contact_id))
        .all(db)
        .await?;
    Ok(links.into_iter().map(|link| link.matter_id).collect())
}

pub async fn update(db: &DbPool, id: Uuid, changes: ContactChanges) -> DbResult<contact::Model> {
    let mut candidate = find(db, id).await?;
    write::patch(&mut candidate.first_name, changes.first_name);
    write::patch(&mut candidate.last_name, changes.last_name);
    write::patch(&mut candidate.company, changes.company);
    write::patch(&mut candidate.email, changes.email);
    write::patch(&mut candidate.phone, changes.phone);
    write::patch(&mut candidate.website, changes.website);
    write::patch(&mut candidate.address_id, changes.address_id);
    candidate.full_clean()?;
    locations::ensure_address(db, candidate.address_id).await?;
    Ok(write::all_set(candidate.into_active_model()).update(db).await?)
}

pub async fn delete(db: &DbPool, id: Uuid) -> DbResult<()> {
    let result = contact::Entity::delete_by_id(id).exec(db).await?;
    write::deleted(result.rows_affected, "contact")?;
    info!(contact_id = %id, "contact deleted");
    Ok(())
}

/// Links a contact to a matter; linking twice is a no-op.
pub async fn link(db: &DbPool, contact_id: Uuid, matter_id: Uuid) -> DbResult<()> {
    find(db, contact_id).await?;
    matters::find(db, matter_id).await?;
    if find_link(db, contact_id, matter_id).await?.is_some() {
        return Ok(());
    }
    matter_contact::ActiveModel {
        contact_id: Set(contact_id),
        matter_id: Set(matter_id),
    }
    .insert(db)
    .await?;
    info!(contact_id = %contact_id, matter_id = %matter_id, "contact linked");
    Ok(())
}

pub async fn unlink(db: &DbPool, contact_id: Uuid, matter_id: Uuid) -> DbResult<()> {
    let link = find_link(db, contact_id, matter_id)
        .await?
        .ok_or(DbError::NotFound { entity: "contact link" })?;
    link.delete(db).await?;
    info!(contact_id = %contact_id, matter_id = %matter_id, "contact unlinked");
    Ok(())
}

async fn find_link(
    db: &DbPool,
    contact_id: Uuid,
    matter_id: Uuid,
) -> DbResult<Option<matter_contact::Model>> {
    Ok(matter_contact::Entity::find_by_id((contact_id, matter_id))
        .one(db)
        .await?)
}

fn dedup(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort_unstable();
    ids.dedup();
    ids
}
