//! Registration and maintenance of user accounts.
//!
//! Registering creates the account and its single role record (lawyer or
//! client) together; the role never changes afterwards.

use entity::account::{self, UserType};
use entity::{Validate, client, lawyer};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set,
    TransactionTrait,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{DbError, DbPool, DbResult, locations, write};

/// Columns behind a unique index, as named in [`DbError::Duplicate`].
const UNIQUE_FIELDS: [&str; 3] = ["user_id", "email", "phone"];

#[derive(Clone, Debug, Default)]
pub struct NewAccount {
    pub user_id: Uuid,
    pub user_type: UserType,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address_id: Option<Uuid>,
}

/// Editable account fields. `Some(None)` clears a nullable field.
#[derive(Clone, Debug, Default)]
pub struct AccountChanges {
    pub company: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub address_id: Option<Option<Uuid>>,
}

impl AccountChanges {
    fn apply(self, account: &mut account::Model) {
        write::patch(&mut account.company, self.company);
        write::patch(&mut account.email, self.email);
        write::patch(&mut account.phone, self.phone);
        write::patch(&mut account.website, self.website);
        write::patch(&mut account.address_id, self.address_id);
    }
}

#[instrument(name = "db.accounts.register", skip_all)]
pub async fn register(db: &DbPool, input: NewAccount) -> DbResult<account::Model> {
    let candidate = account::Model {
        id: Uuid::new_v4(),
        user_id: input.user_id,
        user_type: input.user_type,
        company: input.company,
        email: input.email,
        phone: input.phone,
        website: input.website,
        address_id: input.address_id,
    };
    candidate.full_clean()?;
    locations::ensure_address(db, candidate.address_id).await?;
    ensure_unique(db, &candidate).await?;

    let saved = insert_with_role(db, candidate).await?;
    info!(account_id = %saved.id, user_type = ?saved.user_type, "account registered");
    Ok(saved)
}

/// Writes the account and its role row in one transaction. The unique
/// indexes still guard against a registration that slipped past
/// [`ensure_unique`] concurrently.
async fn insert_with_role(db: &DbPool, candidate: account::Model) -> DbResult<account::Model> {
    let txn = db.begin().await?;
    let saved = write::all_set(candidate.into_active_model())
        .insert(&txn)
        .await
        .map_err(|err| write::unique_violation(err, &UNIQUE_FIELDS))?;
    match saved.user_type {
        UserType::Lawyer => {
            lawyer::ActiveModel {
                account_id: Set(saved.id),
            }
            .insert(&txn)
            .await?;
        }
        UserType::Client => {
            client::ActiveModel {
                account_id: Set(saved.id),
            }
            .insert(&txn)
            .await?;
        }
    }
    txn.commit().await?;
    Ok(saved)
}

pub async fn find(db: &DbPool, id: Uuid) -> DbResult<account::Model> {
    account::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbError::NotFound { entity: "account" })
}

#[instrument(name = "db.accounts.update", skip(db, changes))]
pub async fn update(db: &DbPool, id: Uuid, changes: AccountChanges) -> DbResult<account::Model> {
    let mut candidate = find(db, id).await?;
    changes.apply(&mut candidate);
    candidate.full_clean()?;
    locations::ensure_address(db, candidate.address_id).await?;
    ensure_unique(db, &candidate).await?;
    write::all_set(candidate.into_active_model())
        .update(db)
        .await
        .map_err(|err| write::unique_violation(err, &UNIQUE_FIELDS))
}

/// Removes the account together with its role and everything owned by it.
pub async fn delete(db: &DbPool, id: Uuid) -> DbResult<()> {
    let result = account::Entity::delete_by_id(id).exec(db).await?;
    write::deleted(result.rows_affected, "account")?;
    info!(account_id = %id, "account deleted");
    Ok(())
}

pub(crate) async fn ensure_lawyer(db: &DbPool, id: Uuid) -> DbResult<()> {
    write::ensure_exists::<lawyer::Entity, _>(db, id, "lawyer").await
}

pub(crate) async fn ensure_client(db: &DbPool, id: Uuid) -> DbResult<()> {
    write::ensure_exists::<client::Entity, _>(db, id, "client").await
}

async fn ensure_unique(db: &DbPool, candidate: &account::Model) -> DbResult<()> {
    let mut checks = vec![("user_id", account::Column::UserId.eq(candidate.user_id))];
    if let Some(email) = &candidate.email {
        checks.push(("email", account::Column::Email.eq(email.as_str())));
    }
    if let Some(phone) = &candidate.phone {
        checks.push(("phone", account::Column::Phone.eq(phone.as_str())));
    }
    for (field, condition) in checks {
        let taken = account::Entity::find()
            .filter(condition)
            .filter(account::Column::Id.ne(candidate.id))
            .one(db)
            .await?
            .is_some();
        if taken {
            return Err(DbError::Duplicate { field });
        }
    }
    Ok(())
}
