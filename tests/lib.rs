//! Shared fixtures for the cross-crate integration tests.

use anyhow::Result;
use entity::account::UserType;
use migration::{Migrator, MigratorTrait};
use platform_db::{
    DatabaseSettings, DbPool,
    accounts::{self, NewAccount},
    connect, locations,
};
use uuid::Uuid;

/// Fresh in-memory database with every migration applied.
pub async fn fresh_pool() -> Result<DbPool> {
    let pool = connect(&DatabaseSettings::new("sqlite::memory:")).await?;
    Migrator::up(&pool, None).await?;
    Ok(pool)
}

/// Account with every contact channel filled in.
pub async fn complete_account(pool: &DbPool, user_type: UserType, tag: &str) -> Result<Uuid> {
    let address = locations::create(pool).await?;
    let account = accounts::register(
        pool,
        NewAccount {
            user_id: Uuid::new_v4(),
            user_type,
            company: None,
            email: Some(format!("{tag}@example.org")),
            phone: Some(format!("555-{tag}")),
            website: Some(format!("https://{tag}.example.org")),
            address_id: Some(address.id),
        },
    )
    .await?;
    Ok(account.id)
}

/// A lawyer and a client, returned as `(lawyer_id, client_id)`.
pub async fn parties(pool: &DbPool) -> Result<(Uuid, Uuid)> {
    let lawyer = complete_account(pool, UserType::Lawyer, "lawyer").await?;
    let client = complete_account(pool, UserType::Client, "client").await?;
    Ok((lawyer, client))
}
