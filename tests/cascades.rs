use acce_tests::{complete_account, fresh_pool, parties};
use anyhow::Result;
use entity::{
    account::UserType,
    prelude::{Client, Lawyer, MatterContact, Negotiation, Pretask},
};
use platform_db::{
    DbError, accounts,
    contacts::{self, NewContact},
    locations,
    matters::{self, NewMatter},
    negotiations::{self, NewNegotiation},
    pretasks::{self, NewPretask},
};
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn deleting_a_location_keeps_its_residents() -> Result<()> {
    let pool = fresh_pool().await?;
    let id = complete_account(&pool, UserType::Client, "0007").await?;
    let address = accounts::find(&pool, id)
        .await?
        .address_id
        .expect("address set at registration");

    locations::delete(&pool, address).await?;

    let account = accounts::find(&pool, id).await?;
    assert_eq!(account.address_id, None);
    assert!(matches!(
        locations::delete(&pool, address).await,
        Err(DbError::NotFound { entity: "location" })
    ));
    Ok(())
}

#[tokio::test]
async fn deleting_a_matter_keeps_its_contacts() -> Result<()> {
    let pool = fresh_pool().await?;
    let (lawyer_id, client_id) = parties(&pool).await?;
    let mut input = NewMatter::new("Lease review", "Commercial lease", lawyer_id, client_id);
    input.has_client_permission = true;
    input.has_client_pre_tasks = true;
    let matter = matters::create(&pool, input).await?;
    pretasks::create(&pool, matter.id, NewPretask::new("Send lease", "Upload it")).await?;

    let address = locations::create(&pool).await?;
    let contact = contacts::create(
        &pool,
        NewContact {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: Some("grace@harbour.example".into()),
            phone: Some("555-0100".into()),
            website: Some("harbour.example".into()),
            address_id: Some(address.id),
            matter_ids: vec![matter.id],
            ..NewContact::default()
        },
    )
    .await?;

    matters::delete(&pool, matter.id).await?;

    assert_eq!(Pretask::find().count(&pool).await?, 0);
    assert_eq!(MatterContact::find().count(&pool).await?, 0);
    assert_eq!(contacts::find(&pool, contact.id).await?.id, contact.id);
    Ok(())
}

#[tokio::test]
async fn deleting_an_account_removes_role_and_owned_work() -> Result<()> {
    let pool = fresh_pool().await?;
    let (lawyer_id, client_id) = parties(&pool).await?;
    let matter = matters::create(
        &pool,
        NewMatter::new("Lease review", "Commercial lease", lawyer_id, client_id),
    )
    .await?;
    negotiations::create(&pool, NewNegotiation::new("Retainer", lawyer_id, client_id)).await?;

    accounts::delete(&pool, client_id).await?;

    assert_eq!(Client::find().count(&pool).await?, 0);
    assert_eq!(Lawyer::find().count(&pool).await?, 1);
    assert_eq!(Negotiation::find().count(&pool).await?, 0);
    assert!(matches!(
        matters::find(&pool, matter.id).await,
        Err(DbError::NotFound { entity: "matter" })
    ));
    Ok(())
}
