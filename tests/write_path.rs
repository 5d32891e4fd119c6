use acce_tests::{complete_account, fresh_pool, parties};
use anyhow::Result;
use entity::{
    ContactSubject, CostType, ValidationError, account::UserType, client, lawyer,
    prelude::{Account, Matter},
};
use platform_db::{
    DbError,
    accounts::{self, AccountChanges, NewAccount},
    contacts::{self, NewContact},
    locations,
    matters::{self, MatterChanges, MatterFilter, NewMatter},
    negotiations::{self, NegotiationChanges, NewNegotiation},
    pretasks::{self, NewPretask},
    seed,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use uuid::Uuid;

#[tokio::test]
async fn registration_creates_exactly_one_role() -> Result<()> {
    let pool = fresh_pool().await?;
    let (lawyer_id, client_id) = parties(&pool).await?;

    assert!(lawyer::Entity::find_by_id(lawyer_id).one(&pool).await?.is_some());
    assert!(client::Entity::find_by_id(lawyer_id).one(&pool).await?.is_none());
    assert!(client::Entity::find_by_id(client_id).one(&pool).await?.is_some());
    assert!(lawyer::Entity::find_by_id(client_id).one(&pool).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn rejected_registration_writes_nothing() -> Result<()> {
    let pool = fresh_pool().await?;
    let err = accounts::register(
        &pool,
        NewAccount {
            user_id: Uuid::new_v4(),
            user_type: UserType::Lawyer,
            email: Some("ada@lovelace.law".into()),
            ..NewAccount::default()
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        DbError::Validation(ValidationError::IncompleteContactInfo {
            subject: ContactSubject::Account
        })
    ));
    assert_eq!(Account::find().count(&pool).await?, 0);
    assert_eq!(lawyer::Entity::find().count(&pool).await?, 0);
    Ok(())
}

#[tokio::test]
async fn dangling_address_is_a_missing_reference() -> Result<()> {
    let pool = fresh_pool().await?;
    let err = accounts::register(
        &pool,
        NewAccount {
            user_id: Uuid::new_v4(),
            email: Some("ada@lovelace.law".into()),
            phone: Some("555-0001".into()),
            website: Some("lovelace.law".into()),
            address_id: Some(Uuid::new_v4()),
            ..NewAccount::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DbError::MissingReference { entity: "location" }));
    Ok(())
}

#[tokio::test]
async fn clearing_a_contact_channel_is_refused() -> Result<()> {
    let pool = fresh_pool().await?;
    let id = complete_account(&pool, UserType::Client, "0042").await?;

    let err = accounts::update(
        &pool,
        id,
        AccountChanges {
            website: Some(None),
            ..AccountChanges::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));

    let stored = accounts::find(&pool, id).await?;
    assert_eq!(stored.website.as_deref(), Some("https://0042.example.org"));

    let updated = accounts::update(
        &pool,
        id,
        AccountChanges {
            company: Some(Some("Babbage Engines".into())),
            ..AccountChanges::default()
        },
    )
    .await?;
    assert_eq!(updated.company.as_deref(), Some("Babbage Engines"));
    assert_eq!(updated.user_type, UserType::Client);
    Ok(())
}

#[tokio::test]
async fn matter_rules_are_checked_before_writing() -> Result<()> {
    let pool = fresh_pool().await?;
    let (lawyer_id, client_id) = parties(&pool).await?;

    let mut input = NewMatter::new("Lease review", "Commercial lease", lawyer_id, client_id);
    input.has_external_services = true;
    input.logged_hours_hundredths = 100;
    let err = matters::create(&pool, input).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::Validation(ValidationError::ExternalServiceNotPermitted)
    ));

    let mut input = NewMatter::new("Lease review", "Commercial lease", lawyer_id, client_id);
    input.start_date = entity::validation::today().pred_opt();
    let err = matters::create(&pool, input).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::Validation(ValidationError::UnauthorizedWorkLogged)
    ));

    assert_eq!(Matter::find().count(&pool).await?, 0);
    Ok(())
}

#[tokio::test]
async fn permission_allows_past_start_and_logged_hours() -> Result<()> {
    let pool = fresh_pool().await?;
    let (lawyer_id, client_id) = parties(&pool).await?;

    let mut input = NewMatter::new("Probate", "Estate of the late Mr. Babbage", lawyer_id, client_id);
    input.has_client_permission = true;
    input.start_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 6);
    input.logged_hours_hundredths = 1_250;
    let saved = matters::create(&pool, input).await?;

    let updated = matters::update(
        &pool,
        saved.id,
        MatterChanges {
            logged_hours_hundredths: Some(1_500),
            ..MatterChanges::default()
        },
    )
    .await?;
    assert_eq!(updated.logged_hours_hundredths, 1_500);
    Ok(())
}

#[tokio::test]
async fn matters_list_alphabetically_with_filters() -> Result<()> {
    let pool = fresh_pool().await?;
    let (lawyer_id, client_id) = parties(&pool).await?;
    for (title, active) in [("Will", true), ("Contract", false), ("Lease", true)] {
        let mut input = NewMatter::new(title, "Routine work", lawyer_id, client_id);
        input.is_active = active;
        matters::create(&pool, input).await?;
    }

    let all = matters::list(&pool, MatterFilter::default()).await?;
    let titles: Vec<_> = all.iter().map(|matter| matter.title.as_str()).collect();
    assert_eq!(titles, ["Contract", "Lease", "Will"]);

    let active = matters::list(
        &pool,
        MatterFilter {
            is_active: Some(true),
            client_id: Some(client_id),
            ..MatterFilter::default()
        },
    )
    .await?;
    let titles: Vec<_> = active.iter().map(|matter| matter.title.as_str()).collect();
    assert_eq!(titles, ["Lease", "Will"]);

    let nobody = matters::list(
        &pool,
        MatterFilter {
            lawyer_id: Some(client_id),
            ..MatterFilter::default()
        },
    )
    .await?;
    assert!(nobody.is_empty());
    Ok(())
}

#[tokio::test]
async fn agreed_matter_can_be_repriced() -> Result<()> {
    let pool = fresh_pool().await?;
    let (lawyer_id, client_id) = parties(&pool).await?;
    let mut input = NewMatter::new("Lease review", "Commercial lease", lawyer_id, client_id);
    input.has_client_permission = true;
    input.amount_cents = 45_000;
    let saved = matters::create(&pool, input).await?;

    let repriced = matters::update(
        &pool,
        saved.id,
        MatterChanges {
            cost_type: Some(CostType::Rate),
            amount_cents: Some(50_000),
            ..MatterChanges::default()
        },
    )
    .await?;
    assert_eq!(repriced.cost_type, CostType::Rate);
    assert_eq!(repriced.amount_cents, 50_000);
    assert!(!repriced.is_changeable);

    let stored = matters::find(&pool, saved.id).await?;
    assert_eq!(stored.amount_cents, 50_000);
    Ok(())
}

#[tokio::test]
async fn pretask_needs_an_existing_matter() -> Result<()> {
    let pool = fresh_pool().await?;
    let err = pretasks::create(&pool, Uuid::new_v4(), NewPretask::new("Sign", "Sign the form"))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::MissingReference { entity: "matter" }));

    let err = pretasks::list_for_matter(&pool, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { entity: "matter" }));
    Ok(())
}

#[tokio::test]
async fn pretask_title_is_limited_to_32_characters() -> Result<()> {
    let pool = fresh_pool().await?;
    let (lawyer_id, client_id) = parties(&pool).await?;
    let matter = matters::create(
        &pool,
        NewMatter::new("Lease review", "Commercial lease", lawyer_id, client_id),
    )
    .await?;

    let err = pretasks::create(&pool, matter.id, NewPretask::new("x".repeat(33), "Too long"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::Validation(ValidationError::TooLong { field: "title", max: 32 })
    ));
    Ok(())
}

#[tokio::test]
async fn contact_links_are_idempotent() -> Result<()> {
    let pool = fresh_pool().await?;
    let (lawyer_id, client_id) = parties(&pool).await?;
    let matter = matters::create(
        &pool,
        NewMatter::new("Lease review", "Commercial lease", lawyer_id, client_id),
    )
    .await?;
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
            matter_ids: vec![matter.id, matter.id],
            ..NewContact::default()
        },
    )
    .await?;

    assert_eq!(contacts::matter_ids(&pool, contact.id).await?, vec![matter.id]);
    contacts::link(&pool, contact.id, matter.id).await?;
    assert_eq!(contacts::list_for_matter(&pool, matter.id).await?.len(), 1);

    contacts::unlink(&pool, contact.id, matter.id).await?;
    assert!(contacts::list_for_matter(&pool, matter.id).await?.is_empty());
    let err = contacts::unlink(&pool, contact.id, matter.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn negotiation_rules_hold_on_every_write() -> Result<()> {
    let pool = fresh_pool().await?;
    let (lawyer_id, client_id) = parties(&pool).await?;

    let mut input = NewNegotiation::new("Retainer", lawyer_id, client_id);
    input.amount_cents = 5_000;
    input.initial_amount_cents = 5_001;
    let err = negotiations::create(&pool, input).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::Validation(ValidationError::InitialExceedsBase)
    ));

    let mut input = NewNegotiation::new("Retainer", lawyer_id, client_id);
    input.amount_cents = 5_000;
    input.initial_amount_cents = 5_000;
    let saved = negotiations::create(&pool, input).await?;
    assert_eq!(saved.budget_cents, 10_000);

    let accepted = negotiations::update(
        &pool,
        saved.id,
        NegotiationChanges {
            is_accepted: Some(true),
            ..NegotiationChanges::default()
        },
    )
    .await?;
    assert!(accepted.is_accepted);

    let repriced = negotiations::update(
        &pool,
        saved.id,
        NegotiationChanges {
            amount_cents: Some(6_000),
            ..NegotiationChanges::default()
        },
    )
    .await?;
    assert_eq!(repriced.amount_cents, 6_000);
    assert!(repriced.is_accepted);

    let err = negotiations::update(
        &pool,
        saved.id,
        NegotiationChanges {
            amount_cents: Some(4_000),
            ..NegotiationChanges::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        DbError::Validation(ValidationError::InitialExceedsBase)
    ));
    assert_eq!(negotiations::find(&pool, saved.id).await?.amount_cents, 6_000);
    Ok(())
}

#[tokio::test]
async fn seed_goes_through_the_validated_path() -> Result<()> {
    let pool = fresh_pool().await?;
    let seeded = seed::seed(&pool).await?;

    let matter = matters::find(&pool, seeded.matter_id).await?;
    assert_eq!(matter.lawyer_id, seeded.lawyer_id);
    assert_eq!(
        pretasks::list_for_matter(&pool, matter.id).await?[0].id,
        seeded.pretask_id
    );
    assert_eq!(
        contacts::list_for_matter(&pool, matter.id).await?[0].id,
        seeded.contact_id
    );
    let offer = negotiations::find(&pool, seeded.negotiation_id).await?;
    assert_eq!(offer.cost_type, CostType::Rate);
    Ok(())
}
