//! Demo data for local development, written through the validated path.

use entity::account::UserType;
use tracing::info;
use uuid::Uuid;

use crate::{
    DbPool, DbResult,
    accounts::{self, NewAccount},
    contacts::{self, NewContact},
    locations,
    matters::{self, NewMatter},
    negotiations::{self, NewNegotiation},
    pretasks::{self, NewPretask},
};

/// Ids of the records created by [`seed`].
#[derive(Clone, Debug)]
pub struct Seeded {
    pub lawyer_id: Uuid,
    pub client_id: Uuid,
    pub matter_id: Uuid,
    pub pretask_id: Uuid,
    pub contact_id: Uuid,
    pub negotiation_id: Uuid,
}

pub async fn seed(db: &DbPool) -> DbResult<Seeded> {
    let office = locations::create(db).await?;
    let home = locations::create(db).await?;
    let harbour = locations::create(db).await?;

    let lawyer = accounts::register(
        db,
        NewAccount {
            user_id: Uuid::new_v4(),
            user_type: UserType::Lawyer,
            company: Some("Lovelace & Partners".into()),
            email: Some("ada@lovelace.law".into()),
            phone: Some("+44 20 7946 0000".into()),
            website: Some("https://lovelace.law".into()),
            address_id: Some(office.id),
        },
    )
    .await?;
    let client = accounts::register(
        db,
        NewAccount {
            user_id: Uuid::new_v4(),
            user_type: UserType::Client,
            company: None,
            email: Some("charles@babbage.example".into()),
            phone: Some("+44 20 7946 0001".into()),
            website: Some("https://babbage.example".into()),
            address_id: Some(home.id),
        },
    )
    .await?;

    let mut lease = NewMatter::new(
        "Lease review",
        "Review the workshop lease before it is signed.",
        lawyer.id,
        client.id,
    );
    lease.amount_cents = 45_000;
    lease.has_client_permission = true;
    lease.has_client_pre_tasks = true;
    lease.has_external_services = true;
    let matter = matters::create(db, lease).await?;

    let pretask = pretasks::create(
        db,
        matter.id,
        NewPretask::new("Send the lease", "Upload the current draft of the lease."),
    )
    .await?;

    let contact = contacts::create(
        db,
        NewContact {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            company: Some("Harbour Notaries".into()),
            email: Some("grace@harbour.example".into()),
            phone: Some("555-0100".into()),
            website: Some("https://harbour.example".into()),
            address_id: Some(harbour.id),
            matter_ids: vec![matter.id],
        },
    )
    .await?;

    let mut retainer = NewNegotiation::new("Monthly retainer", lawyer.id, client.id);
    retainer.cost_type = entity::CostType::Rate;
    retainer.amount_cents = 20_000;
    retainer.initial_amount_cents = 5_000;
    let negotiation = negotiations::create(db, retainer).await?;

    info!(
        lawyer_id = %lawyer.id,
        client_id = %client.id,
        matter_id = %matter.id,
        "demo data seeded"
    );
    Ok(Seeded {
        lawyer_id: lawyer.id,
        client_id: client.id,
        matter_id: matter.id,
        pretask_id: pretask.id,
        contact_id: contact.id,
        negotiation_id: negotiation.id,
    })
}
