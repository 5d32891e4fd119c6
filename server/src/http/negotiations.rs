use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use entity::{CostType, negotiation};
use platform_api::{ApiJson, ApiPath, ApiQuery};
use platform_db::negotiations::{
    self as repo, NegotiationChanges, NegotiationFilter, NewNegotiation,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    AppState, HandlerResult, created,
    forms::{decimal, hundredths},
};

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/negotiations", get(list).post(create))
        .route("/negotiations/", get(list).post(create))
        .route("/negotiations/{id}", get(show).patch(edit).delete(remove))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NegotiationQuery {
    lawyer_id: Option<Uuid>,
    client_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NegotiationForm {
    title: String,
    #[serde(default)]
    cost_type: CostType,
    amount: Option<Decimal>,
    initial_amount: Option<Decimal>,
    budget: Option<Decimal>,
    #[serde(default)]
    is_accepted: bool,
    #[serde(default)]
    is_changeable: bool,
    lawyer_id: Uuid,
    client_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NegotiationPatch {
    title: Option<String>,
    cost_type: Option<CostType>,
    amount: Option<Decimal>,
    initial_amount: Option<Decimal>,
    budget: Option<Decimal>,
    is_accepted: Option<bool>,
    is_changeable: Option<bool>,
}

#[derive(Debug, Serialize)]
struct NegotiationView {
    id: Uuid,
    title: String,
    cost_type: CostType,
    cost_type_label: &'static str,
    amount: Decimal,
    initial_amount: Decimal,
    budget: Decimal,
    is_accepted: bool,
    is_changeable: bool,
    lawyer_id: Uuid,
    client_id: Uuid,
}

impl From<negotiation::Model> for NegotiationView {
    fn from(model: negotiation::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            cost_type: model.cost_type,
            cost_type_label: model.cost_type.label(),
            amount: decimal(model.amount_cents),
            initial_amount: decimal(model.initial_amount_cents),
            budget: decimal(model.budget_cents),
            is_accepted: model.is_accepted,
            is_changeable: model.is_changeable,
            lawyer_id: model.lawyer_id,
            client_id: model.client_id,
        }
    }
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NegotiationQuery>,
) -> HandlerResult<Json<Vec<NegotiationView>>> {
    let filter = NegotiationFilter {
        lawyer_id: query.lawyer_id,
        client_id: query.client_id,
    };
    let offers = repo::list(&state.pool, filter).await?;
    Ok(Json(offers.into_iter().map(NegotiationView::from).collect()))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<NegotiationForm>,
) -> HandlerResult<impl IntoResponse> {
    let mut input = NewNegotiation::new(form.title, form.lawyer_id, form.client_id);
    input.cost_type = form.cost_type;
    if let Some(amount) = hundredths("amount", form.amount)? {
        input.amount_cents = amount;
    }
    if let Some(initial) = hundredths("initial_amount", form.initial_amount)? {
        input.initial_amount_cents = initial;
    }
    if let Some(budget) = hundredths("budget", form.budget)? {
        input.budget_cents = budget;
    }
    input.is_accepted = form.is_accepted;
    input.is_changeable = form.is_changeable;

    let saved = repo::create(&state.pool, input).await?;
    Ok(created(NegotiationView::from(saved)))
}

async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> HandlerResult<Json<NegotiationView>> {
    Ok(Json(repo::find(&state.pool, id).await?.into()))
}

async fn edit(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<NegotiationPatch>,
) -> HandlerResult<Json<NegotiationView>> {
    let changes = NegotiationChanges {
        title: patch.title,
        cost_type: patch.cost_type,
        amount_cents: hundredths("amount", patch.amount)?,
        initial_amount_cents: hundredths("initial_amount", patch.initial_amount)?,
        budget_cents: hundredths("budget", patch.budget)?,
        is_accepted: patch.is_accepted,
        is_changeable: patch.is_changeable,
    };
    Ok(Json(repo::update(&state.pool, id, changes).await?.into()))
}

async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> HandlerResult<StatusCode> {
    repo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
