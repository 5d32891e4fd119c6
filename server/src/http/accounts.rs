use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use entity::account::{self, UserType};
use platform_api::{ApiJson, ApiPath};
use platform_db::{
    accounts::{self as repo, AccountChanges, NewAccount},
    locations,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AppState, HandlerResult, created, forms::nullable};

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(register))
        .route("/accounts/", post(register))
        .route("/accounts/locations", post(create_location))
        .route("/accounts/locations/", post(create_location))
        .route("/accounts/locations/{id}", delete(delete_location))
        .route("/accounts/{id}", get(show).patch(edit).delete(remove))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegisterForm {
    user_id: Uuid,
    #[serde(default)]
    user_type: UserType,
    company: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    address_id: Option<Uuid>,
}

/// The user type is missing on purpose: it is fixed at registration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AccountPatch {
    #[serde(default, deserialize_with = "nullable")]
    company: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    website: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    address_id: Option<Option<Uuid>>,
}

#[derive(Debug, Serialize)]
struct AccountView {
    id: Uuid,
    user_id: Uuid,
    user_type: UserType,
    user_type_label: &'static str,
    company: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    address_id: Option<Uuid>,
}

impl From<account::Model> for AccountView {
    fn from(model: account::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            user_type: model.user_type,
            user_type_label: model.user_type.label(),
            company: model.company,
            email: model.email,
            phone: model.phone,
            website: model.website,
            address_id: model.address_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct LocationView {
    id: Uuid,
}

async fn register(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<RegisterForm>,
) -> HandlerResult<impl IntoResponse> {
    let input = NewAccount {
        user_id: form.user_id,
        user_type: form.user_type,
        company: form.company,
        email: form.email,
        phone: form.phone,
        website: form.website,
        address_id: form.address_id,
    };
    let saved = repo::register(&state.pool, input).await?;
    Ok(created(AccountView::from(saved)))
}

async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> HandlerResult<Json<AccountView>> {
    Ok(Json(repo::find(&state.pool, id).await?.into()))
}

async fn edit(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<AccountPatch>,
) -> HandlerResult<Json<AccountView>> {
    let changes = AccountChanges {
        company: patch.company,
        email: patch.email,
        phone: patch.phone,
        website: patch.website,
        address_id: patch.address_id,
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

async fn create_location(State(state): State<AppState>) -> HandlerResult<impl IntoResponse> {
    let saved = locations::create(&state.pool).await?;
    Ok(created(LocationView { id: saved.id }))
}

async fn delete_location(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> HandlerResult<StatusCode> {
    locations::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
