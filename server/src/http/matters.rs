//! Matters together with their pre-tasks and external contacts.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::NaiveDate;
use entity::{CostType, contact, matter, pretask};
use platform_api::{ApiJson, ApiPath, ApiQuery};
use platform_db::{
    contacts::{self, ContactChanges, NewContact},
    matters::{self as repo, MatterChanges, MatterFilter, NewMatter},
    pretasks::{self, NewPretask, PretaskChanges},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    AppState, HandlerResult, created,
    forms::{decimal, hundredths, nullable},
};

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/matters", get(list).post(create))
        .route("/matters/", get(list).post(create))
        .route("/matters/{id}", get(show).patch(edit).delete(remove))
        .route(
            "/matters/{id}/pretasks/",
            get(list_pretasks).post(create_pretask),
        )
        .route("/matters/{id}/contacts/", get(list_contacts))
        .route(
            "/matters/{id}/contacts/{contact_id}",
            put(link_contact).delete(unlink_contact),
        )
        .route(
            "/matters/pretasks/{id}",
            get(show_pretask).patch(edit_pretask).delete(remove_pretask),
        )
        .route("/matters/contacts", post(create_contact))
        .route("/matters/contacts/", post(create_contact))
        .route(
            "/matters/contacts/{id}",
            get(show_contact).patch(edit_contact).delete(remove_contact),
        )
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatterQuery {
    lawyer_id: Option<Uuid>,
    client_id: Option<Uuid>,
    active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatterForm {
    title: String,
    description: String,
    #[serde(default)]
    cost_type: CostType,
    amount: Option<Decimal>,
    estimated_hours: Option<Decimal>,
    logged_hours: Option<Decimal>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    #[serde(default)]
    has_client_permission: bool,
    #[serde(default)]
    has_external_services: bool,
    #[serde(default)]
    has_client_pre_tasks: bool,
    #[serde(default)]
    has_related_articles: bool,
    #[serde(default)]
    is_changeable: bool,
    is_active: Option<bool>,
    lawyer_id: Uuid,
    client_id: Uuid,
}

impl MatterForm {
    fn into_input(self) -> HandlerResult<NewMatter> {
        let mut input = NewMatter::new(self.title, self.description, self.lawyer_id, self.client_id);
        input.cost_type = self.cost_type;
        if let Some(amount) = hundredths("amount", self.amount)? {
            input.amount_cents = amount;
        }
        if let Some(hours) = hundredths("estimated_hours", self.estimated_hours)? {
            input.estimated_hours_hundredths = hours;
        }
        if let Some(hours) = hundredths("logged_hours", self.logged_hours)? {
            input.logged_hours_hundredths = hours;
        }
        input.start_date = self.start_date;
        input.due_date = self.due_date;
        input.has_client_permission = self.has_client_permission;
        input.has_external_services = self.has_external_services;
        input.has_client_pre_tasks = self.has_client_pre_tasks;
        input.has_related_articles = self.has_related_articles;
        input.is_changeable = self.is_changeable;
        if let Some(is_active) = self.is_active {
            input.is_active = is_active;
        }
        Ok(input)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MatterPatch {
    title: Option<String>,
    description: Option<String>,
    cost_type: Option<CostType>,
    amount: Option<Decimal>,
    estimated_hours: Option<Decimal>,
    logged_hours: Option<Decimal>,
    start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "nullable")]
    due_date: Option<Option<NaiveDate>>,
    has_client_permission: Option<bool>,
    has_external_services: Option<bool>,
    has_client_pre_tasks: Option<bool>,
    has_related_articles: Option<bool>,
    is_changeable: Option<bool>,
    is_active: Option<bool>,
}

impl MatterPatch {
    fn into_changes(self) -> HandlerResult<MatterChanges> {
        Ok(MatterChanges {
            title: self.title,
            description: self.description,
            cost_type: self.cost_type,
            amount_cents: hundredths("amount", self.amount)?,
            estimated_hours_hundredths: hundredths("estimated_hours", self.estimated_hours)?,
            logged_hours_hundredths: hundredths("logged_hours", self.logged_hours)?,
            start_date: self.start_date,
            due_date: self.due_date,
            has_client_permission: self.has_client_permission,
            has_external_services: self.has_external_services,
            has_client_pre_tasks: self.has_client_pre_tasks,
            has_related_articles: self.has_related_articles,
            is_changeable: self.is_changeable,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Serialize)]
struct MatterView {
    id: Uuid,
    title: String,
    description: String,
    cost_type: CostType,
    cost_type_label: &'static str,
    amount: Decimal,
    estimated_hours: Decimal,
    logged_hours: Decimal,
    start_date: NaiveDate,
    due_date: Option<NaiveDate>,
    has_client_permission: bool,
    has_external_services: bool,
    has_client_pre_tasks: bool,
    has_related_articles: bool,
    is_changeable: bool,
    is_active: bool,
    lawyer_id: Uuid,
    client_id: Uuid,
}

impl From<matter::Model> for MatterView {
    fn from(model: matter::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            cost_type: model.cost_type,
            cost_type_label: model.cost_type.label(),
            amount: decimal(model.amount_cents),
            estimated_hours: decimal(model.estimated_hours_hundredths),
            logged_hours: decimal(model.logged_hours_hundredths),
            start_date: model.start_date,
            due_date: model.due_date,
            has_client_permission: model.has_client_permission,
            has_external_services: model.has_external_services,
            has_client_pre_tasks: model.has_client_pre_tasks,
            has_related_articles: model.has_related_articles,
            is_changeable: model.is_changeable,
            is_active: model.is_active,
            lawyer_id: model.lawyer_id,
            client_id: model.client_id,
        }
    }
}

async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MatterQuery>,
) -> HandlerResult<Json<Vec<MatterView>>> {
    let filter = MatterFilter {
        lawyer_id: query.lawyer_id,
        client_id: query.client_id,
        is_active: query.active,
    };
    let matters = repo::list(&state.pool, filter).await?;
    Ok(Json(matters.into_iter().map(MatterView::from).collect()))
}

async fn create(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<MatterForm>,
) -> HandlerResult<impl IntoResponse> {
    let saved = repo::create(&state.pool, form.into_input()?).await?;
    Ok(created(MatterView::from(saved)))
}

async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> HandlerResult<Json<MatterView>> {
    Ok(Json(repo::find(&state.pool, id).await?.into()))
}

async fn edit(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<MatterPatch>,
) -> HandlerResult<Json<MatterView>> {
    let saved = repo::update(&state.pool, id, patch.into_changes()?).await?;
    Ok(Json(saved.into()))
}

async fn remove(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> HandlerResult<StatusCode> {
    repo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Pre-tasks

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PretaskForm {
    title: String,
    description: String,
    #[serde(default)]
    is_complete: bool,
    is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PretaskPatch {
    title: Option<String>,
    description: Option<String>,
    is_complete: Option<bool>,
    is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
struct PretaskView {
    id: Uuid,
    title: String,
    description: String,
    is_complete: bool,
    is_active: bool,
    matter_id: Uuid,
}

impl From<pretask::Model> for PretaskView {
    fn from(model: pretask::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            is_complete: model.is_complete,
            is_active: model.is_active,
            matter_id: model.matter_id,
        }
    }
}

async fn list_pretasks(
    State(state): State<AppState>,
    ApiPath(matter_id): ApiPath<Uuid>,
) -> HandlerResult<Json<Vec<PretaskView>>> {
    let tasks = pretasks::list_for_matter(&state.pool, matter_id).await?;
    Ok(Json(tasks.into_iter().map(PretaskView::from).collect()))
}

async fn create_pretask(
    State(state): State<AppState>,
    ApiPath(matter_id): ApiPath<Uuid>,
    ApiJson(form): ApiJson<PretaskForm>,
) -> HandlerResult<impl IntoResponse> {
    let mut input = NewPretask::new(form.title, form.description);
    input.is_complete = form.is_complete;
    if let Some(is_active) = form.is_active {
        input.is_active = is_active;
    }
    let saved = pretasks::create(&state.pool, matter_id, input).await?;
    Ok(created(PretaskView::from(saved)))
}

async fn show_pretask(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> HandlerResult<Json<PretaskView>> {
    Ok(Json(pretasks::find(&state.pool, id).await?.into()))
}

async fn edit_pretask(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<PretaskPatch>,
) -> HandlerResult<Json<PretaskView>> {
    let changes = PretaskChanges {
        title: patch.title,
        description: patch.description,
        is_complete: patch.is_complete,
        is_active: patch.is_active,
    };
    Ok(Json(pretasks::update(&state.pool, id, changes).await?.into()))
}

async fn remove_pretask(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> HandlerResult<StatusCode> {
    pretasks::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// External contacts

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContactForm {
    first_name: String,
    last_name: String,
    company: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    address_id: Option<Uuid>,
    #[serde(default)]
    matter_ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContactPatch {
    first_name: Option<String>,
    last_name: Option<String>,
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
struct ContactView {
    id: Uuid,
    display_name: String,
    first_name: String,
    last_name: String,
    company: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    address_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matter_ids: Option<Vec<Uuid>>,
}

impl From<contact::Model> for ContactView {
    fn from(model: contact::Model) -> Self {
        Self {
            id: model.id,
            display_name: model.to_string(),
            first_name: model.first_name,
            last_name: model.last_name,
            company: model.company,
            email: model.email,
            phone: model.phone,
            website: model.website,
            address_id: model.address_id,
            matter_ids: None,
        }
    }
}

impl ContactView {
    fn with_matters(mut self, matter_ids: Vec<Uuid>) -> Self {
        self.matter_ids = Some(matter_ids);
        self
    }
}

async fn list_contacts(
    State(state): State<AppState>,
    ApiPath(matter_id): ApiPath<Uuid>,
) -> HandlerResult<Json<Vec<ContactView>>> {
    let linked = contacts::list_for_matter(&state.pool, matter_id).await?;
    Ok(Json(linked.into_iter().map(ContactView::from).collect()))
}

async fn link_contact(
    State(state): State<AppState>,
    ApiPath((matter_id, contact_id)): ApiPath<(Uuid, Uuid)>,
) -> HandlerResult<StatusCode> {
    contacts::link(&state.pool, contact_id, matter_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn unlink_contact(
    State(state): State<AppState>,
    ApiPath((matter_id, contact_id)): ApiPath<(Uuid, Uuid)>,
) -> HandlerResult<StatusCode> {
    contacts::unlink(&state.pool, contact_id, matter_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn create_contact(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ContactForm>,
) -> HandlerResult<impl IntoResponse> {
    let input = NewContact {
        first_name: form.first_name,
        last_name: form.last_name,
        company: form.company,
        email: form.email,
        phone: form.phone,
        website: form.website,
        address_id: form.address_id,
        matter_ids: form.matter_ids,
    };
    let saved = contacts::create(&state.pool, input).await?;
    let matter_ids = contacts::matter_ids(&state.pool, saved.id).await?;
    Ok(created(ContactView::from(saved).with_matters(matter_ids)))
}

async fn show_contact(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> HandlerResult<Json<ContactView>> {
    let found = contacts::find(&state.pool, id).await?;
    let matter_ids = contacts::matter_ids(&state.pool, id).await?;
    Ok(Json(ContactView::from(found).with_matters(matter_ids)))
}

async fn edit_contact(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<ContactPatch>,
) -> HandlerResult<Json<ContactView>> {
    let changes = ContactChanges {
        first_name: patch.first_name,
        last_name: patch.last_name,
        company: patch.company,
        email: patch.email,
        phone: patch.phone,
        website: patch.website,
        address_id: patch.address_id,
    };
    let saved = contacts::update(&state.pool, id, changes).await?;
    let matter_ids = contacts::matter_ids(&state.pool, id).await?;
    Ok(Json(ContactView::from(saved).with_matters(matter_ids)))
}

async fn remove_contact(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> HandlerResult<StatusCode> {
    contacts::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
