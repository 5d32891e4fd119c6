//! Error contract of the HTTP surface.
//!
//! Every failure leaves the service as
//! `{"error": {"status": .., "code": .., "message": ..}}` so clients get the
//! same shape for 400, 403, 404 and 500 regardless of which route failed.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::ValidationError;
use platform_db::DbError;
use serde::Serialize;
use thiserror::Error;

/// Shared handler result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("bad request: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("resource not found")]
    NotFound,
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(err) => err.code(),
            ApiError::InvalidInput(_) => "BAD_REQUEST",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }

    fn body(&self) -> ErrorBody {
        let field = match self {
            ApiError::Validation(err) => err.field(),
            _ => None,
        };
        ErrorBody {
            error: ErrorDetail {
                status: self.status().as_u16(),
                code: self.code(),
                message: self.to_string(),
                field,
            },
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Validation(err) => ApiError::Validation(err),
            DbError::NotFound { .. } | DbError::MissingReference { .. } => ApiError::NotFound,
            DbError::Duplicate { .. } => ApiError::InvalidInput(value.to_string()),
            other => ApiError::internal(other.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        ApiError::InvalidInput(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        ApiError::InvalidInput(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        ApiError::InvalidInput(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(err) => tracing::error!(error = ?err, "request failed"),
            ApiError::Validation(err) => tracing::debug!(code = err.code(), "input rejected"),
            _ => {}
        }
        (self.status(), Json(self.body())).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    status: u16,
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

/// Error page for a bare status code, used where no richer error exists
/// such as an unknown route.
pub fn error_page(status: StatusCode) -> Response {
    let err = match status {
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::FORBIDDEN => ApiError::Forbidden("forbidden".into()),
        status if status.is_client_error() => {
            ApiError::InvalidInput(status.canonical_reason().unwrap_or("bad request").into())
        }
        _ => ApiError::internal(anyhow::anyhow!("unexpected status {status}")),
    };
    err.into_response()
}

/// JSON body extractor whose rejections render as [`ApiError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections render as [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query-string extractor whose rejections render as [`ApiError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn internal_errors_are_masked() {
        let (status, body) = render(ApiError::internal(anyhow::anyhow!("boom"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": {"status": 500, "code": "INTERNAL", "message": "internal server error"}})
        );
    }

    #[tokio::test]
    async fn validation_errors_carry_rule_code() {
        let (status, body) = render(ValidationError::PretaskNotPermitted.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "PRETASK_NOT_PERMITTED");
        assert_eq!(
            body["error"]["message"],
            "You must check in with your client if they have tasks to do before you can start!"
        );
    }

    #[tokio::test]
    async fn field_errors_name_the_field() {
        let (_, body) = render(ValidationError::TooPrecise { field: "amount" }.into()).await;
        assert_eq!(body["error"]["field"], "amount");
        assert_eq!(body["error"]["code"], "TOO_PRECISE");
    }

    #[tokio::test]
    async fn db_errors_map_to_statuses() {
        let missing: ApiError = DbError::NotFound { entity: "matter" }.into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let dangling: ApiError = DbError::MissingReference { entity: "client" }.into();
        assert_eq!(dangling.code(), "NOT_FOUND");

        let invalid: ApiError = DbError::Validation(ValidationError::InitialExceedsBase).into();
        assert_eq!(invalid.code(), "INITIAL_EXCEEDS_BASE");

        let taken: ApiError = DbError::Duplicate { field: "email" }.into();
        assert_eq!(taken.status(), StatusCode::BAD_REQUEST);
        assert_eq!(taken.to_string(), "bad request: another account already uses this email");
    }

    #[tokio::test]
    async fn error_pages_cover_the_custom_statuses() {
        for (status, code) in [
            (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (StatusCode::FORBIDDEN, "FORBIDDEN"),
            (StatusCode::NOT_FOUND, "NOT_FOUND"),
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        ] {
            let response = error_page(status);
            assert_eq!(response.status(), status);
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["error"]["code"], code);
        }
    }
}
