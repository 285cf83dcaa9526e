//! API error type and its JSON rendering.
//!
//! Every failure leaves the server as a `{"detail": ...}` body: a list of
//! field errors for rejected parameters (422), a message string otherwise (500).

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::store::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

/// One rejected request parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn query(field: Option<&str>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        let mut loc = vec!["query".to_string()];
        loc.extend(field.map(str::to_string));
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid request parameters")]
    Validation(Vec<FieldError>),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("Not Found")]
    NotFound,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `detail` field for non-validation failures.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Validation(_) => self.to_string(),
            ApiError::Store(StoreError::Operation(msg)) => {
                format!("Database operation failed: {msg}")
            }
            ApiError::Store(err) => format!("An unexpected error occurred: {err}"),
            ApiError::Internal(msg) => format!("An unexpected error occurred: {msg}"),
            ApiError::NotFound => "Not Found".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Validation(errors) => json!({ "detail": errors }),
            _ => json!({ "detail": self.detail() }),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        for (field, errs) in errors.field_errors() {
            let field = field.to_string();
            for err in errs.iter() {
                let msg = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {field}"));
                fields.push(FieldError::query(
                    Some(&field),
                    msg,
                    format!("value_error.{}", err.code),
                ));
            }
        }
        fields.sort_by(|a, b| a.loc.cmp(&b.loc));
        ApiError::Validation(fields)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let text = rejection.body_text();
        // Deserialization failures read "Failed to deserialize query string: <field>: <reason>".
        let field = text
            .split_once(": ")
            .and_then(|(_, rest)| rest.split_once(": "))
            .map(|(field, _)| field.to_string());
        ApiError::Validation(vec![FieldError::query(
            field.as_deref(),
            text,
            "type_error",
        )])
    }
}
