use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// One field-level validation failure. Collected, not short-circuited, so a
/// bad payload reports every problem at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Cases service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum CasesServiceError {
    #[error("case not found")]
    CaseNotFound,
    #[error("event not found")]
    EventNotFound,
    #[error("document not found")]
    DocumentNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("case number already exists")]
    CaseNumberTaken,
    #[error("email already exists")]
    EmailTaken,
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CasesServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CaseNotFound => "CASE_NOT_FOUND",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::DocumentNotFound => "DOCUMENT_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CaseNumberTaken => "CASE_NUMBER_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::Validation(_) => "VALIDATION",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for CasesServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::CaseNotFound
            | Self::EventNotFound
            | Self::DocumentNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::CaseNumberTaken | Self::EmailTaken => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation(ref violations) = self {
            body["errors"] = serde_json::to_value(violations).unwrap_or_default();
        }
        (status, axum::Json(body)).into_response()
    }
}
