use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::{FieldError, ValidationError};
use serde::Serialize;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub const NOT_FOUND_DETAIL: &str = "Advertisement not found";
pub const INTEGRITY_DETAIL: &str = "data integrity violation";

/// JSON error body: `{"error", "detail", "fields"?}`.
#[derive(Debug, Error, Serialize)]
#[error("{status}: {error}")]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, detail: Option<String>) -> Self {
        Self {
            status,
            error,
            detail,
            fields: Vec::new(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(NOT_FOUND_DETAIL.into()))
    }

    pub fn validation(err: ValidationError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: "Validation Error",
            detail: Some(err.to_string()),
            fields: err.fields,
        }
    }

    /// Request could not be decoded at all.
    pub fn undecodable(field: &'static str, detail: String) -> Self {
        Self::validation(ValidationError::single(field, detail))
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            Some("database error".into()),
        )
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(err: ServiceError) -> Self {
        let code = err.code();
        match err {
            ServiceError::Validation(v) => Self::validation(v),
            ServiceError::ConstraintViolation(msg) => {
                warn!(code, error = %msg, "constraint violation");
                Self::new(
                    StatusCode::BAD_REQUEST,
                    "Constraint Violation",
                    Some(INTEGRITY_DETAIL.into()),
                )
            }
            ServiceError::StoreUnavailable(msg) => {
                error!(code, error = %msg, "store unavailable");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rej: JsonRejection) -> Self {
        Self::undecodable("body", rej.body_text())
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(rej: QueryRejection) -> Self {
        Self::undecodable("query", rej.body_text())
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rej: PathRejection) -> Self {
        Self::undecodable("id", rej.body_text())
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_body_carries_fields() {
        let err = ValidationError::single("price", "must be greater than 0");
        let err = JsonApiError::from(ServiceError::Validation(err));
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        let body = serde_json::to_value(&err).unwrap();
        assert_eq!(body["error"], "Validation Error");
        assert_eq!(body["fields"][0]["field"], "price");
    }

    #[test]
    fn store_errors_are_not_echoed() {
        let err =
            JsonApiError::from(ServiceError::StoreUnavailable("password=hunter2 refused".into()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail.as_deref(), Some("database error"));
        let body = serde_json::to_value(&err).unwrap();
        assert!(body.get("fields").is_none());
    }

    #[test]
    fn constraint_violation_is_bad_request() {
        let err = JsonApiError::from(ServiceError::ConstraintViolation(
            "violates check constraint \"advertisements_price_check\"".into(),
        ));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error, "Constraint Violation");
        assert_eq!(err.detail.as_deref(), Some(INTEGRITY_DETAIL));
    }
}
