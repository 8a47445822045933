use models::ValidationError;
use sea_orm::{sqlx, DbErr, RuntimeErr};
use thiserror::Error;

/// SQLSTATE class 23: integrity constraint violation.
const INTEGRITY_CLASS: &str = "23";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

/// SQLSTATE reported by the database, if the error came from the server.
fn sqlstate(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
        | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(e))) => {
            e.code().map(|c| c.into_owned())
        }
        _ => None,
    }
}

impl ServiceError {
    /// Classify a SeaORM error as an integrity violation or a store failure.
    /// Relies on the SQLSTATE code, not on the (localized) message text.
    pub fn from_db(err: DbErr) -> Self {
        match sqlstate(&err) {
            Some(code) if code.starts_with(INTEGRITY_CLASS) => {
                ServiceError::ConstraintViolation(format!("[{code}] {err}"))
            }
            _ => ServiceError::StoreUnavailable(err.to_string()),
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::ConstraintViolation(_) => 1002,
            ServiceError::StoreUnavailable(_) => 1200,
        }
    }
}
