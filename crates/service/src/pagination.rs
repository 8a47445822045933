//! Pagination utilities for service layer
//!
//! Offset/limit paging. Out-of-range values coming from clients are rejected
//! by [`Pagination::from_query`]; [`Pagination::normalize`] clamps for
//! in-process callers.

use models::{FieldError, ValidationError};

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// rows to skip
    pub skip: u64,
    /// max rows returned
    pub limit: u64,
}

impl Pagination {
    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// Clamp to sane bounds and return `(offset, limit)`
    pub fn normalize(self) -> (u64, u64) {
        (self.skip, self.limit.min(MAX_LIMIT))
    }

    /// Build from raw query values. Negative values and a limit above
    /// [`MAX_LIMIT`] are rejected rather than clamped.
    pub fn from_query(skip: Option<i64>, limit: Option<i64>) -> Result<Self, ValidationError> {
        let mut errors = Vec::new();
        let skip = match skip {
            None => 0,
            Some(s) if s >= 0 => s as u64,
            Some(_) => {
                errors.push(FieldError::new("skip", "must be greater than or equal to 0"));
                0
            }
        };
        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(l) if (0..=MAX_LIMIT as i64).contains(&l) => l as u64,
            Some(_) => {
                errors.push(FieldError::new("limit", format!("must be between 0 and {MAX_LIMIT}")));
                DEFAULT_LIMIT
            }
        };
        ValidationError::from_fields(errors)?;
        Ok(Self { skip, limit })
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { skip: 0, limit: DEFAULT_LIMIT }
    }
}
