//! Persistence schema and input validation for advertisements.
//! - `advertisement`: SeaORM entity plus the wire-level input types.
//! - `validation`: field rules producing [`validation::Validated`] values.
//! - `db`: pool construction and schema bootstrap.

pub mod errors;
pub mod db;
pub mod advertisement;
pub mod validation;

pub use errors::{FieldError, ValidationError};
pub use validation::Validated;

#[cfg(test)]
mod tests;
