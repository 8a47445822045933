//! Service layer providing advertisement operations on top of models.
//! - Separates business rules (validation, pagination policy) from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Repository implementations: SeaORM (PostgreSQL) and an in-memory mock.

pub mod errors;
pub mod pagination;
pub mod advertisement;
#[cfg(test)]
pub mod test_support;

pub use advertisement::repository::AdvertisementRepository;
pub use advertisement::service::AdvertisementService;
pub use errors::ServiceError;
