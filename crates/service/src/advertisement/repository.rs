use async_trait::async_trait;
use models::advertisement::{AdvertisementChanges, AdvertisementFilter, Model, NewAdvertisement};
use models::Validated;

use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Repository abstraction for advertisement persistence.
///
/// Mutating operations are atomic: on error nothing is left behind.
/// Not-found is reported as `None` / `false`, never as an error.
#[async_trait]
pub trait AdvertisementRepository: Send + Sync {
    async fn create(&self, input: Validated<NewAdvertisement>) -> Result<Model, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Model>, ServiceError>;
    async fn update(
        &self,
        id: i32,
        changes: Validated<AdvertisementChanges>,
    ) -> Result<Option<Model>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    /// Matching rows, newest first (`created_at DESC, id DESC`).
    async fn search(
        &self,
        filter: &AdvertisementFilter,
        page: Pagination,
    ) -> Result<Vec<Model>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Rows {
        last_id: i32,
        by_id: BTreeMap<i32, Model>,
    }

    #[derive(Default)]
    pub struct InMemoryAdvertisementRepository {
        rows: Mutex<Rows>,
        // next write fails with this error instead of touching `rows`
        fail_next_write: Mutex<Option<ServiceError>>,
        writes: Mutex<u32>,
    }

    fn poisoned<T>(_: T) -> ServiceError {
        ServiceError::StoreUnavailable("in-memory store lock poisoned".into())
    }

    impl InMemoryAdvertisementRepository {
        /// Make the next create/update/delete fail with `err`.
        pub fn fail_next_write(&self, err: ServiceError) {
            if let Ok(mut slot) = self.fail_next_write.lock() {
                *slot = Some(err);
            }
        }

        /// Number of write operations that reached the repository.
        pub fn write_count(&self) -> u32 {
            self.writes.lock().map(|w| *w).unwrap_or_default()
        }

        pub fn len(&self) -> usize {
            self.rows.lock().map(|r| r.by_id.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn begin_write(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            *self.writes.lock().map_err(poisoned)? += 1;
            if let Some(err) = self.fail_next_write.lock().map_err(poisoned)?.take() {
                return Err(err);
            }
            self.rows.lock().map_err(poisoned)
        }
    }

    #[async_trait]
    impl AdvertisementRepository for InMemoryAdvertisementRepository {
        async fn create(&self, input: Validated<NewAdvertisement>) -> Result<Model, ServiceError> {
            let mut rows = self.begin_write()?;
            let input = input.into_inner();
            rows.last_id += 1;
            let model = Model {
                id: rows.last_id,
                title: input.title,
                description: input.description,
                price: input.price,
                author: input.author,
                created_at: Utc::now().into(),
            };
            rows.by_id.insert(model.id, model.clone());
            Ok(model)
        }

        async fn get(&self, id: i32) -> Result<Option<Model>, ServiceError> {
            let rows = self.rows.lock().map_err(poisoned)?;
            Ok(rows.by_id.get(&id).cloned())
        }

        async fn update(
            &self,
            id: i32,
            changes: Validated<AdvertisementChanges>,
        ) -> Result<Option<Model>, ServiceError> {
            let mut rows = self.begin_write()?;
            let Some(model) = rows.by_id.get_mut(&id) else {
                return Ok(None);
            };
            changes.apply_to(model);
            Ok(Some(model.clone()))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut rows = self.begin_write()?;
            Ok(rows.by_id.remove(&id).is_some())
        }

        async fn search(
            &self,
            filter: &AdvertisementFilter,
            page: Pagination,
        ) -> Result<Vec<Model>, ServiceError> {
            let rows = self.rows.lock().map_err(poisoned)?;
            let (skip, limit) = page.normalize();
            let mut hits: Vec<&Model> = rows.by_id.values().filter(|m| filter.matches(m)).collect();
            hits.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            Ok(hits
                .into_iter()
                .skip(skip as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }
    }
}
