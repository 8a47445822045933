use std::sync::Arc;

use models::advertisement::{AdvertisementPatch, Model, NewAdvertisement};
use tracing::{info, instrument};

use super::domain::{SearchQuery, SearchRequest};
use super::repository::AdvertisementRepository;
use crate::errors::ServiceError;

/// Application service for advertisements.
///
/// Validates input before anything reaches the repository and invokes
/// exactly one repository operation per call.
pub struct AdvertisementService<R: AdvertisementRepository + ?Sized> {
    repo: Arc<R>,
}

/// Service over a type-erased repository, as held in server state.
pub type DynAdvertisementService = AdvertisementService<dyn AdvertisementRepository>;

impl<R: AdvertisementRepository + ?Sized> AdvertisementService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Validate and store a new advertisement.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::advertisement::repository::mock::InMemoryAdvertisementRepository;
    /// use service::advertisement::service::AdvertisementService;
    /// use models::advertisement::NewAdvertisement;
    /// let svc = AdvertisementService::new(Arc::new(InMemoryAdvertisementRepository::default()));
    /// let input = NewAdvertisement {
    ///     title: " Bike ".into(),
    ///     description: "Road bike".into(),
    ///     price: 150.into(),
    ///     author: "Alice".into(),
    /// };
    /// let ad = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(ad.id, 1);
    /// assert_eq!(ad.title, "Bike");
    /// assert_eq!(ad.price.to_string(), "150.00");
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewAdvertisement) -> Result<Model, ServiceError> {
        let valid = input.validate()?;
        let created = self.repo.create(valid).await?;
        info!(id = created.id, author = %created.author, "advertisement_created");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Model>, ServiceError> {
        self.repo.get(id).await
    }

    /// Apply a partial update. `Ok(None)` when no advertisement has `id`.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        id: i32,
        patch: AdvertisementPatch,
    ) -> Result<Option<Model>, ServiceError> {
        let changes = patch.validate()?;
        let updated = self.repo.update(id, changes).await?;
        if updated.is_some() {
            info!(id, "advertisement_updated");
        }
        Ok(updated)
    }

    /// Hard delete. `Ok(false)` when no advertisement has `id`.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            info!(id, "advertisement_deleted");
        }
        Ok(deleted)
    }

    pub async fn search(&self, query: SearchQuery) -> Result<Vec<Model>, ServiceError> {
        let request = query.validate()?;
        self.search_with(&request).await
    }

    pub async fn search_with(&self, request: &SearchRequest) -> Result<Vec<Model>, ServiceError> {
        self.repo.search(&request.filter, request.page).await
    }
}
