pub mod routes;
pub mod startup;
pub mod errors;
pub mod openapi;

use std::sync::Arc;

use service::advertisement::service::DynAdvertisementService;
use service::AdvertisementRepository;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub ads: Arc<DynAdvertisementService>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn AdvertisementRepository>) -> Self {
        Self {
            ads: Arc::new(DynAdvertisementService::new(repo)),
        }
    }
}

pub use startup::run;
