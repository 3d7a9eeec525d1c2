mod error;
mod mutations;
mod queries;
mod validate;
#[cfg(test)]
mod tests;

pub use error::ServiceError;

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::repository::ReservationRepository;

/// Reservation CRUD and occupancy queries over a [`ReservationRepository`].
pub struct ReservationService {
    repo: Arc<dyn ReservationRepository>,
    config: ServiceConfig,
}

impl ReservationService {
    pub fn new(repo: Arc<dyn ReservationRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
