//! Business logic services

pub mod borrowing;
pub mod catalog;
pub mod session;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub borrowing: borrowing::BorrowingService,
    pub session: session::SessionService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(
                repository.clone(),
                config.catalog.validate_books,
            ),
            borrowing: borrowing::BorrowingService::new(repository.clone()),
            session: session::SessionService::new(&config.auth),
            repository,
        }
    }
}
