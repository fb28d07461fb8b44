//! Book categories repository (read-only, seeded out of band)

use std::sync::Arc;

use mongodb::bson::Document;

use crate::error::AppResult;

use super::{CollectionName, CollectionStore};

#[derive(Clone)]
pub struct CategoriesRepository {
    store: Arc<dyn CollectionStore>,
}

impl CategoriesRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: Document) -> AppResult<Vec<Document>> {
        self.store.find(CollectionName::BookCategories, filter).await
    }
}
