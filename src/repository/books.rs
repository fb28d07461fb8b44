//! Books repository

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::{
    error::AppResult,
    models::{InsertAck, UpdateAck},
};

use super::{CollectionName, CollectionStore};

#[derive(Clone)]
pub struct BooksRepository {
    store: Arc<dyn CollectionStore>,
}

impl BooksRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// All books, unpaginated
    pub async fn list(&self) -> AppResult<Vec<Document>> {
        self.store.find(CollectionName::Books, doc! {}).await
    }

    pub async fn get_by_id(&self, id: ObjectId) -> AppResult<Option<Document>> {
        self.store
            .find_one(CollectionName::Books, doc! { "_id": id })
            .await
    }

    /// Books whose category equals `category` exactly (case-sensitive)
    pub async fn list_by_category(&self, category: &str) -> AppResult<Vec<Document>> {
        self.store
            .find(CollectionName::Books, doc! { "category": category })
            .await
    }

    pub async fn create(&self, book: Document) -> AppResult<InsertAck> {
        self.store.insert_one(CollectionName::Books, book).await
    }

    /// Replace a book's content with `fields`, creating it under `id` if
    /// missing. Fields the book had beyond these are removed.
    pub async fn upsert(&self, id: ObjectId, fields: Document) -> AppResult<UpdateAck> {
        self.store
            .upsert_one(CollectionName::Books, doc! { "_id": id }, fields)
            .await
    }
}
