//! Borrowed books repository

use std::sync::Arc;

use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::{
    error::AppResult,
    models::{DeleteAck, InsertAck},
};

use super::{CollectionName, CollectionStore};

#[derive(Clone)]
pub struct BorrowedBooksRepository {
    store: Arc<dyn CollectionStore>,
}

impl BorrowedBooksRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: Document) -> AppResult<Vec<Document>> {
        self.store.find(CollectionName::BorrowedBooks, filter).await
    }

    pub async fn list_by_email(&self, email: &str) -> AppResult<Vec<Document>> {
        self.store
            .find(CollectionName::BorrowedBooks, doc! { "user_email": email })
            .await
    }

    pub async fn create(&self, record: Document) -> AppResult<InsertAck> {
        self.store.insert_one(CollectionName::BorrowedBooks, record).await
    }

    pub async fn delete(&self, id: ObjectId) -> AppResult<DeleteAck> {
        self.store
            .delete_one(CollectionName::BorrowedBooks, doc! { "_id": id })
            .await
    }
}
