//! Borrowed books service

use std::collections::HashMap;

use serde_json::Value;

use crate::{
    error::AppResult,
    models::{
        document::{self, filter_from_query, parse_object_id},
        DeleteAck, InsertAck,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowingService {
    repository: Repository,
}

impl BorrowingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow records matching the query-string filter
    pub async fn list(&self, params: HashMap<String, String>) -> AppResult<Vec<Value>> {
        let filter = filter_from_query(params)?;
        let records = self.repository.borrowed_books.list(filter).await?;
        Ok(records.into_iter().map(document::to_json).collect())
    }

    pub async fn list_by_email(&self, email: &str) -> AppResult<Vec<Value>> {
        let records = self.repository.borrowed_books.list_by_email(email).await?;
        Ok(records.into_iter().map(document::to_json).collect())
    }

    /// Record a borrow. The body is stored as-is; no duplicate or stock checks.
    pub async fn borrow(&self, record: Value) -> AppResult<InsertAck> {
        let ack = self
            .repository
            .borrowed_books
            .create(document::from_json(record)?)
            .await?;
        tracing::info!("Borrow recorded: {}", ack.inserted_id);
        Ok(ack)
    }

    /// Delete a borrow record. Unknown ids report zero deletions.
    pub async fn return_book(&self, id: &str) -> AppResult<DeleteAck> {
        let id = parse_object_id(id)?;
        let ack = self.repository.borrowed_books.delete(id).await?;
        tracing::info!("Borrow {} returned ({} deleted)", id, ack.deleted_count);
        Ok(ack)
    }
}
