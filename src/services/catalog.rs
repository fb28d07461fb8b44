//! Catalog service: books and book categories

use std::collections::HashMap;

use serde_json::Value;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        document::{self, filter_from_query, parse_object_id},
        BookFields, InsertAck, UpdateAck,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    validate_books: bool,
}

impl CatalogService {
    pub fn new(repository: Repository, validate_books: bool) -> Self {
        Self {
            repository,
            validate_books,
        }
    }

    pub async fn list_books(&self) -> AppResult<Vec<Value>> {
        let books = self.repository.books.list().await?;
        Ok(books.into_iter().map(document::to_json).collect())
    }

    /// Get a book by id. A well-formed id that matches nothing yields `None`.
    pub async fn get_book(&self, id: &str) -> AppResult<Option<Value>> {
        let id = parse_object_id(id)?;
        let book = self.repository.books.get_by_id(id).await?;
        Ok(book.map(document::to_json))
    }

    pub async fn list_books_by_category(&self, category: &str) -> AppResult<Vec<Value>> {
        let books = self.repository.books.list_by_category(category).await?;
        tracing::debug!("Category '{}' has {} books", category, books.len());
        Ok(books.into_iter().map(document::to_json).collect())
    }

    /// Insert a book document as submitted
    pub async fn create_book(&self, book: Value) -> AppResult<InsertAck> {
        if self.validate_books {
            let fields: BookFields = serde_json::from_value(book.clone())
                .map_err(|e| AppError::BadRequest(format!("Invalid book: {}", e)))?;
            fields.validate()?;
        }

        let ack = self.repository.books.create(document::from_json(book)?).await?;
        tracing::info!("Book created: {}", ack.inserted_id);
        Ok(ack)
    }

    /// Overwrite the named fields of a book, creating it if the id is unknown.
    /// Values are stored as submitted, so anything GET returned can be sent back.
    pub async fn update_book(&self, id: &str, body: Value) -> AppResult<UpdateAck> {
        let id = parse_object_id(id)?;
        let fields = BookFields::project(&body)?;
        if self.validate_books {
            let typed: BookFields = serde_json::from_value(Value::Object(fields.clone()))
                .map_err(|e| AppError::BadRequest(format!("Invalid book: {}", e)))?;
            typed.validate()?;
        }

        let fields = document::from_json(Value::Object(fields))?;
        let ack = self.repository.books.upsert(id, fields).await?;
        if ack.upserted_count > 0 {
            tracing::info!("Book {} did not exist and was created by update", id);
        } else {
            tracing::info!("Book {} updated", id);
        }
        Ok(ack)
    }

    pub async fn list_categories(&self, params: HashMap<String, String>) -> AppResult<Vec<Value>> {
        let filter = filter_from_query(params)?;
        let categories = self.repository.categories.list(filter).await?;
        Ok(categories.into_iter().map(document::to_json).collect())
    }
}
