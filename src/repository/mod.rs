//! Repository layer for collection store operations

pub mod books;
pub mod borrowed_books;
pub mod categories;
pub mod mongo;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::Document;

use crate::{
    error::AppResult,
    models::{DeleteAck, InsertAck, UpdateAck},
};

/// Collections held by the catalog database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Books,
    BookCategories,
    BorrowedBooks,
}

impl CollectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Books => "books",
            CollectionName::BookCategories => "bookCategories",
            CollectionName::BorrowedBooks => "borrowedBooks",
        }
    }
}

impl std::fmt::Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Document store backing the catalog.
///
/// Filters are exact-match documents. Implementations must tolerate
/// concurrent calls from many requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn find(&self, collection: CollectionName, filter: Document) -> AppResult<Vec<Document>>;

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> AppResult<Option<Document>>;

    async fn insert_one(&self, collection: CollectionName, document: Document) -> AppResult<InsertAck>;

    /// Replace the content of the first match with `fields`, keeping its
    /// `_id`. When nothing matches, a new document is created from the
    /// filter's `_id` and `fields`.
    async fn upsert_one(
        &self,
        collection: CollectionName,
        filter: Document,
        fields: Document,
    ) -> AppResult<UpdateAck>;

    async fn delete_one(&self, collection: CollectionName, filter: Document) -> AppResult<DeleteAck>;

    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the shared store handle
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn CollectionStore>,
    pub books: books::BooksRepository,
    pub categories: categories::CategoriesRepository,
    pub borrowed_books: borrowed_books::BorrowedBooksRepository,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self {
            books: books::BooksRepository::new(store.clone()),
            categories: categories::CategoriesRepository::new(store.clone()),
            borrowed_books: borrowed_books::BorrowedBooksRepository::new(store.clone()),
            store,
        }
    }

    /// Round-trip to the store
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
