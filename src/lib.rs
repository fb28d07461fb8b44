//! Library catalog server
//!
//! REST JSON API over a MongoDB catalog: books, book categories and
//! borrowed-book records, with stateless JWT sessions carried in a cookie.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
