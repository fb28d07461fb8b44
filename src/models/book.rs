//! Book model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Keys a book update writes, in storage order
pub const BOOK_FIELD_NAMES: [&str; 7] = [
    "book_name",
    "book_quantity",
    "author_name",
    "category",
    "rating",
    "description",
    "photo",
];

/// The seven named book fields, as documented and validated.
///
/// Updates are stored from [`BookFields::project`] rather than through this
/// type, so values keep whatever JSON type the client sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct BookFields {
    #[validate(
        required(message = "Book name is required"),
        length(min = 1, message = "Book name must not be empty")
    )]
    pub book_name: Option<String>,
    #[validate(
        required(message = "Quantity is required"),
        range(min = 0, message = "Quantity cannot be negative")
    )]
    pub book_quantity: Option<i64>,
    #[validate(
        required(message = "Author name is required"),
        length(min = 1, message = "Author name must not be empty")
    )]
    pub author_name: Option<String>,
    /// Free-form category name, not checked against the category collection
    #[validate(
        required(message = "Category is required"),
        length(min = 1, message = "Category must not be empty")
    )]
    pub category: Option<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    pub description: Option<String>,
    /// Cover image URI
    pub photo: Option<String>,
}

impl BookFields {
    /// Keep only the named fields of a request body, values untouched.
    /// Absent fields become null; anything else in the body is dropped.
    pub fn project(body: &Value) -> AppResult<Map<String, Value>> {
        let object = body.as_object().ok_or_else(|| {
            AppError::BadRequest("Request body must be a JSON object".to_string())
        })?;

        Ok(BOOK_FIELD_NAMES
            .iter()
            .map(|name| {
                let value = object.get(*name).cloned().unwrap_or(Value::Null);
                (name.to_string(), value)
            })
            .collect())
    }
}
