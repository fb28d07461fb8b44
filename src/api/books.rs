//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::{
    error::AppResult,
    models::{BookFields, InsertAck, UpdateAck},
    AppState,
};

use super::{JsonBody, SessionUser};

/// List every book
#[utoipa::path(
    get,
    path = "/all-books",
    tag = "books",
    responses(
        (status = 200, description = "All books, unpaginated", body = [BookFields])
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<Value>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Get a book by id
///
/// An unknown id answers 200 with an empty body rather than 404.
#[utoipa::path(
    get,
    path = "/all-books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "The book, or an empty body when no book has this id", body = BookFields),
        (status = 400, description = "Malformed id", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let book = state.services.catalog.get_book(&id).await?;
    Ok(match book {
        Some(book) => Json(book).into_response(),
        None => StatusCode::OK.into_response(),
    })
}

/// List books in a category (exact, case-sensitive match)
#[utoipa::path(
    get,
    path = "/all-books/category/{category}",
    tag = "books",
    params(
        ("category" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Books in the category, possibly empty", body = [BookFields])
    )
)]
pub async fn list_books_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Value>>> {
    let books = state.services.catalog.list_books_by_category(&category).await?;
    Ok(Json(books))
}

/// Add a book. The body is stored as submitted.
#[utoipa::path(
    post,
    path = "/all-books",
    tag = "books",
    security(("cookie_auth" = [])),
    request_body = BookFields,
    responses(
        (status = 200, description = "Book inserted", body = InsertAck),
        (status = 400, description = "Body is not a JSON object or fails validation", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
    JsonBody(book): JsonBody<Value>,
) -> AppResult<Json<InsertAck>> {
    tracing::debug!("Book submitted by {:?}", session.email());
    let ack = state.services.catalog.create_book(book).await?;
    Ok(Json(ack))
}

/// Replace a book's fields, creating the book if the id is unknown
///
/// Only the seven book fields are kept, with their values as submitted.
#[utoipa::path(
    put,
    path = "/all-books/{id}",
    tag = "books",
    security(("cookie_auth" = [])),
    params(
        ("id" = String, Path, description = "Book ObjectId (24 hex characters)")
    ),
    request_body = BookFields,
    responses(
        (status = 200, description = "Book updated or upserted", body = UpdateAck),
        (status = 400, description = "Malformed id, body not a JSON object, or invalid fields", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AppResult<Json<UpdateAck>> {
    tracing::debug!("Book {} updated by {:?}", id, session.email());
    let ack = state.services.catalog.update_book(&id, body).await?;
    Ok(Json(ack))
}
