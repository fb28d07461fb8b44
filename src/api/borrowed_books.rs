//! Borrowed book endpoints

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;

use crate::{
    error::AppResult,
    models::{DeleteAck, InsertAck},
    AppState,
};

use super::{JsonBody, SessionUser};

/// List borrow records matching the query-string filter
#[utoipa::path(
    get,
    path = "/borrowed-books",
    tag = "borrowed-books",
    security(("cookie_auth" = [])),
    responses(
        (status = 200, description = "Matching borrow records"),
        (status = 400, description = "Filter field starts with '$'", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_borrowed_books(
    State(state): State<AppState>,
    _session: SessionUser,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Value>>> {
    let records = state.services.borrowing.list(params).await?;
    Ok(Json(records))
}

/// List the books borrowed by one user
#[utoipa::path(
    get,
    path = "/borrowed-books/email/{email}",
    tag = "borrowed-books",
    security(("cookie_auth" = [])),
    params(
        ("email" = String, Path, description = "Borrower email, matched exactly")
    ),
    responses(
        (status = 200, description = "Borrow records for the user"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_borrowed_books_by_email(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<Value>>> {
    let records = state.services.borrowing.list_by_email(&email).await?;
    Ok(Json(records))
}

/// Record a borrow (snapshot of the book plus `user_email`)
#[utoipa::path(
    post,
    path = "/borrowed-books",
    tag = "borrowed-books",
    security(("cookie_auth" = [])),
    responses(
        (status = 200, description = "Borrow recorded", body = InsertAck),
        (status = 400, description = "Body is not a JSON object", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
    JsonBody(record): JsonBody<Value>,
) -> AppResult<Json<InsertAck>> {
    tracing::debug!("Borrow submitted by {:?}", session.email());
    let ack = state.services.borrowing.borrow(record).await?;
    Ok(Json(ack))
}

/// Delete a borrow record
#[utoipa::path(
    delete,
    path = "/borrowed-books/{id}",
    tag = "borrowed-books",
    security(("cookie_auth" = [])),
    params(
        ("id" = String, Path, description = "Borrow record ObjectId")
    ),
    responses(
        (status = 200, description = "Deletion result; deletedCount is 0 for unknown ids", body = DeleteAck),
        (status = 400, description = "Malformed id", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    _session: SessionUser,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteAck>> {
    let ack = state.services.borrowing.return_book(&id).await?;
    Ok(Json(ack))
}
