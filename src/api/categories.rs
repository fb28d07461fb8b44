//! Book category endpoints

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use crate::{error::AppResult, AppState};

/// List categories matching the query-string filter
///
/// Each query parameter is an exact match on the field of the same name;
/// no parameters returns every category.
#[utoipa::path(
    get,
    path = "/books-category",
    tag = "categories",
    responses(
        (status = 200, description = "Matching category documents"),
        (status = 400, description = "Filter field starts with '$'", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Value>>> {
    let categories = state.services.catalog.list_categories(params).await?;
    Ok(Json(categories))
}
