//! Conversion between JSON payloads and BSON documents

use std::collections::HashMap;

use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// Render a stored document as JSON. ObjectIds become plain hex strings,
/// everything else uses relaxed extended JSON.
pub fn to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(document) => to_json(document),
        Bson::Array(values) => Value::Array(values.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Convert a request body into a document, verbatim
pub fn from_json(value: Value) -> AppResult<Document> {
    if !value.is_object() {
        return Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }

    mongodb::bson::to_document(&value)
        .map_err(|e| AppError::BadRequest(format!("Unsupported document value: {}", e)))
}

/// Parse a path identifier into an ObjectId
pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| {
        AppError::InvalidIdentifier(format!(
            "'{}' is not a valid identifier (expected 24 hex characters)",
            id
        ))
    })
}

/// Build an exact-match filter from query-string parameters.
///
/// Keys starting with `$` are rejected so callers cannot smuggle query
/// operators such as `$where` into the filter.
pub fn filter_from_query(params: HashMap<String, String>) -> AppResult<Document> {
    let mut filter = Document::new();
    for (key, value) in params {
        if key.is_empty() || key.starts_with('$') {
            return Err(AppError::BadRequest(format!(
                "Unsupported filter field '{}'",
                key
            )));
        }
        filter.insert(key, value);
    }
    Ok(filter)
}
