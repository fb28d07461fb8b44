//! Write acknowledgments, shaped like the MongoDB driver results

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Result of an insert-one
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    /// Identifier of the new document
    #[schema(value_type = String)]
    pub inserted_id: Value,
}

/// Result of an update-one with upsert
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    /// Identifier of the upserted document, null when an existing one matched
    #[schema(value_type = Option<String>)]
    pub upserted_id: Option<Value>,
}

/// Result of a delete-one
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl InsertAck {
    pub fn new(inserted_id: Value) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

impl UpdateAck {
    pub fn new(matched_count: u64, modified_count: u64, upserted_id: Option<Value>) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}
