//! Session token claims

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JWT claims for a session: the caller-supplied payload plus timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub payload: Map<String, Value>,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    /// Email claim, when the payload carries one
    pub fn email(&self) -> Option<&str> {
        self.payload.get("email").and_then(Value::as_str)
    }
}
