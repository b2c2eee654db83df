//! Response envelope helpers.

use crate::error::AppError;
use serde::Serialize;
use serde_json::{json, Value};

/// HAL-style list envelope: records under `_embedded.<name>`, collection URL
/// under `_links.self.href`.
pub fn embedded_list<T: Serialize>(name: &str, rows: &[T], href: &str) -> Result<Value, AppError> {
    let rows = serde_json::to_value(rows).map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(json!({
        "_embedded": { name: rows },
        "_links": { "self": { "href": href } },
    }))
}

/// Body acknowledging a successful delete.
pub fn deleted() -> Value {
    json!({ "data": "deleted" })
}

/// Serialize a borrowed record into an owned response body.
pub fn record_body<T: Serialize>(record: &T) -> Result<Value, AppError> {
    serde_json::to_value(record).map_err(|e| AppError::Internal(e.to_string()))
}
