use serde::Serialize;

use crate::{Result, SurrealError};

/// JSON value used for every query payload and returned record.
pub use serde_json::Value as JsonValue;

/// Renders a value as a literal that can be embedded in query text.
///
/// Strings are double-quoted with JSON escaping, which SurrealQL accepts as
/// string-literal syntax; numbers and booleans use their canonical form;
/// arrays and objects are written as compact JSON.
pub fn literal(value: &JsonValue) -> String {
    value.to_string()
}

/// Serializes a caller payload into a [`JsonValue`].
pub(crate) fn to_json<D: Serialize + ?Sized>(data: &D) -> Result<JsonValue> {
    serde_json::to_value(data)
        .map_err(|err| SurrealError::Decode(format!("payload is not valid JSON: {err}")))
}
