use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Per-statement envelope as the server sends it.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub time: String,
    pub status: String,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub result: Option<JsonValue>,
}
