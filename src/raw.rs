//! Raw response passthrough.
//!
//! Enabled with the `raw-mode` feature.

use reqwest::Method;

use crate::{JsonValue, Result, SurrealClient, SurrealError};

/// Unnormalized reply to a statement submission.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: JsonValue,
}

impl SurrealClient {
    /// Sends statement text and returns the HTTP status and JSON body as-is.
    ///
    /// No envelope unwrapping happens here; a non-success status is not an
    /// error as long as the body is JSON.
    pub async fn execute_raw(&self, sql: &str) -> Result<RawResponse> {
        let url = format!("{}/sql", self.base_url());
        let (status, body) = self.send_raw(Method::POST, &url, Some(sql.to_owned())).await?;
        let body = serde_json::from_str(&body).map_err(|err| {
            SurrealError::Decode(format!("invalid response JSON: {err}; body: {body}"))
        })?;
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
