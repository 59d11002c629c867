use serde_json::Value as JsonValue;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum SurrealError {
    /// Builder reached `execute` without everything the statement needs.
    ///
    /// Raised before any request is sent.
    #[error("incomplete query: {0}")]
    IncompleteQuery(String),
    /// Record identifier with an empty table part.
    #[error("invalid record identifier '{0}'")]
    InvalidIdentifier(String),
    /// Identity field that cannot be sent as an HTTP header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(String),
    /// Network or request execution error from `reqwest`, timeouts included.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status without a statement envelope in the body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
    /// Top-level error object returned instead of statement envelopes.
    #[error("protocol error: {payload}")]
    Protocol {
        /// Raw response payload, kept for diagnostics.
        payload: JsonValue,
    },
    /// Statement rejected by the database (`ERR` envelope).
    #[error("statement error at index {index}: {message}")]
    Statement {
        /// Position of the failing statement in the submitted text.
        index: usize,
        /// Detail message reported by the database.
        message: String,
    },
    /// Response decoding or protocol-shape validation error.
    #[error("decode error: {0}")]
    Decode(String),
}

impl SurrealError {
    /// Returns `true` for network failures and non-success HTTP responses.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http { .. })
    }

    /// Returns `true` when the database rejected an individual statement.
    pub fn is_statement(&self) -> bool {
        matches!(self, Self::Statement { .. })
    }
}
