use std::fmt;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Configures HTTP timeout behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

/// Connection identity: root credentials plus the namespace/database pair
/// every request is scoped to.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: String,
    pub pass: String,
    pub namespace: String,
    pub database: String,
}

impl Identity {
    pub fn new(
        user: impl Into<String>,
        pass: impl Into<String>,
        namespace: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
            namespace: namespace.into(),
            database: database.into(),
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .field("namespace", &self.namespace)
            .field("database", &self.database)
            .finish()
    }
}
