use std::fmt;
use std::time::Duration;

use reqwest::{header::HeaderMap, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    auth::build_headers,
    decode::{decode_outcomes, is_envelope_sequence, single_outcome},
    value::to_json,
    ClientOptions, Identity, JsonValue, QueryBuilder, RecordId, Result, StatementOutcome,
    SurrealError, DEFAULT_BASE_URL,
};

#[derive(Clone)]
/// HTTP client for the SurrealDB `/sql` and `/key` endpoints.
pub struct SurrealClient {
    http: reqwest::Client,
    base_url: String,
    identity: Identity,
    headers: HeaderMap,
    options: ClientOptions,
}

impl fmt::Debug for SurrealClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurrealClient")
            .field("base_url", &self.base_url)
            .field("identity", &self.identity)
            .field("options", &self.options)
            .finish()
    }
}

impl SurrealClient {
    /// Creates a client for an already-normalized base URL such as
    /// `http://127.0.0.1:8000`. A trailing `/` is ignored.
    ///
    /// Fails only when an identity field cannot be carried in a header.
    pub fn new(base_url: impl Into<String>, identity: Identity) -> Result<Self> {
        let headers = build_headers(&identity)?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            identity,
            headers,
            options: ClientOptions::default(),
        })
    }

    /// Creates a client from environment variables.
    ///
    /// Reads:
    /// - `SURREAL_URL` — base URL, defaults to [`DEFAULT_BASE_URL`]
    /// - `SURREAL_USER`, `SURREAL_PASS` — credentials
    /// - `SURREAL_NS`, `SURREAL_DB` — namespace and database
    ///
    /// **Not available on `wasm32` targets.**
    ///
    /// # Example
    ///
    /// ```no_run
    /// use surreal_http::SurrealClient;
    ///
    /// let db = SurrealClient::from_env().expect("missing SURREAL_* env vars");
    /// ```
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> std::result::Result<Self, String> {
        let url = std::env::var("SURREAL_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let identity = Identity::new(
            required_env("SURREAL_USER")?,
            required_env("SURREAL_PASS")?,
            required_env("SURREAL_NS")?,
            required_env("SURREAL_DB")?,
        );
        Self::new(url, identity).map_err(|err| err.to_string())
    }

    /// Applies client options such as the request timeout.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Replaces the credentials used for subsequent requests.
    ///
    /// On error the previous identity stays in place.
    pub fn reauthenticate(
        &mut self,
        user: impl Into<String>,
        pass: impl Into<String>,
    ) -> Result<()> {
        let identity = Identity {
            user: user.into(),
            pass: pass.into(),
            ..self.identity.clone()
        };
        self.set_identity(identity)
    }

    /// Points subsequent requests at another namespace/database.
    ///
    /// On error the previous identity stays in place.
    pub fn switch_context(
        &mut self,
        namespace: impl Into<String>,
        database: impl Into<String>,
    ) -> Result<()> {
        let identity = Identity {
            namespace: namespace.into(),
            database: database.into(),
            ..self.identity.clone()
        };
        self.set_identity(identity)
    }

    /// Returns a fluent query builder that executes through this client.
    pub fn query_builder(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(self)
    }

    /// Sends statement text in one request and returns one outcome per
    /// statement, in submission order.
    ///
    /// Statement-level errors come back as [`StatementOutcome::Err`] instead
    /// of failing the whole call.
    pub async fn execute_statements(&self, sql: &str) -> Result<Vec<StatementOutcome>> {
        let raw = self
            .send(Method::POST, &self.sql_url(), Some(sql.to_owned()))
            .await?;
        decode_outcomes(raw)
    }

    /// Sends exactly one statement and returns its records.
    pub async fn execute_single<T: DeserializeOwned>(&self, sql: &str) -> Result<Vec<T>> {
        let outcomes = self.execute_statements(sql).await?;
        single_outcome(outcomes)?.into_records()
    }

    /// Reads one record, or every record of a table for a bare table name.
    pub async fn get<T: DeserializeOwned>(&self, identifier: &str) -> Result<Vec<T>> {
        self.send_key(Method::GET, identifier, None).await
    }

    /// Creates a record and returns it.
    pub async fn create<T, D>(&self, identifier: &str, data: &D) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let body = to_json(data)?.to_string();
        self.send_key(Method::POST, identifier, Some(body))
            .await
            .map(first_record)
    }

    /// Replaces a record's whole content and returns the new record.
    pub async fn replace<T, D>(&self, identifier: &str, data: &D) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let body = to_json(data)?.to_string();
        self.send_key(Method::PUT, identifier, Some(body))
            .await
            .map(first_record)
    }

    /// Merges the given fields into a record and returns the new record.
    pub async fn merge_update<T, D>(&self, identifier: &str, data: &D) -> Result<Option<T>>
    where
        T: DeserializeOwned,
        D: Serialize + ?Sized,
    {
        let body = to_json(data)?.to_string();
        self.send_key(Method::PATCH, identifier, Some(body))
            .await
            .map(first_record)
    }

    /// Deletes a record, or every record of a table for a bare table name.
    pub async fn delete(&self, identifier: &str) -> Result<()> {
        self.send_key::<JsonValue>(Method::DELETE, identifier, None)
            .await
            .map(|_| ())
    }

    fn set_identity(&mut self, identity: Identity) -> Result<()> {
        self.headers = build_headers(&identity)?;
        self.identity = identity;
        Ok(())
    }

    fn sql_url(&self) -> String {
        format!("{}/sql", self.base_url)
    }

    async fn send_key<T: DeserializeOwned>(
        &self,
        method: Method,
        identifier: &str,
        body: Option<String>,
    ) -> Result<Vec<T>> {
        let url = RecordId::parse(identifier)?.resource_url(&self.base_url);
        let raw = self.send(method, &url, body).await?;
        single_outcome(decode_outcomes(raw)?)?.into_records()
    }

    async fn send(&self, method: Method, url: &str, body: Option<String>) -> Result<JsonValue> {
        let (status, body) = self.send_raw(method, url, body).await?;

        if !status.is_success() {
            // Statement envelopes may still arrive with a failure status.
            return match serde_json::from_str::<JsonValue>(&body) {
                Ok(raw) if is_envelope_sequence(&raw) => Ok(raw),
                _ => Err(SurrealError::Http {
                    status: status.as_u16(),
                    body,
                }),
            };
        }

        serde_json::from_str::<JsonValue>(&body).map_err(|err| {
            SurrealError::Decode(format!("invalid response JSON: {err}; body: {body}"))
        })
    }

    /// Performs one HTTP exchange and returns the status with the body text.
    pub(crate) async fn send_raw(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> Result<(StatusCode, String)> {
        #[cfg(feature = "tracing")]
        tracing::debug!(method = method.as_str(), url, "sending request");

        let mut request = self
            .http
            .request(method, url)
            .headers(self.headers.clone())
            .timeout(Duration::from_millis(self.options.timeout_ms));
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(SurrealError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(SurrealError::Transport)?;
        Ok((status, body))
    }
}

fn first_record<T>(records: Vec<T>) -> Option<T> {
    records.into_iter().next()
}

#[cfg(not(target_arch = "wasm32"))]
fn required_env(name: &str) -> std::result::Result<String, String> {
    let value =
        std::env::var(name).map_err(|_| format!("missing {name} environment variable"))?;
    if value.trim().is_empty() {
        return Err(format!("{name} is set but empty"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;

    use crate::{auth, Identity, SurrealClient, SurrealError};

    fn client() -> SurrealClient {
        SurrealClient::new(
            "http://127.0.0.1:8000/",
            Identity::new("root", "secret-pass", "test", "test"),
        )
        .expect("must build client")
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let db = client();
        assert_eq!(db.base_url(), "http://127.0.0.1:8000");
        assert_eq!(db.sql_url(), "http://127.0.0.1:8000/sql");
    }

    #[test]
    fn debug_redacts_password() {
        let debug = format!("{:?}", client());
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-pass"));
    }

    #[test]
    fn reauthenticate_rebuilds_headers() {
        let mut db = client();
        db.reauthenticate("admin", "pw").expect("must switch");
        assert_eq!(db.identity().user, "admin");
        assert_eq!(
            db.headers[AUTHORIZATION],
            auth::basic_authorization("admin", "pw").as_str()
        );
    }

    #[test]
    fn switch_context_rebuilds_headers() {
        let mut db = client();
        db.switch_context("prod", "shop").expect("must switch");
        assert_eq!(db.headers["ns"], "prod");
        assert_eq!(db.headers["db"], "shop");
        assert_eq!(db.identity().user, "root");
    }

    #[test]
    fn failed_switch_keeps_previous_identity() {
        let mut db = client();
        let err = db.switch_context("bad\r\n", "shop").expect_err("must fail");
        assert!(matches!(err, SurrealError::InvalidHeader(_)));
        assert_eq!(db.identity().namespace, "test");
        assert_eq!(db.headers["ns"], "test");
    }
}
