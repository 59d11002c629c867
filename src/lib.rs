//! `surreal-http` is an async HTTP client for SurrealDB.
//!
//! Statements go to the `/sql` endpoint, either as raw text or through the
//! fluent [`QueryBuilder`]:
//! - [`SurrealClient::execute_statements`]
//! - [`SurrealClient::execute_single`]
//! - [`SurrealClient::query_builder`]
//!
//! Per-record shortcuts ([`SurrealClient::get`], [`SurrealClient::create`],
//! [`SurrealClient::replace`], [`SurrealClient::merge_update`],
//! [`SurrealClient::delete`]) use the REST-style `/key` endpoint.
//!
//! ```no_run
//! use surreal_http::{CompareOperator, Identity, JsonValue, Order, SurrealClient};
//!
//! # async fn run() -> surreal_http::Result<()> {
//! let db = SurrealClient::new(
//!     "http://127.0.0.1:8000",
//!     Identity::new("root", "root", "test", "test"),
//! )?;
//!
//! let adults: Vec<JsonValue> = db
//!     .query_builder()
//!     .select(["name", "age"])
//!     .from(["person"])
//!     .filter("age", CompareOperator::Ge, 18)
//!     .order_by("age", Order::Desc)
//!     .limit(10)
//!     .execute()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod builder;
mod client;
mod decode;
mod error;
mod options;
mod record_id;
mod types;
mod value;
mod wire;

#[cfg(feature = "raw-mode")]
pub mod raw;

pub use builder::{QueryBuilder, SelectQuery, SelectStart, WriteQuery};
pub use client::SurrealClient;
pub use error::SurrealError;
pub use options::{ClientOptions, Identity, DEFAULT_BASE_URL};
pub use record_id::RecordId;
pub use types::{CompareOperator, Order, Return, SetOperator, StatementOutcome};
pub use value::{literal, JsonValue};

pub type Result<T> = std::result::Result<T, SurrealError>;
