use std::fmt;
use std::str::FromStr;

use crate::SurrealError;

/// Identifier of a table (`person`) or of a single record (`person:tobie`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordId {
    table: String,
    key: Option<String>,
}

impl RecordId {
    /// Parses `table[:key]`, splitting on the first `:` only.
    ///
    /// Surrounding whitespace is dropped from both parts; an empty key
    /// (`person:`) addresses the whole table.
    pub fn parse(identifier: &str) -> Result<Self, SurrealError> {
        let (table, key) = match identifier.split_once(':') {
            Some((table, key)) => (table.trim(), Some(key.trim())),
            None => (identifier.trim(), None),
        };
        if table.is_empty() {
            return Err(SurrealError::InvalidIdentifier(identifier.to_owned()));
        }
        Ok(Self {
            table: table.to_owned(),
            key: key.filter(|key| !key.is_empty()).map(str::to_owned),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// `true` when the identifier names the whole table.
    pub fn is_table(&self) -> bool {
        self.key.is_none()
    }

    /// Derives the REST resource URL: `<base>/key/<table>[/<key>]`.
    pub fn resource_url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match &self.key {
            Some(key) => format!("{base}/key/{}/{key}", self.table),
            None => format!("{base}/key/{}", self.table),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{}:{key}", self.table),
            None => f.write_str(&self.table),
        }
    }
}

impl FromStr for RecordId {
    type Err = SurrealError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
