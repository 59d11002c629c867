//! Fluent query builder.
//!
//! Each query kind walks a fixed sequence of handle types, so clauses can
//! only be attached where they make sense:
//!
//! - `select(..)` returns a [`SelectStart`], which only offers `from(..)`;
//! - `from(..)` returns a [`SelectQuery`] with filter, grouping, ordering and
//!   paging clauses;
//! - `update`, `modify`, `set` and `delete` bind their target immediately and
//!   return a [`WriteQuery`] with filter and return clauses.
//!
//! Clauses are stored structurally and rendered once, by `build` or
//! `execute`. Filters are conjoined with `AND` in call order; every other
//! clause keeps only its latest value.

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    value::{literal, to_json},
    CompareOperator, JsonValue, Order, RecordId, Result, Return, SetOperator, SurrealClient,
    SurrealError,
};

/// Entry point for fluent queries, bound to a client.
///
/// Created by [`SurrealClient::query_builder`]. Queries run with whatever
/// identity the client holds when `execute` is called.
#[derive(Clone, Copy, Debug)]
pub struct QueryBuilder<'a> {
    client: &'a SurrealClient,
}

impl<'a> QueryBuilder<'a> {
    pub(crate) fn new(client: &'a SurrealClient) -> Self {
        Self { client }
    }

    /// Starts a `SELECT` over the given fields.
    pub fn select<I, S>(&self, fields: I) -> SelectStart<'a>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectStart {
            client: self.client,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Starts a `SELECT *`.
    pub fn select_all(&self) -> SelectStart<'a> {
        self.select(["*"])
    }

    /// `UPDATE <id> CONTENT <json>`: replaces the whole record.
    pub fn update<D: Serialize + ?Sized>(&self, identifier: &str, data: &D) -> WriteQuery<'a> {
        self.write(identifier, WriteAction::Content(encode_payload(data)))
    }

    /// `UPDATE <id> MERGE <json>`: shallow-merges the given fields into the record.
    pub fn modify<D: Serialize + ?Sized>(&self, identifier: &str, data: &D) -> WriteQuery<'a> {
        self.write(identifier, WriteAction::Merge(encode_payload(data)))
    }

    /// `UPDATE <id> SET f1 op1 v1, ...`, assignments rendered in iteration order.
    pub fn set<I, K, V>(&self, identifier: &str, setters: I) -> WriteQuery<'a>
    where
        I: IntoIterator<Item = (K, SetOperator, V)>,
        K: Into<String>,
        V: Into<JsonValue>,
    {
        let setters = setters
            .into_iter()
            .map(|(field, op, value)| Setter {
                field: field.into(),
                op,
                value: value.into(),
            })
            .collect();
        self.write(identifier, WriteAction::Set(setters))
    }

    /// `DELETE <id>`.
    pub fn delete(&self, identifier: &str) -> WriteQuery<'a> {
        self.write(identifier, WriteAction::Delete)
    }

    fn write(&self, identifier: &str, action: WriteAction) -> WriteQuery<'a> {
        WriteQuery {
            client: self.client,
            target: identifier.to_owned(),
            action,
            clauses: Clauses::default(),
        }
    }
}

/// `SELECT` with its projection chosen; needs a target before anything else.
#[derive(Debug)]
#[must_use = "a select needs `from` before it can run"]
pub struct SelectStart<'a> {
    client: &'a SurrealClient,
    fields: Vec<String>,
}

impl<'a> SelectStart<'a> {
    /// Binds the tables or records to read from.
    pub fn from<I, S>(self, targets: I) -> SelectQuery<'a>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectQuery {
            client: self.client,
            fields: self.fields,
            targets: targets.into_iter().map(Into::into).collect(),
            clauses: Clauses::default(),
        }
    }
}

/// Targeted `SELECT`, ready for refinement and execution.
#[derive(Debug)]
#[must_use = "queries do nothing until `execute` is awaited"]
pub struct SelectQuery<'a> {
    client: &'a SurrealClient,
    fields: Vec<String>,
    targets: Vec<String>,
    clauses: Clauses,
}

impl<'a> SelectQuery<'a> {
    /// Adds `field op value`; repeated calls are joined with `AND`.
    #[doc(alias = "where")]
    pub fn filter(
        mut self,
        field: impl Into<String>,
        op: CompareOperator,
        value: impl Into<JsonValue>,
    ) -> Self {
        self.clauses.filter(field.into(), op, value.into());
        self
    }

    /// Sets `GROUP BY`. An empty list clears the clause.
    pub fn group_by<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.clauses.group_by = (!fields.is_empty()).then_some(fields);
        self
    }

    /// Sets `ORDER BY`. `Order::default()` is ascending.
    pub fn order_by(mut self, field: impl Into<String>, order: Order) -> Self {
        self.clauses.order_by = Some((field.into(), order));
        self
    }

    /// Sets `LIMIT`; `n <= 0` clears the clause.
    pub fn limit(mut self, n: i64) -> Self {
        self.clauses.limit = u64::try_from(n).ok().filter(|n| *n > 0);
        self
    }

    /// Sets `START`; `n < 0` clears the clause.
    pub fn start(mut self, n: i64) -> Self {
        self.clauses.start = u64::try_from(n).ok();
        self
    }

    /// Renders the statement text without sending it.
    pub fn build(&self) -> Result<String> {
        if self.fields.is_empty() {
            return Err(SurrealError::IncompleteQuery(
                "select requires at least one field".to_owned(),
            ));
        }
        if self.targets.is_empty() {
            return Err(SurrealError::IncompleteQuery(
                "select requires at least one FROM target".to_owned(),
            ));
        }

        self.clauses.validate()?;

        let mut sql = format!(
            "SELECT {} FROM {}",
            self.fields.join(", "),
            self.targets.join(", ")
        );
        self.clauses.render_filter(&mut sql);
        if let Some(fields) = &self.clauses.group_by {
            sql.push_str(&format!(" GROUP BY {}", fields.join(", ")));
        }
        if let Some((field, order)) = &self.clauses.order_by {
            sql.push_str(&format!(" ORDER BY {field} {order}"));
        }
        if let Some(limit) = self.clauses.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(start) = self.clauses.start {
            sql.push_str(&format!(" START {start}"));
        }
        Ok(sql)
    }

    /// Sends the statement and returns its records.
    pub async fn execute<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let sql = self.build()?;
        self.client.execute_single(&sql).await
    }
}

/// Targeted write statement (`UPDATE` or `DELETE`).
#[derive(Debug)]
#[must_use = "queries do nothing until `execute` is awaited"]
pub struct WriteQuery<'a> {
    client: &'a SurrealClient,
    target: String,
    action: WriteAction,
    clauses: Clauses,
}

impl<'a> WriteQuery<'a> {
    /// Scopes the write with `field op value`; repeated calls are joined with `AND`.
    #[doc(alias = "where")]
    pub fn filter(
        mut self,
        field: impl Into<String>,
        op: CompareOperator,
        value: impl Into<JsonValue>,
    ) -> Self {
        self.clauses.filter(field.into(), op, value.into());
        self
    }

    /// Sets the `RETURN` clause; the latest call wins.
    #[doc(alias = "return")]
    pub fn returning(mut self, mode: Return) -> Self {
        self.clauses.returning = Some(mode);
        self
    }

    /// Renders the statement text without sending it.
    pub fn build(&self) -> Result<String> {
        if self.target.trim().is_empty() {
            return Err(SurrealError::IncompleteQuery(
                "write requires a target identifier".to_owned(),
            ));
        }
        let target = RecordId::parse(&self.target)?;
        self.clauses.validate()?;

        let mut sql = match &self.action {
            WriteAction::Content(payload) => {
                format!("UPDATE {target} CONTENT {}", payload_literal(payload)?)
            }
            WriteAction::Merge(payload) => {
                format!("UPDATE {target} MERGE {}", payload_literal(payload)?)
            }
            WriteAction::Set(setters) => {
                if setters.is_empty() {
                    return Err(SurrealError::IncompleteQuery(
                        "set requires at least one assignment".to_owned(),
                    ));
                }
                let assignments = setters
                    .iter()
                    .map(|setter| {
                        format!("{} {} {}", setter.field, setter.op, literal(&setter.value))
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("UPDATE {target} SET {assignments}")
            }
            WriteAction::Delete => format!("DELETE {target}"),
        };
        self.clauses.render_filter(&mut sql);
        if let Some(mode) = &self.clauses.returning {
            sql.push_str(&format!(" RETURN {mode}"));
        }
        Ok(sql)
    }

    /// Sends the statement and returns the records it reports.
    pub async fn execute<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let sql = self.build()?;
        self.client.execute_single(&sql).await
    }
}

/// Payload serialized at construction; encoding failures surface at `build`.
type Payload = std::result::Result<JsonValue, String>;

fn encode_payload<D: Serialize + ?Sized>(data: &D) -> Payload {
    to_json(data).map_err(|err| err.to_string())
}

fn payload_literal(payload: &Payload) -> Result<String> {
    payload
        .as_ref()
        .map(literal)
        .map_err(|message| SurrealError::Decode(message.clone()))
}

#[derive(Debug)]
enum WriteAction {
    Content(Payload),
    Merge(Payload),
    Set(Vec<Setter>),
    Delete,
}

#[derive(Debug)]
struct Setter {
    field: String,
    op: SetOperator,
    value: JsonValue,
}

#[derive(Debug)]
struct Predicate {
    field: String,
    op: CompareOperator,
    value: JsonValue,
}

#[derive(Debug, Default)]
struct Clauses {
    filters: Vec<Predicate>,
    group_by: Option<Vec<String>>,
    order_by: Option<(String, Order)>,
    limit: Option<u64>,
    start: Option<u64>,
    returning: Option<Return>,
}

impl Clauses {
    fn filter(&mut self, field: String, op: CompareOperator, value: JsonValue) {
        self.filters.push(Predicate { field, op, value });
    }

    /// Rejects clauses that would render without a field name.
    fn validate(&self) -> Result<()> {
        if self.filters.iter().any(|p| p.field.trim().is_empty()) {
            return Err(SurrealError::IncompleteQuery(
                "filter requires a field name".to_owned(),
            ));
        }
        if let Some((field, _)) = &self.order_by {
            if field.trim().is_empty() {
                return Err(SurrealError::IncompleteQuery(
                    "order by requires a field name".to_owned(),
                ));
            }
        }
        if let Some(Return::Fields(fields)) = &self.returning {
            if fields.is_empty() || fields.iter().any(|f| f.trim().is_empty()) {
                return Err(SurrealError::IncompleteQuery(
                    "return requires at least one field".to_owned(),
                ));
            }
        }
        Ok(())
    }

    fn render_filter(&self, sql: &mut String) {
        if self.filters.is_empty() {
            return;
        }
        let predicates = self
            .filters
            .iter()
            .map(|p| format!("{} {} {}", p.field, p.op, literal(&p.value)))
            .collect::<Vec<_>>()
            .join(" AND ");
        sql.push_str(" WHERE ");
        sql.push_str(&predicates);
    }
}
