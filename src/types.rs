use std::fmt;

use serde::de::DeserializeOwned;

use crate::{JsonValue, Result, SurrealError};

/// Comparison operators accepted by `where` clauses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOperator {
    Eq,
    ExactEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    /// `~` fuzzy match.
    Match,
    /// `!~` fuzzy non-match.
    NotMatch,
    /// `?~` any fuzzy match.
    AnyMatch,
    /// `*~` all fuzzy match.
    AllMatch,
    Contains,
    ContainsNot,
    ContainsAll,
    ContainsAny,
    ContainsNone,
    Inside,
    NotInside,
    AllInside,
    AnyInside,
    NoneInside,
    Outside,
    Intersects,
}

impl CompareOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::ExactEq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Match => "~",
            Self::NotMatch => "!~",
            Self::AnyMatch => "?~",
            Self::AllMatch => "*~",
            Self::Contains => "CONTAINS",
            Self::ContainsNot => "CONTAINSNOT",
            Self::ContainsAll => "CONTAINSALL",
            Self::ContainsAny => "CONTAINSANY",
            Self::ContainsNone => "CONTAINSNONE",
            Self::Inside => "INSIDE",
            Self::NotInside => "NOTINSIDE",
            Self::AllInside => "ALLINSIDE",
            Self::AnyInside => "ANYINSIDE",
            Self::NoneInside => "NONEINSIDE",
            Self::Outside => "OUTSIDE",
            Self::Intersects => "INTERSECTS",
        }
    }
}

impl fmt::Display for CompareOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assignment operators used by `SET` statements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SetOperator {
    Assign,
    Increment,
    Decrement,
}

impl SetOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Increment => "+=",
            Self::Decrement => "-=",
        }
    }
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction for `ORDER BY`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a write statement returns.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Return {
    None,
    Before,
    After,
    Diff,
    /// Explicit projection, rendered as `RETURN f1, f2`.
    Fields(Vec<String>),
}

impl Return {
    /// Builds [`Return::Fields`] from any list of field names.
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields(fields.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Return {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("NONE"),
            Self::Before => f.write_str("BEFORE"),
            Self::After => f.write_str("AFTER"),
            Self::Diff => f.write_str("DIFF"),
            Self::Fields(fields) => f.write_str(&fields.join(", ")),
        }
    }
}

/// Outcome of one submitted statement, in submission order.
#[derive(Clone, Debug, PartialEq)]
pub enum StatementOutcome {
    Ok {
        /// Server-reported elapsed time, passed through untouched.
        time: String,
        records: Vec<JsonValue>,
    },
    Err {
        /// Position of the statement in the submitted text.
        index: usize,
        time: String,
        message: String,
    },
}

impl StatementOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    pub fn time(&self) -> &str {
        match self {
            Self::Ok { time, .. } | Self::Err { time, .. } => time,
        }
    }

    /// Unwraps the records, deserialized into `T`.
    ///
    /// An `Err` outcome becomes [`SurrealError::Statement`].
    pub fn into_records<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        match self {
            Self::Ok { records, .. } => records
                .into_iter()
                .map(|record| {
                    serde_json::from_value(record).map_err(|err| {
                        SurrealError::Decode(format!("record does not match target type: {err}"))
                    })
                })
                .collect(),
            Self::Err { index, message, .. } => Err(SurrealError::Statement { index, message }),
        }
    }
}
