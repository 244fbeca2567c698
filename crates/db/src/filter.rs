//! Dynamic WHERE-clause composition for soft-deletable tables.
//!
//! Every read of `todos` and `sprints` goes through [`LiveFilter`], whose
//! base clause is `is_deleted = false`. Optional criteria append further
//! conjuncts; their values are collected as [`BindValue`]s and bound
//! positionally (`$1`, `$2`, ...) so user input never reaches the SQL text.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;
use tasktrack_core::types::DbId;

/// Visibility predicate for soft-deletable rows.
pub const NOT_DELETED: &str = "is_deleted = false";

/// Typed bind value for a dynamically built query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    BigInt(i64),
    Bool(bool),
    Text(String),
}

/// Accumulates `(clause, value)` pairs on top of the live-row predicate.
///
/// Column names are `&'static str` so only compile-time identifiers can
/// appear in the generated SQL.
#[derive(Debug, Clone)]
pub struct LiveFilter {
    conditions: Vec<String>,
    values: Vec<BindValue>,
}

impl Default for LiveFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveFilter {
    pub fn new() -> Self {
        Self {
            conditions: vec![NOT_DELETED.to_string()],
            values: Vec::new(),
        }
    }

    fn push(&mut self, column: &'static str, op: &str, value: BindValue) {
        let idx = self.values.len() + 1;
        self.conditions.push(format!("{column} {op} ${idx}"));
        self.values.push(value);
    }

    /// Case-insensitive substring match (`column ILIKE '%value%'`).
    ///
    /// LIKE metacharacters in `value` are escaped, so `50%` matches the
    /// literal text rather than acting as a wildcard.
    pub fn contains(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(text) = value {
            let pattern = format!("%{}%", escape_like(text));
            self.push(column, "ILIKE", BindValue::Text(pattern));
        }
        self
    }

    /// Exact boolean equality.
    pub fn equals_bool(mut self, column: &'static str, value: Option<bool>) -> Self {
        if let Some(v) = value {
            self.push(column, "=", BindValue::Bool(v));
        }
        self
    }

    /// Exact identity equality.
    pub fn equals_id(mut self, column: &'static str, value: Option<DbId>) -> Self {
        if let Some(v) = value {
            self.push(column, "=", BindValue::BigInt(v));
        }
        self
    }

    /// The assembled `WHERE ...` clause. Never empty.
    pub fn where_clause(&self) -> String {
        format!("WHERE {}", self.conditions.join(" AND "))
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }

    /// Bind the collected values, in placeholder order, onto a `query_as`.
    pub fn bind<'q, O>(
        &'q self,
        mut q: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for val in &self.values {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Bool(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
            };
        }
        q
    }
}

/// Escape `\`, `%`, and `_` for use inside a LIKE/ILIKE pattern.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
