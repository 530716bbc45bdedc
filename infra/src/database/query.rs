//! Named-parameter statements.
//!
//! SQL text refers to parameters as `@name`; [`NamedQuery`] rewrites them to
//! MySQL's positional `?` and lines up the values in placeholder order.
//! `@@system_variables` and anything inside quotes are left alone.

use chrono::{DateTime, Utc};
use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::Query;

use crate::InfrastructureError;

/// A value bound to a statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(i64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(v: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SqlValue::Null, Into::into)
    }
}

/// Ordered parameter list
///
/// Order matters only for stored procedure calls, which bind positionally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(String, SqlValue)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter
    pub fn with(mut self, name: &str, value: impl Into<SqlValue>) -> Self {
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.0.iter().map(|(_, v)| v)
    }
}

/// A statement with its parameters resolved to positional form
#[derive(Debug, Clone, PartialEq)]
pub struct NamedQuery {
    sql: String,
    values: Vec<SqlValue>,
}

impl NamedQuery {
    /// Resolve every `@name` in `text` against `params`
    ///
    /// # Returns
    /// * `Err(InfrastructureError::MissingParameter)` - a referenced name is not in `params`
    pub fn new(text: &str, params: &Params) -> Result<Self, InfrastructureError> {
        let (sql, names) = rewrite_named(text);
        let values = names
            .into_iter()
            .map(|name| {
                params
                    .get(&name)
                    .cloned()
                    .ok_or(InfrastructureError::MissingParameter(name))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sql, values })
    }

    /// `CALL name(?, ?, ...)` binding `params` in insertion order
    pub fn procedure(name: &str, params: &Params) -> Result<Self, InfrastructureError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if !valid {
            return Err(InfrastructureError::InvalidQuery(format!(
                "invalid procedure name '{}'",
                name
            )));
        }
        let placeholders = vec!["?"; params.len()].join(", ");
        Ok(Self {
            sql: format!("CALL {}({})", name, placeholders),
            values: params.values().cloned().collect(),
        })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// sqlx query with every value bound
    pub fn query(&self) -> Query<'_, MySql, MySqlArguments> {
        self.values
            .iter()
            .cloned()
            .fold(sqlx::query(&self.sql), bind_value)
    }
}

fn bind_value<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    value: SqlValue,
) -> Query<'q, MySql, MySqlArguments> {
    match value {
        SqlValue::Null => query.bind(None::<String>),
        SqlValue::Bool(v) => query.bind(v),
        SqlValue::Int(v) => query.bind(v),
        SqlValue::Float(v) => query.bind(v),
        SqlValue::Text(v) => query.bind(v),
        SqlValue::Timestamp(v) => query.bind(v),
    }
}

/// Replace `@name` placeholders with `?`, returning the names in order
pub fn rewrite_named(text: &str) -> (String, Vec<String>) {
    let mut sql = String::with_capacity(text.len());
    let mut names = Vec::new();
    let mut chars = text.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            sql.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    sql.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '\'' | '"' | '`' => {
                quote = Some(c);
                sql.push(c);
            }
            '@' if chars.peek() == Some(&'@') => {
                // @@system_variable
                sql.push('@');
                sql.push('@');
                chars.next();
            }
            '@' if chars.peek().map_or(false, |n| is_name_char(*n)) => {
                let mut name = String::new();
                while let Some(&n) = chars.peek() {
                    if !is_name_char(n) {
                        break;
                    }
                    name.push(n);
                    chars.next();
                }
                names.push(name);
                sql.push('?');
            }
            _ => sql.push(c),
        }
    }
    (sql, names)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
