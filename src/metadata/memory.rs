//! Scripted in-memory catalog provider.
//!
//! [`MemoryCatalog`] answers catalog statements from canned result sets,
//! keyed by exact statement text. Build the keys with the same dialect the
//! normalizer uses so they always match:
//!
//! ```ignore
//! use dbscope::dialect::{CatalogDialect, Dialect};
//! use dbscope::metadata::{MemoryCatalog, MetadataNormalizer};
//! use serde_json::json;
//!
//! let dialect = Dialect::MySql;
//! let catalog = MemoryCatalog::new().with_rows(
//!     dialect.triggers_sql("shop"),
//!     vec![json!({"TRIGGER_NAME": "trg_audit"})],
//! );
//! let normalizer = MetadataNormalizer::new(catalog, dialect);
//! let triggers = normalizer.triggers(&(), "shop", None)?;
//! ```
//!
//! Statements with no script return an empty result set, which is what a
//! catalog returns for an object that does not exist.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Map, Value};

use super::error::{CatalogError, CatalogResult};
use super::provider::{CatalogQueryProvider, CatalogRow, RowCursor};
use crate::model::Database;

/// One canned row: column label to JSON value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRow(Map<String, Value>);

impl MemoryRow {
    fn lookup(&self, column: &str) -> CatalogResult<&Value> {
        self.0
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
            .ok_or_else(|| CatalogError::ColumnNotFound(column.to_string()))
    }
}

impl From<Map<String, Value>> for MemoryRow {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Non-object values become an empty row.
impl From<Value> for MemoryRow {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

impl CatalogRow for MemoryRow {
    fn get_string(&self, column: &str) -> CatalogResult<Option<String>> {
        Ok(match self.lookup(column)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
    }

    fn get_i64(&self, column: &str) -> CatalogResult<Option<i64>> {
        match self.lookup(column)? {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(i64::from(*b))),
            Value::Number(n) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| CatalogError::invalid_value(column, format!("not an integer: {n}"))),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| CatalogError::invalid_value(column, format!("{e}: {s}"))),
            other => Err(CatalogError::invalid_value(
                column,
                format!("not an integer: {other}"),
            )),
        }
    }

    fn get_i32(&self, column: &str) -> CatalogResult<Option<i32>> {
        self.get_i64(column)?
            .map(|v| {
                i32::try_from(v)
                    .map_err(|_| CatalogError::invalid_value(column, format!("out of range: {v}")))
            })
            .transpose()
    }

    fn get_bool(&self, column: &str) -> CatalogResult<bool> {
        match self.lookup(column)? {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "yes" | "true" => Ok(true),
                "" | "0" | "no" | "false" => Ok(false),
                _ => Err(CatalogError::invalid_value(column, format!("not a boolean: {s}"))),
            },
            other => Err(CatalogError::invalid_value(
                column,
                format!("not a boolean: {other}"),
            )),
        }
    }
}

struct MemoryCursor<'a> {
    rows: std::slice::Iter<'a, MemoryRow>,
}

impl RowCursor for MemoryCursor<'_> {
    fn next_row(&mut self) -> CatalogResult<Option<&dyn CatalogRow>> {
        Ok(self.rows.next().map(|row| row as &dyn CatalogRow))
    }
}

enum Script {
    Rows(Vec<MemoryRow>),
    Fail(String),
}

/// In-memory [`CatalogQueryProvider`]. Its connection type is `()`.
#[derive(Default)]
pub struct MemoryCatalog {
    scripts: HashMap<String, Script>,
    databases: Vec<Database>,
    executed: Mutex<Vec<String>>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `sql` with `rows`.
    pub fn with_rows<R: Into<MemoryRow>>(mut self, sql: impl Into<String>, rows: Vec<R>) -> Self {
        let rows = rows.into_iter().map(Into::into).collect();
        self.scripts.insert(sql.into(), Script::Rows(rows));
        self
    }

    /// Fail `sql` with a query error carrying `message`.
    pub fn with_failure(mut self, sql: impl Into<String>, message: impl Into<String>) -> Self {
        self.scripts.insert(sql.into(), Script::Fail(message.into()));
        self
    }

    /// Databases returned by `list_databases`.
    pub fn with_databases<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.databases = names.into_iter().map(Database::new).collect();
        self
    }

    /// Statements executed so far, in order.
    pub fn executed(&self) -> Vec<String> {
        match self.executed.lock() {
            Ok(log) => log.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, sql: &str) {
        let mut log = match self.executed.lock() {
            Ok(log) => log,
            Err(poisoned) => poisoned.into_inner(),
        };
        log.push(sql.to_string());
    }
}

impl std::fmt::Debug for MemoryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCatalog")
            .field("scripts", &self.scripts.len())
            .field("databases", &self.databases)
            .finish()
    }
}

impl CatalogQueryProvider for MemoryCatalog {
    type Connection = ();

    fn run_query<T, F>(&self, _conn: &(), sql: &str, mapper: F) -> CatalogResult<T>
    where
        F: FnOnce(&mut dyn RowCursor) -> CatalogResult<T>,
    {
        self.record(sql);
        let rows: &[MemoryRow] = match self.scripts.get(sql) {
            Some(Script::Rows(rows)) => rows,
            Some(Script::Fail(message)) => return Err(CatalogError::query_failed(sql, message)),
            None => &[],
        };
        let mut cursor = MemoryCursor { rows: rows.iter() };
        mapper(&mut cursor as &mut dyn RowCursor)
    }

    fn list_databases(&self, _conn: &()) -> CatalogResult<Vec<Database>> {
        Ok(self.databases.clone())
    }
}
