//! Table and view entities.

use serde::{Deserialize, Serialize};

use super::non_blank;

/// A base table with the storage statistics the catalog reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Owning database.
    pub database_name: String,
    /// Owning schema. `None` for dialects without a schema level.
    pub schema_name: Option<String>,
    /// Table name.
    pub name: String,
    /// Storage engine (InnoDB, MyISAM, ...).
    pub engine: Option<String>,
    /// Version number of the table's `.frm` format.
    pub version: Option<i64>,
    /// Estimated row count. Approximate for InnoDB.
    pub rows: Option<i64>,
    /// Data size in bytes.
    pub data_length: Option<i64>,
    /// Next AUTO_INCREMENT value, if the table has such a column.
    pub auto_increment: Option<i64>,
    /// Creation timestamp as reported by the catalog.
    pub create_time: Option<String>,
    /// Last update timestamp as reported by the catalog.
    pub update_time: Option<String>,
    /// Default collation.
    pub collation: Option<String>,
    /// Table comment.
    pub comment: Option<String>,
    /// `CREATE TABLE` text, only present when fetched explicitly.
    pub ddl: Option<String>,
}

impl Table {
    /// Create a table with identity fields only.
    pub fn new(database: &str, schema: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            database_name: database.to_string(),
            schema_name: non_blank(schema),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A view: table identity plus its definition, no storage statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    /// Owning database.
    pub database_name: String,
    /// Owning schema. `None` for dialects without a schema level.
    pub schema_name: Option<String>,
    /// View name.
    pub name: String,
    /// `CREATE VIEW` text. `None` when the view was not found.
    pub ddl: Option<String>,
}

impl View {
    /// Create a view with identity fields only.
    pub fn new(database: &str, schema: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            database_name: database.to_string(),
            schema_name: non_blank(schema),
            name: name.into(),
            ddl: None,
        }
    }
}
