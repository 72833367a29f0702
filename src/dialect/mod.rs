//! Catalog dialect definitions.
//!
//! Each supported database engine implements [`CatalogDialect`]: the catalog
//! statements it answers, the column labels of their results, and the
//! conventions its catalog uses (system databases, primary-key markers,
//! identifier quoting). The [`MetadataNormalizer`](crate::metadata::MetadataNormalizer)
//! only talks to this trait, so adding an engine means adding a variant here.
//!
//! # Usage
//!
//! ```ignore
//! use dbscope::dialect::{CatalogDialect, Dialect};
//!
//! let dialect = Dialect::MySql;
//! let sql = dialect.columns_sql("shop", "orders");
//! let name = dialect.quote_identifier("order");  // `order`
//! ```

pub mod helpers;
mod mysql;

pub use mysql::MySql;

use crate::model::{RoutineKind, TableMeta};

/// Result-set column labels a dialect's catalog statements produce.
///
/// Lookups through [`CatalogRow`](crate::metadata::CatalogRow) are
/// case-insensitive, so labels are written the way the engine reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogLabels {
    // Tables
    pub table_name: &'static str,
    pub engine: &'static str,
    pub version: &'static str,
    pub table_rows: &'static str,
    pub data_length: &'static str,
    pub auto_increment: &'static str,
    pub create_time: &'static str,
    pub update_time: &'static str,
    pub table_collation: &'static str,
    pub table_comment: &'static str,

    // Definitions
    pub create_table: &'static str,
    pub create_view: &'static str,
    pub create_function: &'static str,
    pub create_procedure: &'static str,

    // Columns
    pub column_name: &'static str,
    pub data_type: &'static str,
    pub column_type: &'static str,
    pub column_default: &'static str,
    pub extra: &'static str,
    pub column_comment: &'static str,
    pub column_key: &'static str,
    pub is_nullable: &'static str,
    pub ordinal_position: &'static str,
    pub numeric_scale: &'static str,
    pub character_set_name: &'static str,
    pub collation_name: &'static str,

    // Indexes
    pub index_name: &'static str,
    pub index_column: &'static str,
    pub seq_in_index: &'static str,
    pub non_unique: &'static str,
    pub index_type: &'static str,
    pub index_comment: &'static str,
    pub index_collation: &'static str,
    pub cardinality: &'static str,
    pub sub_part: &'static str,

    // Triggers
    pub trigger_name: &'static str,
    pub trigger_event: &'static str,
    pub trigger_body: &'static str,

    // Routines
    pub specific_name: &'static str,
    pub routine_comment: &'static str,
    pub routine_status_name: &'static str,
    pub routine_status_comment: &'static str,
}

impl CatalogLabels {
    /// Label of the definition column for a routine kind.
    pub fn create_routine(&self, kind: RoutineKind) -> &'static str {
        match kind {
            RoutineKind::Function => self.create_function,
            RoutineKind::Procedure => self.create_procedure,
        }
    }
}

/// Catalog dialect trait - what the normalizer needs to know about an engine.
///
/// Statement builders interpolate names directly into SQL text. Names are
/// quoted, never parameter-bound, so callers must only pass trusted names.
pub trait CatalogDialect: std::fmt::Debug + Send + Sync {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Quoting
    // =========================================================================

    /// Quote an identifier (database, table, column).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    // =========================================================================
    // Catalog conventions
    // =========================================================================

    /// Databases the engine itself owns.
    fn system_databases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Reserved name of the primary-key index.
    fn primary_key_index_name(&self) -> &'static str {
        "PRIMARY"
    }

    /// Key-indicator value marking a primary-key column.
    /// Compared case-insensitively.
    fn primary_key_indicator(&self) -> &'static str {
        "PRI"
    }

    /// Marker searched for in a column's "extra" text to detect
    /// auto-increment. Compared as a case-sensitive substring.
    fn auto_increment_marker(&self) -> &'static str {
        "auto_increment"
    }

    /// Nullability value meaning "nullable". Compared case-insensitively.
    fn nullable_marker(&self) -> &'static str {
        "YES"
    }

    /// Base types whose parenthesized qualifier is a value list rather
    /// than a size.
    fn enumerated_types(&self) -> &'static [&'static str] {
        &[]
    }

    /// Result-set labels of this dialect's catalog statements.
    fn labels(&self) -> &'static CatalogLabels;

    // =========================================================================
    // Catalog statements
    // =========================================================================

    /// Base tables of a database, optionally narrowed to one table.
    fn tables_sql(&self, database: &str, table: Option<&str>) -> String;

    /// Definition of one table.
    fn table_ddl_sql(&self, database: &str, table: &str) -> String;

    /// Columns of one table, ordered by ordinal position.
    fn columns_sql(&self, database: &str, table: &str) -> String;

    /// One row per (index, column) pair of a table.
    fn indexes_sql(&self, database: &str, table: &str) -> String;

    /// Definition of one view.
    fn view_ddl_sql(&self, database: &str, view: &str) -> String;

    /// Names of all triggers in a database.
    fn triggers_sql(&self, database: &str) -> String;

    /// One named trigger with its body.
    fn trigger_sql(&self, database: &str, trigger: &str) -> String;

    /// Names of all routines of a kind in a database.
    fn routines_sql(&self, kind: RoutineKind, database: &str) -> String;

    /// Comment and specific name of one routine.
    fn routine_info_sql(&self, kind: RoutineKind, database: &str, routine: &str) -> String;

    /// Full definition of one routine.
    fn routine_ddl_sql(&self, kind: RoutineKind, database: &str, routine: &str) -> String;

    // =========================================================================
    // Capabilities
    // =========================================================================

    /// Static capability descriptor.
    fn table_meta(&self) -> TableMeta;
}

/// Supported catalog dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    MySql,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn CatalogDialect {
        match self {
            Dialect::MySql => &MySql,
        }
    }
}

/// Error returned when a dialect name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported dialect: {0}. Supported: mysql")]
pub struct UnknownDialect(pub String);

impl std::str::FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            other => Err(UnknownDialect(other.to_string())),
        }
    }
}

// Implement CatalogDialect for Dialect enum by delegating to concrete types
impl CatalogDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn system_databases(&self) -> &'static [&'static str] {
        self.dialect().system_databases()
    }

    fn primary_key_index_name(&self) -> &'static str {
        self.dialect().primary_key_index_name()
    }

    fn primary_key_indicator(&self) -> &'static str {
        self.dialect().primary_key_indicator()
    }

    fn auto_increment_marker(&self) -> &'static str {
        self.dialect().auto_increment_marker()
    }

    fn nullable_marker(&self) -> &'static str {
        self.dialect().nullable_marker()
    }

    fn enumerated_types(&self) -> &'static [&'static str] {
        self.dialect().enumerated_types()
    }

    fn labels(&self) -> &'static CatalogLabels {
        self.dialect().labels()
    }

    fn tables_sql(&self, database: &str, table: Option<&str>) -> String {
        self.dialect().tables_sql(database, table)
    }

    fn table_ddl_sql(&self, database: &str, table: &str) -> String {
        self.dialect().table_ddl_sql(database, table)
    }

    fn columns_sql(&self, database: &str, table: &str) -> String {
        self.dialect().columns_sql(database, table)
    }

    fn indexes_sql(&self, database: &str, table: &str) -> String {
        self.dialect().indexes_sql(database, table)
    }

    fn view_ddl_sql(&self, database: &str, view: &str) -> String {
        self.dialect().view_ddl_sql(database, view)
    }

    fn triggers_sql(&self, database: &str) -> String {
        self.dialect().triggers_sql(database)
    }

    fn trigger_sql(&self, database: &str, trigger: &str) -> String {
        self.dialect().trigger_sql(database, trigger)
    }

    fn routines_sql(&self, kind: RoutineKind, database: &str) -> String {
        self.dialect().routines_sql(kind, database)
    }

    fn routine_info_sql(&self, kind: RoutineKind, database: &str, routine: &str) -> String {
        self.dialect().routine_info_sql(kind, database, routine)
    }

    fn routine_ddl_sql(&self, kind: RoutineKind, database: &str, routine: &str) -> String {
        self.dialect().routine_ddl_sql(kind, database, routine)
    }

    fn table_meta(&self) -> TableMeta {
        self.dialect().table_meta()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
