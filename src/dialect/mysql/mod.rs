//! MySQL catalog dialect.
//!
//! MySQL catalog specifics:
//! - Backtick identifier quoting (`` `name` ``)
//! - No schema level: a MySQL "schema" is a database
//! - Table, column, trigger and routine metadata from `INFORMATION_SCHEMA`
//! - Definitions and indexes from `SHOW CREATE ...` / `SHOW INDEX`
//! - `ENUM`/`SET` carry their value list in `COLUMN_TYPE`
//! - Auto-increment is flagged in the free-text `EXTRA` column

mod capabilities;

use super::helpers;
use super::{CatalogDialect, CatalogLabels};
use crate::model::{RoutineKind, TableMeta};

/// MySQL catalog dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

const SYSTEM_DATABASES: &[&str] = &["information_schema", "performance_schema", "mysql", "sys"];

const ENUMERATED_TYPES: &[&str] = &["SET", "ENUM"];

static LABELS: CatalogLabels = CatalogLabels {
    table_name: "TABLE_NAME",
    engine: "ENGINE",
    version: "VERSION",
    table_rows: "TABLE_ROWS",
    data_length: "DATA_LENGTH",
    auto_increment: "AUTO_INCREMENT",
    create_time: "CREATE_TIME",
    update_time: "UPDATE_TIME",
    table_collation: "TABLE_COLLATION",
    table_comment: "TABLE_COMMENT",

    create_table: "Create Table",
    create_view: "Create View",
    create_function: "Create Function",
    create_procedure: "Create Procedure",

    column_name: "COLUMN_NAME",
    data_type: "DATA_TYPE",
    column_type: "COLUMN_TYPE",
    column_default: "COLUMN_DEFAULT",
    extra: "EXTRA",
    column_comment: "COLUMN_COMMENT",
    column_key: "COLUMN_KEY",
    is_nullable: "IS_NULLABLE",
    ordinal_position: "ORDINAL_POSITION",
    numeric_scale: "NUMERIC_SCALE",
    character_set_name: "CHARACTER_SET_NAME",
    collation_name: "COLLATION_NAME",

    index_name: "Key_name",
    index_column: "Column_name",
    seq_in_index: "Seq_in_index",
    non_unique: "Non_unique",
    index_type: "Index_type",
    index_comment: "Index_comment",
    index_collation: "Collation",
    cardinality: "Cardinality",
    sub_part: "Sub_part",

    trigger_name: "TRIGGER_NAME",
    trigger_event: "EVENT_MANIPULATION",
    trigger_body: "ACTION_STATEMENT",

    specific_name: "SPECIFIC_NAME",
    routine_comment: "ROUTINE_COMMENT",
    routine_status_name: "Name",
    routine_status_comment: "Comment",
};

impl MySql {
    /// `db`.`name` with both parts always present, even when blank.
    fn qualified(&self, database: &str, name: &str) -> String {
        format!(
            "{}.{}",
            self.quote_identifier(database),
            self.quote_identifier(name)
        )
    }
}

impl CatalogDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn system_databases(&self) -> &'static [&'static str] {
        SYSTEM_DATABASES
    }

    fn enumerated_types(&self) -> &'static [&'static str] {
        ENUMERATED_TYPES
    }

    fn labels(&self) -> &'static CatalogLabels {
        &LABELS
    }

    fn tables_sql(&self, database: &str, table: Option<&str>) -> String {
        let mut sql = format!(
            "SELECT TABLE_SCHEMA, TABLE_NAME, ENGINE, VERSION, TABLE_ROWS, DATA_LENGTH, \
             AUTO_INCREMENT, CREATE_TIME, UPDATE_TIME, TABLE_COLLATION, TABLE_COMMENT \
             FROM INFORMATION_SCHEMA.TABLES \
             WHERE TABLE_TYPE = 'BASE TABLE' AND TABLE_SCHEMA = {}",
            self.quote_string(database)
        );
        if let Some(table) = table.filter(|t| !t.trim().is_empty()) {
            sql.push_str(" AND TABLE_NAME = ");
            sql.push_str(&self.quote_string(table));
        }
        sql
    }

    fn table_ddl_sql(&self, database: &str, table: &str) -> String {
        format!("SHOW CREATE TABLE {}", self.qualified(database, table))
    }

    fn columns_sql(&self, database: &str, table: &str) -> String {
        format!(
            "SELECT * FROM information_schema.COLUMNS \
             WHERE TABLE_SCHEMA = {} AND TABLE_NAME = {} \
             ORDER BY ORDINAL_POSITION",
            self.quote_string(database),
            self.quote_string(table)
        )
    }

    fn indexes_sql(&self, database: &str, table: &str) -> String {
        format!(
            "SHOW INDEX FROM {} FROM {}",
            self.quote_identifier(table),
            self.quote_identifier(database)
        )
    }

    fn view_ddl_sql(&self, database: &str, view: &str) -> String {
        format!("SHOW CREATE VIEW {}", self.qualified(database, view))
    }

    fn triggers_sql(&self, database: &str) -> String {
        format!(
            "SELECT TRIGGER_NAME FROM INFORMATION_SCHEMA.TRIGGERS WHERE TRIGGER_SCHEMA = {}",
            self.quote_string(database)
        )
    }

    fn trigger_sql(&self, database: &str, trigger: &str) -> String {
        format!(
            "SELECT TRIGGER_NAME, EVENT_MANIPULATION, ACTION_STATEMENT \
             FROM INFORMATION_SCHEMA.TRIGGERS \
             WHERE TRIGGER_SCHEMA = {} AND TRIGGER_NAME = {}",
            self.quote_string(database),
            self.quote_string(trigger)
        )
    }

    fn routines_sql(&self, kind: RoutineKind, database: &str) -> String {
        format!(
            "SHOW {} STATUS WHERE Db = {}",
            kind.as_str(),
            self.quote_string(database)
        )
    }

    fn routine_info_sql(&self, kind: RoutineKind, database: &str, routine: &str) -> String {
        format!(
            "SELECT SPECIFIC_NAME, ROUTINE_COMMENT, ROUTINE_DEFINITION \
             FROM information_schema.ROUTINES \
             WHERE ROUTINE_TYPE = {} AND ROUTINE_SCHEMA = {} AND ROUTINE_NAME = {}",
            self.quote_string(kind.as_str()),
            self.quote_string(database),
            self.quote_string(routine)
        )
    }

    fn routine_ddl_sql(&self, kind: RoutineKind, database: &str, routine: &str) -> String {
        format!(
            "SHOW CREATE {} {}",
            kind.as_str(),
            self.qualified(database, routine)
        )
    }

    fn table_meta(&self) -> TableMeta {
        capabilities::TABLE_META.clone()
    }
}
