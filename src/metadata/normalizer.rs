//! Metadata normalizer.
//!
//! Runs a dialect's catalog statements through a [`CatalogQueryProvider`]
//! and maps every result row into the dialect-neutral model. One read
//! operation per metadata kind; each one runs its statements sequentially
//! on the caller's connection and returns fresh values.
//!
//! # Not-found policy
//!
//! A named object that does not exist is never an error. Single-object
//! reads of views, triggers, functions and procedures build an
//! identity-only shell first and then try to enrich it, so a miss still
//! returns a usable value with its name and scope filled in.

use tracing::{debug, warn};

use super::error::{CatalogError, CatalogResult};
use super::index::{IndexAggregator, RawIndexRow};
use super::provider::{CatalogQueryProvider, CatalogRow, RowCursor};
use super::sorter::{is_system, DatabaseSorter, SystemLast};
use super::type_size::apply_type_size;
use crate::config::MetadataSettings;
use crate::dialect::{helpers, CatalogDialect, CatalogLabels};
use crate::model::{
    Column, Database, Index, Routine, RoutineKind, Table, TableMeta, Trigger, View,
};

/// Turns catalog query results into the structural model.
///
/// # Example
///
/// ```ignore
/// use dbscope::dialect::Dialect;
/// use dbscope::metadata::MetadataNormalizer;
///
/// let normalizer = MetadataNormalizer::new(provider, Dialect::MySql);
/// let tables = normalizer.tables(&conn, "shop", None, None)?;
/// for table in &tables {
///     let columns = normalizer.columns(&conn, "shop", None, &table.name)?;
///     let indexes = normalizer.indexes(&conn, "shop", None, &table.name)?;
/// }
/// ```
pub struct MetadataNormalizer<P, S = SystemLast> {
    provider: P,
    dialect: Box<dyn CatalogDialect>,
    sorter: S,
    system_databases: Option<Vec<String>>,
    hide_system_databases: bool,
}

impl<P: CatalogQueryProvider> MetadataNormalizer<P, SystemLast> {
    /// Create a normalizer with the default database sorter.
    pub fn new(provider: P, dialect: impl CatalogDialect + 'static) -> Self {
        Self {
            provider,
            dialect: Box::new(dialect),
            sorter: SystemLast,
            system_databases: None,
            hide_system_databases: false,
        }
    }
}

impl<P, S> MetadataNormalizer<P, S>
where
    P: CatalogQueryProvider,
    S: DatabaseSorter<P::Connection>,
{
    /// Replace the database sorter.
    pub fn with_sorter<S2>(self, sorter: S2) -> MetadataNormalizer<P, S2>
    where
        S2: DatabaseSorter<P::Connection>,
    {
        MetadataNormalizer {
            provider: self.provider,
            dialect: self.dialect,
            sorter,
            system_databases: self.system_databases,
            hide_system_databases: self.hide_system_databases,
        }
    }

    /// Apply metadata settings.
    pub fn with_settings(mut self, settings: &MetadataSettings) -> Self {
        self.system_databases = settings.system_databases.clone();
        self.hide_system_databases = settings.hide_system_databases;
        self
    }

    /// The dialect in use.
    pub fn dialect(&self) -> &dyn CatalogDialect {
        self.dialect.as_ref()
    }

    /// The provider in use.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Effective system-database names: the configured override, or the
    /// dialect's built-in list.
    pub fn system_databases(&self) -> Vec<String> {
        match &self.system_databases {
            Some(names) => names.clone(),
            None => self
                .dialect
                .system_databases()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    // =========================================================================
    // Databases
    // =========================================================================

    /// Databases on the connection, ordered by the sorter.
    pub fn databases(&self, conn: &P::Connection) -> CatalogResult<Vec<Database>> {
        let system = self.system_databases();
        let databases = self.provider.list_databases(conn)?;
        let sorted = self.sorter.sort_databases(databases, &system, conn);

        if self.hide_system_databases {
            Ok(sorted
                .into_iter()
                .filter(|db| !db.system && !is_system(&db.name, &system))
                .collect())
        } else {
            Ok(sorted)
        }
    }

    // =========================================================================
    // Tables and views
    // =========================================================================

    /// Base tables of a database. A blank or absent `table` lists them all.
    pub fn tables(
        &self,
        conn: &P::Connection,
        database: &str,
        schema: Option<&str>,
        table: Option<&str>,
    ) -> CatalogResult<Vec<Table>> {
        require_database(database)?;
        let labels = self.dialect.labels();
        let sql = self.dialect.tables_sql(database, table);

        self.query(conn, &sql, |rows| {
            let mut tables = Vec::new();
            while let Some(row) = rows.next_row()? {
                tables.push(map_table(row, labels, database, schema)?);
            }
            Ok(tables)
        })
    }

    /// `CREATE TABLE` text of one table, or `None` if it does not exist.
    pub fn table_ddl(
        &self,
        conn: &P::Connection,
        database: &str,
        _schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<Option<String>> {
        require_database(database)?;
        let label = self.dialect.labels().create_table;
        let sql = self.dialect.table_ddl_sql(database, table);

        self.query(conn, &sql, |rows| first_string(rows, label))
    }

    /// One view with its definition. A missing view comes back with
    /// `ddl: None`.
    pub fn view(
        &self,
        conn: &P::Connection,
        database: &str,
        schema: Option<&str>,
        view: &str,
    ) -> CatalogResult<View> {
        require_database(database)?;
        let label = self.dialect.labels().create_view;
        let sql = self.dialect.view_ddl_sql(database, view);

        let mut result = View::new(database, schema, view);
        result.ddl = self.query(conn, &sql, |rows| first_string(rows, label))?;
        Ok(result)
    }

    // =========================================================================
    // Columns and indexes
    // =========================================================================

    /// Columns of one table in catalog order (ordinal position ascending).
    ///
    /// The order is the catalog's; it is not re-verified here.
    pub fn columns(
        &self,
        conn: &P::Connection,
        database: &str,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<Vec<Column>> {
        require_database(database)?;
        let sql = self.dialect.columns_sql(database, table);

        self.query(conn, &sql, |rows| {
            let mut columns = Vec::new();
            while let Some(row) = rows.next_row()? {
                columns.push(self.map_column(row, database, schema, table)?);
            }
            Ok(columns)
        })
    }

    /// Indexes of one table, in first-seen order, each with its columns
    /// sorted by position.
    pub fn indexes(
        &self,
        conn: &P::Connection,
        database: &str,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<Vec<Index>> {
        require_database(database)?;
        let labels = self.dialect.labels();
        let sql = self.dialect.indexes_sql(database, table);

        self.query(conn, &sql, |rows| {
            let mut aggregator = IndexAggregator::new(
                database,
                schema,
                table,
                self.dialect.primary_key_index_name(),
            );
            while let Some(row) = rows.next_row()? {
                aggregator.push(RawIndexRow::from_row(row, labels)?);
            }
            Ok(aggregator.finish())
        })
    }

    // =========================================================================
    // Triggers
    // =========================================================================

    /// All triggers of a database, names only.
    pub fn triggers(
        &self,
        conn: &P::Connection,
        database: &str,
        schema: Option<&str>,
    ) -> CatalogResult<Vec<Trigger>> {
        require_database(database)?;
        let label = self.dialect.labels().trigger_name;
        let sql = self.dialect.triggers_sql(database);

        self.query(conn, &sql, |rows| {
            let mut triggers = Vec::new();
            while let Some(row) = rows.next_row()? {
                let name = row.get_string(label)?.unwrap_or_default();
                triggers.push(Trigger::shell(database, schema, name));
            }
            Ok(triggers)
        })
    }

    /// One trigger with its body. Always returns the shell, enriched when
    /// the catalog has a matching row.
    pub fn trigger(
        &self,
        conn: &P::Connection,
        database: &str,
        schema: Option<&str>,
        name: &str,
    ) -> CatalogResult<Trigger> {
        require_database(database)?;
        let labels = self.dialect.labels();
        let sql = self.dialect.trigger_sql(database, name);

        let mut trigger = Trigger::shell(database, schema, name);
        self.query(conn, &sql, |rows| {
            if let Some(row) = rows.next_row()? {
                trigger.event = row.get_string(labels.trigger_event)?;
                trigger.body = row.get_string(labels.trigger_body)?;
            }
            Ok(())
        })?;
        Ok(trigger)
    }

    // =========================================================================
    // Routines
    // =========================================================================

    /// All stored functions of a database, names and comments only.
    pub fn functions(
        &self,
        conn: &P::Connection,
        database: &str,
        schema: Option<&str>,
    ) -> CatalogResult<Vec<Routine>> {
        self.routines(conn, RoutineKind::Function, database, schema)
    }

    /// One stored function. See [`routine`](Self::routine).
    pub fn function(
        &self,
        conn: &P::Connection,
        database: &str,
        schema: Option<&str>,
        name: &str,
    ) -> CatalogResult<Routine> {
        self.routine(conn, RoutineKind::Function, database, schema, name)
    }

    /// All stored procedures of a database, names and comments only.
    pub fn procedures(
        &self,
        conn: &P::Connection,
        database: &str,
        schema: Option<&str>,
    ) -> CatalogResult<Vec<Routine>> {
        self.routines(conn, RoutineKind::Procedure, database, schema)
    }

    /// One stored procedure. See [`routine`](Self::routine).
    pub fn procedure(
        &self,
        conn: &P::Connection,
        database: &str,
        schema: Option<&str>,
        name: &str,
    ) -> CatalogResult<Routine> {
        self.routine(conn, RoutineKind::Procedure, database, schema, name)
    }

    /// All routines of one kind in a database.
    pub fn routines(
        &self,
        conn: &P::Connection,
        kind: RoutineKind,
        database: &str,
        schema: Option<&str>,
    ) -> CatalogResult<Vec<Routine>> {
        require_database(database)?;
        let labels = self.dialect.labels();
        let sql = self.dialect.routines_sql(kind, database);

        self.query(conn, &sql, |rows| {
            let mut routines = Vec::new();
            while let Some(row) = rows.next_row()? {
                let name = row.get_string(labels.routine_status_name)?.unwrap_or_default();
                let mut routine = Routine::shell(kind, database, schema, name);
                routine.comment = row.get_string(labels.routine_status_comment)?;
                routines.push(routine);
            }
            Ok(routines)
        })
    }

    /// One routine, fetched in two sequential steps.
    ///
    /// 1. The routines catalog supplies the comment and specific name. A
    ///    failure here is returned.
    /// 2. The definition statement supplies the body. It always runs, even
    ///    when step 1 found nothing. A failure here is logged and the body
    ///    stays unset; the identity and step-1 fields are kept.
    ///
    /// The two steps are not atomic.
    pub fn routine(
        &self,
        conn: &P::Connection,
        kind: RoutineKind,
        database: &str,
        schema: Option<&str>,
        name: &str,
    ) -> CatalogResult<Routine> {
        require_database(database)?;
        let labels = self.dialect.labels();

        let mut routine = Routine::shell(kind, database, schema, name);

        let info_sql = self.dialect.routine_info_sql(kind, database, name);
        self.query(conn, &info_sql, |rows| {
            if let Some(row) = rows.next_row()? {
                routine.specific_name = row.get_string(labels.specific_name)?;
                routine.comment = row.get_string(labels.routine_comment)?;
            }
            Ok(())
        })?;

        let ddl_sql = self.dialect.routine_ddl_sql(kind, database, name);
        let body_label = labels.create_routine(kind);
        match self.query(conn, &ddl_sql, |rows| first_string(rows, body_label)) {
            Ok(body) => routine.body = body,
            Err(err) => warn!(
                dialect = self.dialect.name(),
                %kind,
                database,
                routine = name,
                error = %err,
                "routine definition unavailable"
            ),
        }

        Ok(routine)
    }

    // =========================================================================
    // Capabilities and naming
    // =========================================================================

    /// Capability descriptor. The arguments are accepted for interface
    /// symmetry; the result depends on the dialect only.
    pub fn table_meta(
        &self,
        _database: &str,
        _schema: Option<&str>,
        _table: Option<&str>,
    ) -> TableMeta {
        self.dialect.table_meta()
    }

    /// Quote each non-blank part and join with `.`.
    pub fn quote_identifiers(&self, parts: &[&str]) -> String {
        helpers::join_quoted(self.dialect.as_ref(), parts)
    }

    // =========================================================================
    // Row mapping
    // =========================================================================

    fn query<T, F>(&self, conn: &P::Connection, sql: &str, mapper: F) -> CatalogResult<T>
    where
        F: FnOnce(&mut dyn RowCursor) -> CatalogResult<T>,
    {
        debug!(dialect = self.dialect.name(), sql, "running catalog query");
        self.provider.run_query(conn, sql, mapper)
    }

    fn map_column(
        &self,
        row: &dyn CatalogRow,
        database: &str,
        schema: Option<&str>,
        table: &str,
    ) -> CatalogResult<Column> {
        let labels = self.dialect.labels();
        let name = row.get_string(labels.column_name)?.unwrap_or_default();

        let mut column = Column::new(database, schema, table, name);
        column.column_type = row
            .get_string(labels.data_type)?
            .unwrap_or_default()
            .to_uppercase();
        column.default_value = row.get_string(labels.column_default)?;
        column.auto_increment = row
            .get_string(labels.extra)?
            .is_some_and(|extra| extra.contains(self.dialect.auto_increment_marker()));
        column.comment = row.get_string(labels.column_comment)?;
        column.primary_key = row
            .get_string(labels.column_key)?
            .is_some_and(|key| key.eq_ignore_ascii_case(self.dialect.primary_key_indicator()));
        column.nullable = row
            .get_string(labels.is_nullable)?
            .is_some_and(|flag| flag.eq_ignore_ascii_case(self.dialect.nullable_marker()));
        column.ordinal_position = row.get_i32(labels.ordinal_position)?.unwrap_or_default();
        column.decimal_digits = row.get_i32(labels.numeric_scale)?;
        column.char_set_name = row.get_string(labels.character_set_name)?;
        column.collation_name = row.get_string(labels.collation_name)?;

        let declaration = row.get_string(labels.column_type)?;
        apply_type_size(
            &mut column,
            declaration.as_deref(),
            self.dialect.enumerated_types(),
        );

        Ok(column)
    }
}

impl<P: std::fmt::Debug, S: std::fmt::Debug> std::fmt::Debug for MetadataNormalizer<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataNormalizer")
            .field("provider", &self.provider)
            .field("dialect", &self.dialect)
            .field("sorter", &self.sorter)
            .field("system_databases", &self.system_databases)
            .field("hide_system_databases", &self.hide_system_databases)
            .finish()
    }
}

fn require_database(database: &str) -> CatalogResult<()> {
    if database.trim().is_empty() {
        return Err(CatalogError::InvalidRequest(
            "database name must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn map_table(
    row: &dyn CatalogRow,
    labels: &CatalogLabels,
    database: &str,
    schema: Option<&str>,
) -> CatalogResult<Table> {
    let name = row.get_string(labels.table_name)?.unwrap_or_default();
    let mut table = Table::new(database, schema, name);
    table.engine = row.get_string(labels.engine)?;
    table.version = row.get_i64(labels.version)?;
    table.rows = row.get_i64(labels.table_rows)?;
    table.data_length = row.get_i64(labels.data_length)?;
    table.auto_increment = row.get_i64(labels.auto_increment)?;
    table.create_time = row.get_string(labels.create_time)?;
    table.update_time = row.get_string(labels.update_time)?;
    table.collation = row.get_string(labels.table_collation)?;
    table.comment = row.get_string(labels.table_comment)?;
    Ok(table)
}

/// Text of `label` in the first row, if there is a row.
fn first_string(rows: &mut dyn RowCursor, label: &str) -> CatalogResult<Option<String>> {
    match rows.next_row()? {
        Some(row) => row.get_string(label),
        None => Ok(None),
    }
}
