//! Catalog query provider seam.
//!
//! The provider is the SQL execution layer: it owns connections, runs
//! statements and hands results back through a forward-only cursor. This
//! crate never opens a connection itself; hosts implement
//! [`CatalogQueryProvider`] over whatever driver they use.

use super::error::CatalogResult;
use crate::model::Database;

/// One result row with named, typed accessors.
///
/// Column lookups are case-insensitive. NULL reads as `None` (or `false`
/// for [`get_bool`](CatalogRow::get_bool)).
pub trait CatalogRow {
    /// Read a column as text.
    fn get_string(&self, column: &str) -> CatalogResult<Option<String>>;

    /// Read a column as a 64-bit integer.
    fn get_i64(&self, column: &str) -> CatalogResult<Option<i64>>;

    /// Read a column as a 32-bit integer.
    fn get_i32(&self, column: &str) -> CatalogResult<Option<i32>>;

    /// Read a column as a boolean.
    fn get_bool(&self, column: &str) -> CatalogResult<bool>;
}

/// Forward-only cursor over a result set.
pub trait RowCursor {
    /// Advance to the next row. `None` once the result set is exhausted.
    fn next_row(&mut self) -> CatalogResult<Option<&dyn CatalogRow>>;
}

/// Executes catalog statements for the normalizer.
///
/// # Example
///
/// ```ignore
/// let names: Vec<String> = provider.run_query(&conn, "SHOW DATABASES", |rows| {
///     let mut names = Vec::new();
///     while let Some(row) = rows.next_row()? {
///         names.extend(row.get_string("Database")?);
///     }
///     Ok(names)
/// })?;
/// ```
pub trait CatalogQueryProvider {
    /// Connection handle the provider executes on.
    type Connection: ?Sized;

    /// Run one statement and map its rows.
    ///
    /// Failures are returned unmodified; retry policy belongs to the
    /// provider.
    fn run_query<T, F>(&self, conn: &Self::Connection, sql: &str, mapper: F) -> CatalogResult<T>
    where
        F: FnOnce(&mut dyn RowCursor) -> CatalogResult<T>;

    /// List the databases visible on the connection.
    fn list_databases(&self, conn: &Self::Connection) -> CatalogResult<Vec<Database>>;
}

impl<P: CatalogQueryProvider + ?Sized> CatalogQueryProvider for &P {
    type Connection = P::Connection;

    fn run_query<T, F>(&self, conn: &Self::Connection, sql: &str, mapper: F) -> CatalogResult<T>
    where
        F: FnOnce(&mut dyn RowCursor) -> CatalogResult<T>,
    {
        (**self).run_query(conn, sql, mapper)
    }

    fn list_databases(&self, conn: &Self::Connection) -> CatalogResult<Vec<Database>> {
        (**self).list_databases(conn)
    }
}
