//! Dialect-neutral structural model.
//!
//! Every type here is a read-only snapshot built fresh by the
//! [`MetadataNormalizer`](crate::metadata::MetadataNormalizer) on each call.
//! Nothing is cached or shared; the caller owns what it gets back.
//!
//! Field names serialize in `camelCase`, which is what the host client
//! expects on the wire.

mod column;
mod database;
mod index;
mod routine;
mod table;
mod table_meta;

pub use column::Column;
pub use database::Database;
pub use index::{Index, IndexColumn, IndexKind, SortDirection};
pub use routine::{Routine, RoutineKind, Trigger};
pub use table::{Table, View};
pub use table_meta::{
    CharsetInfo, CollationInfo, ColumnTypeInfo, DefaultValueInfo, IndexTypeInfo, TableMeta,
};

/// Treat blank strings as absent.
///
/// Catalogs and callers both use `""` to mean "no schema"; the model
/// stores that as `None`.
pub(crate) fn non_blank(s: Option<&str>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty()).map(str::to_string)
}
