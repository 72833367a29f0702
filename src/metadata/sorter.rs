//! Database ordering.
//!
//! The normalizer hands the raw database list to a [`DatabaseSorter`] along
//! with the effective system-database names. Any closure with the right
//! shape is a sorter; [`SystemLast`] is the default.

use crate::model::Database;

/// Orders (and flags) the databases of a connection.
pub trait DatabaseSorter<C: ?Sized> {
    /// Sort `databases`, using `system_names` to tell system from user
    /// databases.
    fn sort_databases(
        &self,
        databases: Vec<Database>,
        system_names: &[String],
        conn: &C,
    ) -> Vec<Database>;
}

impl<C: ?Sized, F> DatabaseSorter<C> for F
where
    F: Fn(Vec<Database>, &[String], &C) -> Vec<Database>,
{
    fn sort_databases(
        &self,
        databases: Vec<Database>,
        system_names: &[String],
        conn: &C,
    ) -> Vec<Database> {
        self(databases, system_names, conn)
    }
}

/// Flags system databases and moves them after user databases.
///
/// Membership is case-insensitive. Relative order inside each group is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLast;

impl<C: ?Sized> DatabaseSorter<C> for SystemLast {
    fn sort_databases(
        &self,
        databases: Vec<Database>,
        system_names: &[String],
        _conn: &C,
    ) -> Vec<Database> {
        let (system, user): (Vec<_>, Vec<_>) = databases
            .into_iter()
            .map(|mut db| {
                db.system = db.system || is_system(&db.name, system_names);
                db
            })
            .partition(|db| db.system);

        user.into_iter().chain(system).collect()
    }
}

/// Whether `name` is in `system_names`, ignoring case.
pub fn is_system(name: &str, system_names: &[String]) -> bool {
    system_names.iter().any(|s| s.eq_ignore_ascii_case(name))
}
