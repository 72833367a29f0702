//! Shared helper functions for catalog dialect implementations.
//!
//! Small building blocks that dialects compose to implement
//! `CatalogDialect` without repeating quoting rules.

use super::CatalogDialect;

// =============================================================================
// Identifier Quoting
// =============================================================================

/// Quote identifier with backticks.
/// Used by: MySQL, MariaDB
pub fn quote_backtick(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

// =============================================================================
// String Quoting
// =============================================================================

/// Quote string with single quotes (standard SQL).
///
/// Catalog names are interpolated into statement text, not bound as
/// parameters. Doubling embedded quotes keeps the statement well-formed;
/// it does not make untrusted names safe.
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

// =============================================================================
// Qualified Names
// =============================================================================

/// Join identifier parts with `.`, quoting each one.
///
/// Blank parts (empty or whitespace-only) are skipped, so
/// `["db1", "", "tbl1"]` becomes `` `db1`.`tbl1` `` under backtick quoting.
pub fn join_quoted<D: CatalogDialect + ?Sized>(dialect: &D, parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.trim().is_empty())
        .map(|part| dialect.quote_identifier(part))
        .collect::<Vec<_>>()
        .join(".")
}
