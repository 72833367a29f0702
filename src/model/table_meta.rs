//! Dialect capability descriptor.
//!
//! A `TableMeta` tells a client which column types, charsets, collations,
//! index kinds and default-value templates the connected dialect offers.
//! It is static per dialect and never comes from a catalog query.

use serde::{Deserialize, Serialize};

use super::IndexKind;

/// What a column type accepts in a column definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnTypeInfo {
    pub type_name: String,
    pub support_length: bool,
    pub support_scale: bool,
    pub support_nullable: bool,
    pub support_auto_increment: bool,
    pub support_charset: bool,
    pub support_collation: bool,
    pub support_comments: bool,
    pub support_default_value: bool,
    /// Whether the type takes an enumerated value list (`ENUM`, `SET`).
    pub support_values: bool,
}

/// A character set and its default collation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharsetInfo {
    pub charset_name: String,
    pub default_collation_name: String,
}

/// A collation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollationInfo {
    pub collation_name: String,
}

/// An index kind with its display name and DDL keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexTypeInfo {
    pub kind: IndexKind,
    pub name: String,
    pub keyword: String,
}

/// A default-value template offered in column editors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultValueInfo {
    pub name: String,
    /// SQL emitted for the template (`''`, `NULL`, `CURRENT_TIMESTAMP`).
    pub expression: String,
}

/// Capability descriptor for one dialect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMeta {
    pub column_types: Vec<ColumnTypeInfo>,
    pub charsets: Vec<CharsetInfo>,
    pub collations: Vec<CollationInfo>,
    pub index_types: Vec<IndexTypeInfo>,
    pub default_values: Vec<DefaultValueInfo>,
}

impl TableMeta {
    /// Look up a column type by name, case-insensitively.
    pub fn column_type(&self, name: &str) -> Option<&ColumnTypeInfo> {
        self.column_types
            .iter()
            .find(|t| t.type_name.eq_ignore_ascii_case(name))
    }

    /// Look up a charset by name, case-insensitively.
    pub fn charset(&self, name: &str) -> Option<&CharsetInfo> {
        self.charsets
            .iter()
            .find(|c| c.charset_name.eq_ignore_ascii_case(name))
    }

    /// DDL keyword for an index kind, if the dialect supports it.
    pub fn index_keyword(&self, kind: IndexKind) -> Option<&str> {
        self.index_types
            .iter()
            .find(|t| t.kind == kind)
            .map(|t| t.keyword.as_str())
    }
}
