//! Index entities.

use serde::{Deserialize, Serialize};

/// Classified index kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexKind {
    PrimaryKey,
    Unique,
    Normal,
    Spatial,
    Fulltext,
}

impl IndexKind {
    /// All kinds, in classification priority order.
    pub const ALL: [IndexKind; 5] = [
        IndexKind::PrimaryKey,
        IndexKind::Unique,
        IndexKind::Spatial,
        IndexKind::Fulltext,
        IndexKind::Normal,
    ];

    /// Classify an index from its catalog row.
    ///
    /// First match wins:
    /// 1. `name` equals `primary_key_name` (case-insensitive) → `PrimaryKey`
    /// 2. `unique` → `Unique`
    /// 3. `raw_type` is `SPATIAL` (case-insensitive) → `Spatial`
    /// 4. `raw_type` is `FULLTEXT` (case-insensitive) → `Fulltext`
    /// 5. otherwise → `Normal`
    pub fn classify(
        name: &str,
        unique: bool,
        raw_type: Option<&str>,
        primary_key_name: &str,
    ) -> Self {
        let raw_type = raw_type.unwrap_or_default();
        if name.eq_ignore_ascii_case(primary_key_name) {
            IndexKind::PrimaryKey
        } else if unique {
            IndexKind::Unique
        } else if raw_type.eq_ignore_ascii_case("SPATIAL") {
            IndexKind::Spatial
        } else if raw_type.eq_ignore_ascii_case("FULLTEXT") {
            IndexKind::Fulltext
        } else {
            IndexKind::Normal
        }
    }

    /// Wire name (`PRIMARY_KEY`, `UNIQUE`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::PrimaryKey => "PRIMARY_KEY",
            IndexKind::Unique => "UNIQUE",
            IndexKind::Normal => "NORMAL",
            IndexKind::Spatial => "SPATIAL",
            IndexKind::Fulltext => "FULLTEXT",
        }
    }
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction of one index column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Ascending,
    Descending,
    #[default]
    Unspecified,
}

impl SortDirection {
    /// Map a single-letter collation code (`A`/`D`, any case).
    ///
    /// Anything else, including an absent code, is `Unspecified`.
    pub fn from_collation(code: Option<&str>) -> Self {
        match code {
            Some(c) if c.eq_ignore_ascii_case("a") => SortDirection::Ascending,
            Some(c) if c.eq_ignore_ascii_case("d") => SortDirection::Descending,
            _ => SortDirection::Unspecified,
        }
    }

    /// SQL keyword, if the direction is known.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            SortDirection::Ascending => Some("ASC"),
            SortDirection::Descending => Some("DESC"),
            SortDirection::Unspecified => None,
        }
    }
}

/// One column of an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexColumn {
    /// Indexed column name.
    pub column_name: String,
    /// 1-based position within the index.
    pub ordinal_position: i32,
    /// Sort direction.
    pub direction: SortDirection,
    /// Estimated number of distinct values.
    pub cardinality: Option<i64>,
    /// Indexed prefix length. `None` or `0` means the whole column.
    pub prefix_length: Option<i64>,
}

impl IndexColumn {
    /// Whether only a prefix of the column is indexed.
    pub fn is_prefix(&self) -> bool {
        self.prefix_length.is_some_and(|len| len > 0)
    }
}

/// An index, possibly spanning several columns.
///
/// `columns` is always sorted by `ordinal_position` ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    /// Owning database.
    pub database_name: String,
    /// Owning schema. `None` for dialects without a schema level.
    pub schema_name: Option<String>,
    /// Owning table.
    pub table_name: String,
    /// Index name.
    pub name: String,
    /// Whether the index enforces uniqueness.
    pub unique: bool,
    /// Classified kind.
    pub kind: IndexKind,
    /// Index comment.
    pub comment: Option<String>,
    /// Indexed columns, ordered by position.
    pub columns: Vec<IndexColumn>,
}

impl Index {
    /// Names of the indexed columns, in index order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column_name.as_str()).collect()
    }
}
