//! Composite index reconstruction.
//!
//! Catalogs report indexes as one row per (index, column) pair. The
//! [`IndexAggregator`] folds that flat stream back into one [`Index`] per
//! name, in first-seen order, with each index's columns sorted by their
//! position inside the index.

use indexmap::IndexMap;

use super::error::CatalogResult;
use super::provider::CatalogRow;
use crate::dialect::CatalogLabels;
use crate::model::{non_blank, Index, IndexColumn, IndexKind, SortDirection};

/// One raw index row as the catalog reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawIndexRow {
    pub index_name: String,
    pub column_name: String,
    /// 1-based position of the column inside the index.
    pub seq_in_index: i32,
    pub unique: bool,
    /// Engine-reported index type (`BTREE`, `SPATIAL`, `FULLTEXT`, ...).
    pub index_type: Option<String>,
    pub comment: Option<String>,
    /// Single-letter sort code (`A`, `D`) or absent.
    pub collation: Option<String>,
    pub cardinality: Option<i64>,
    pub sub_part: Option<i64>,
}

impl RawIndexRow {
    /// Read a raw index row through a dialect's labels.
    pub fn from_row(row: &dyn CatalogRow, labels: &CatalogLabels) -> CatalogResult<Self> {
        Ok(Self {
            index_name: row.get_string(labels.index_name)?.unwrap_or_default(),
            column_name: row.get_string(labels.index_column)?.unwrap_or_default(),
            seq_in_index: row.get_i32(labels.seq_in_index)?.unwrap_or_default(),
            unique: !row.get_bool(labels.non_unique)?,
            index_type: row.get_string(labels.index_type)?,
            comment: row.get_string(labels.index_comment)?,
            collation: row.get_string(labels.index_collation)?,
            cardinality: row.get_i64(labels.cardinality)?,
            sub_part: row.get_i64(labels.sub_part)?,
        })
    }

    fn index_column(&self) -> IndexColumn {
        IndexColumn {
            column_name: self.column_name.clone(),
            ordinal_position: self.seq_in_index,
            direction: SortDirection::from_collation(self.collation.as_deref()),
            cardinality: self.cardinality,
            prefix_length: self.sub_part,
        }
    }
}

/// Folds raw index rows of one table into indexes.
#[derive(Debug)]
pub struct IndexAggregator {
    database_name: String,
    schema_name: Option<String>,
    table_name: String,
    primary_key_name: String,
    indexes: IndexMap<String, Index>,
}

impl IndexAggregator {
    /// Start aggregating indexes of `table`.
    ///
    /// `primary_key_name` is the dialect's reserved primary-key index name.
    pub fn new(
        database: &str,
        schema: Option<&str>,
        table: &str,
        primary_key_name: &str,
    ) -> Self {
        Self {
            database_name: database.to_string(),
            schema_name: non_blank(schema),
            table_name: table.to_string(),
            primary_key_name: primary_key_name.to_string(),
            indexes: IndexMap::new(),
        }
    }

    /// Fold one row in.
    ///
    /// The first row of an index fixes its uniqueness, kind and comment.
    /// Every later row appends a column, and the column list is re-sorted
    /// by position right away, so the list is ordered after every push no
    /// matter how the catalog ordered its rows.
    pub fn push(&mut self, row: RawIndexRow) {
        let column = row.index_column();

        if let Some(index) = self.indexes.get_mut(&row.index_name) {
            index.columns.push(column);
            index.columns.sort_by_key(|c| c.ordinal_position);
            return;
        }

        let kind = IndexKind::classify(
            &row.index_name,
            row.unique,
            row.index_type.as_deref(),
            &self.primary_key_name,
        );
        let index = Index {
            database_name: self.database_name.clone(),
            schema_name: self.schema_name.clone(),
            table_name: self.table_name.clone(),
            name: row.index_name.clone(),
            unique: row.unique,
            kind,
            comment: row.comment,
            columns: vec![column],
        };
        self.indexes.insert(row.index_name, index);
    }

    /// Finish, returning indexes in first-seen order.
    pub fn finish(self) -> Vec<Index> {
        self.indexes.into_values().collect()
    }
}

impl Extend<RawIndexRow> for IndexAggregator {
    fn extend<I: IntoIterator<Item = RawIndexRow>>(&mut self, rows: I) {
        for row in rows {
            self.push(row);
        }
    }
}
