//! # dbscope
//!
//! Catalog introspection that normalizes database metadata into a
//! dialect-neutral structural model.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          Host (driver, connection, query provider)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │  rows
//!                          ▼ [metadata]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 MetadataNormalizer                       │
//! │   type-size parser · index aggregator · shell entities   │
//! └─────────────────────────────────────────────────────────┘
//!           ▲ statements + labels          │
//!           │ [dialect]                    ▼ [model]
//! ┌──────────────────────────┐ ┌────────────────────────────┐
//! │  CatalogDialect (MySQL)  │ │  Database, Table, Column,  │
//! │  quoting, TableMeta      │ │  Index, Trigger, Routine   │
//! └──────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! dbscope does not open connections or generate DDL; it only reads and
//! normalizes what the catalog reports.

pub mod config;
pub mod dialect;
pub mod metadata;
pub mod model;

pub use config::Settings;
pub use dialect::{CatalogDialect, Dialect};
pub use metadata::{CatalogError, CatalogResult, MetadataNormalizer};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{MetadataSettings, Settings};
    pub use crate::dialect::{CatalogDialect, Dialect};
    pub use crate::metadata::{
        CatalogError, CatalogQueryProvider, CatalogResult, CatalogRow, DatabaseSorter,
        MetadataNormalizer, RowCursor, SystemLast,
    };
    pub use crate::model::{
        Column, Database, Index, IndexColumn, IndexKind, Routine, RoutineKind, Table, TableMeta,
        Trigger, View,
    };
}
