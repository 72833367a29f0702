//! Catalog metadata normalization.
//!
//! Reads catalog metadata through a caller-supplied query provider and
//! maps it into the dialect-neutral model.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     MetadataNormalizer                          │
//! │  ┌───────────────────────────┬───────────────────────────────┐  │
//! │  │  Catalog reads            │  Local                        │  │
//! │  │  - databases()            │  - table_meta()               │  │
//! │  │  - tables() / table_ddl() │  - quote_identifiers()        │  │
//! │  │  - columns()  ──► type_size                               │  │
//! │  │  - indexes()  ──► IndexAggregator                         │  │
//! │  │  - view() / trigger(s)()  │                               │  │
//! │  │  - function(s)() / procedure(s)()                         │  │
//! │  └───────────────────────────┴───────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//!            │ statement text + labels         │ rows
//!            ▼                                 ▲
//! ┌──────────────────────────┐   ┌──────────────────────────────────┐
//! │   dyn CatalogDialect     │   │   CatalogQueryProvider           │
//! │   (MySql, ...)           │   │   (driver glue, MemoryCatalog)   │
//! └──────────────────────────┘   └──────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use dbscope::dialect::Dialect;
//! use dbscope::metadata::MetadataNormalizer;
//!
//! let normalizer = MetadataNormalizer::new(provider, Dialect::MySql);
//!
//! let databases = normalizer.databases(&conn)?;
//! let columns = normalizer.columns(&conn, "shop", None, "orders")?;
//! let ghost = normalizer.trigger(&conn, "shop", None, "missing")?;
//! assert_eq!(ghost.body, None);
//! ```

mod error;
mod index;
mod memory;
mod normalizer;
mod provider;
mod sorter;
mod type_size;

pub use error::{CatalogError, CatalogResult};
pub use index::{IndexAggregator, RawIndexRow};
pub use memory::{MemoryCatalog, MemoryRow};
pub use normalizer::MetadataNormalizer;
pub use provider::{CatalogQueryProvider, CatalogRow, RowCursor};
pub use sorter::{is_system, DatabaseSorter, SystemLast};
pub use type_size::{apply_type_size, parse_type_size, TypeQualifier, TypeSizeError};
