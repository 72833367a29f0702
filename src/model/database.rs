//! Database entity.

use serde::{Deserialize, Serialize};

/// A database visible on a connection.
///
/// For MySQL this is what `SHOW DATABASES` lists (MySQL calls them schemas).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    /// Database name.
    pub name: String,
    /// Whether this is one of the dialect's system databases.
    #[serde(default)]
    pub system: bool,
}

impl Database {
    /// A user database.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system: false,
        }
    }

    /// A database already known to be a system database.
    pub fn system(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system: true,
        }
    }
}
