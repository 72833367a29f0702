//! Triggers and stored routines.

use serde::{Deserialize, Serialize};

use super::non_blank;

/// A trigger.
///
/// List reads carry the name only; `event` and `body` are filled when a
/// single trigger is fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    /// Owning database.
    pub database_name: String,
    /// Owning schema. `None` for dialects without a schema level.
    pub schema_name: Option<String>,
    /// Trigger name.
    pub name: String,
    /// Triggering statement kind (`INSERT`, `UPDATE`, `DELETE`).
    pub event: Option<String>,
    /// Trigger body.
    pub body: Option<String>,
}

impl Trigger {
    /// Identity-only trigger, ready to be enriched.
    pub fn shell(database: &str, schema: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            database_name: database.to_string(),
            schema_name: non_blank(schema),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Stored routine kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutineKind {
    Function,
    Procedure,
}

impl RoutineKind {
    /// Catalog keyword (`FUNCTION` / `PROCEDURE`).
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutineKind::Function => "FUNCTION",
            RoutineKind::Procedure => "PROCEDURE",
        }
    }
}

impl std::fmt::Display for RoutineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored function or procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    /// Function or procedure.
    pub kind: RoutineKind,
    /// Owning database.
    pub database_name: String,
    /// Owning schema. `None` for dialects without a schema level.
    pub schema_name: Option<String>,
    /// Routine name.
    pub name: String,
    /// Internal specific name from the routines catalog.
    pub specific_name: Option<String>,
    /// Routine comment.
    pub comment: Option<String>,
    /// Full `CREATE FUNCTION` / `CREATE PROCEDURE` text.
    pub body: Option<String>,
}

impl Routine {
    /// Identity-only routine, ready to be enriched.
    pub fn shell(
        kind: RoutineKind,
        database: &str,
        schema: Option<&str>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            database_name: database.to_string(),
            schema_name: non_blank(schema),
            name: name.into(),
            specific_name: None,
            comment: None,
            body: None,
        }
    }
}
