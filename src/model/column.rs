//! Column entity.

use serde::{Deserialize, Serialize};

use super::non_blank;

/// A table column as reported by the catalog.
///
/// The declared size and the enumerated value list are mutually exclusive:
/// setting one through [`Column::set_size`] or [`Column::set_values`] clears
/// the other. They are private for that reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Owning database.
    pub database_name: String,
    /// Owning schema. `None` for dialects without a schema level.
    pub schema_name: Option<String>,
    /// Owning table.
    pub table_name: String,
    /// Current column name.
    pub name: String,
    /// Name before a pending rename. Equal to `name` on fresh reads.
    pub old_name: String,
    /// Canonical upper-case type name (`VARCHAR`, `DECIMAL`, ...).
    pub column_type: String,
    /// Nullability. Serialized as `1` (nullable) or `0` (not nullable).
    #[serde(with = "int_flag")]
    pub nullable: bool,
    /// Default value expression, verbatim.
    pub default_value: Option<String>,
    /// Whether the column auto-increments.
    pub auto_increment: bool,
    /// Whether the column is part of the primary key.
    pub primary_key: bool,
    /// 1-based position within the table.
    pub ordinal_position: i32,
    /// Numeric scale.
    pub decimal_digits: Option<i32>,
    /// Character set, for string types.
    pub char_set_name: Option<String>,
    /// Collation, for string types.
    pub collation_name: Option<String>,
    /// Column comment.
    pub comment: Option<String>,
    column_size: Option<i32>,
    value: Option<String>,
}

impl Column {
    /// Create a column with identity fields only. `old_name` mirrors `name`.
    pub fn new(
        database: &str,
        schema: Option<&str>,
        table: &str,
        name: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            database_name: database.to_string(),
            schema_name: non_blank(schema),
            table_name: table.to_string(),
            old_name: name.clone(),
            name,
            ..Default::default()
        }
    }

    /// Declared size (length or precision).
    pub fn column_size(&self) -> Option<i32> {
        self.column_size
    }

    /// Enumerated value list of an `ENUM`/`SET` column, verbatim
    /// (`'a','b','c'`).
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Set the declared size. Clears any enumerated value list.
    pub fn set_size(&mut self, size: i32) {
        self.column_size = Some(size);
        self.value = None;
    }

    /// Set the enumerated value list. Clears any declared size.
    pub fn set_values(&mut self, values: impl Into<String>) {
        self.value = Some(values.into());
        self.column_size = None;
    }
}

/// Boolean carried as an integer flag on the wire.
///
/// Accepts either integers or booleans when reading.
mod int_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Int(i64),
        Bool(bool),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Flag::deserialize(deserializer)? {
            Flag::Int(i) => i != 0,
            Flag::Bool(b) => b,
        })
    }
}
