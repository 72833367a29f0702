//! Type-size parsing.
//!
//! Turns a raw column type declaration (`decimal(10,2)`, `varchar(255)`,
//! `enum('a','b')`) into the size, scale or value list it carries.
//!
//! # Failure policy
//!
//! Parsing is best-effort. [`parse_type_size`] reports why a declaration
//! is malformed, but [`apply_type_size`] treats any failure as a no-op: the
//! column keeps whatever size and scale it already had and the row is still
//! emitted. One odd type string must never abort a whole column listing.
//! Application is all-or-nothing; a half-parsed qualifier changes nothing.

use std::num::ParseIntError;

use thiserror::Error;
use tracing::trace;

use crate::model::Column;

/// What a parenthesized type qualifier carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeQualifier {
    /// Value list of an enumerated type, verbatim (`'a','b','c'`).
    Values(String),
    /// A single size (`varchar(255)`).
    Size(i32),
    /// Size and scale (`decimal(10,2)`). A blank operand is `None`.
    Precision {
        size: Option<i32>,
        scale: Option<i32>,
    },
}

/// Why a type declaration could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeSizeError {
    #[error("unbalanced parentheses in `{0}`")]
    UnbalancedParens(String),

    #[error("invalid number `{operand}`: {source}")]
    InvalidNumber {
        operand: String,
        #[source]
        source: ParseIntError,
    },

    #[error("too many operands in `{0}`")]
    TooManyOperands(String),
}

/// Parse the qualifier of a type declaration.
///
/// `base_type` is the already-extracted type name; when it is one of
/// `enumerated` (case-insensitive) the parenthesized content is returned as
/// a value list without further parsing.
///
/// Returns `Ok(None)` when the declaration has no parentheses.
pub fn parse_type_size(
    declaration: &str,
    base_type: &str,
    enumerated: &[&str],
) -> Result<Option<TypeQualifier>, TypeSizeError> {
    let Some(open) = declaration.find('(') else {
        return Ok(None);
    };
    let close = declaration
        .rfind(')')
        .filter(|&close| close > open)
        .ok_or_else(|| TypeSizeError::UnbalancedParens(declaration.to_string()))?;
    let content = &declaration[open + 1..close];

    if enumerated.iter().any(|t| t.eq_ignore_ascii_case(base_type)) {
        return Ok(Some(TypeQualifier::Values(content.to_string())));
    }

    let operands: Vec<&str> = content.split(',').collect();
    match operands.as_slice() {
        [size] => Ok(Some(TypeQualifier::Size(parse_operand(size)?))),
        [size, scale] => Ok(Some(TypeQualifier::Precision {
            size: parse_optional(size)?,
            scale: parse_optional(scale)?,
        })),
        _ => Err(TypeSizeError::TooManyOperands(declaration.to_string())),
    }
}

fn parse_operand(operand: &str) -> Result<i32, TypeSizeError> {
    operand
        .trim()
        .parse()
        .map_err(|source| TypeSizeError::InvalidNumber {
            operand: operand.to_string(),
            source,
        })
}

fn parse_optional(operand: &str) -> Result<Option<i32>, TypeSizeError> {
    if operand.trim().is_empty() {
        Ok(None)
    } else {
        parse_operand(operand).map(Some)
    }
}

/// Apply a declaration's qualifier to a column, best-effort.
///
/// Uses `column.column_type` as the base type. A missing declaration or a
/// parse failure leaves the column untouched. Blank precision operands
/// leave the corresponding field untouched too.
pub fn apply_type_size(column: &mut Column, declaration: Option<&str>, enumerated: &[&str]) {
    let Some(declaration) = declaration else {
        return;
    };

    match parse_type_size(declaration, &column.column_type, enumerated) {
        Ok(None) => {}
        Ok(Some(TypeQualifier::Values(values))) => column.set_values(values),
        Ok(Some(TypeQualifier::Size(size))) => column.set_size(size),
        Ok(Some(TypeQualifier::Precision { size, scale })) => {
            if let Some(size) = size {
                column.set_size(size);
            }
            if scale.is_some() {
                column.decimal_digits = scale;
            }
        }
        Err(err) => {
            trace!(
                column = %column.name,
                declaration,
                error = %err,
                "ignoring unparseable type declaration"
            );
        }
    }
}
