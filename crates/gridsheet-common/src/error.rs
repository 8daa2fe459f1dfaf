//! The two error planes of the engine.
//!
//! - [`FormulaError`] is a *value*: a typed evaluation failure that flows
//!   through cell values, propagates through arithmetic and renders as its
//!   canonical `#…!` token.
//! - [`SheetError`] is *structural*: API misuse or a syntactically bad edit.
//!   Operations that return it abort and leave the sheet unchanged.

use std::{error::Error, fmt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A typed formula evaluation failure.
///
/// Names are CamelCase while `Display` renders the canonical token
/// (`#REF!`, `#VALUE!`, `#ARITHM!`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FormulaError {
    /// A reference names a position outside the grid.
    Ref,
    /// Non-numeric text was used as an arithmetic operand.
    Value,
    /// Division by zero, or a non-finite intermediate result.
    Arithmetic,
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormulaError::Ref => "#REF!",
            FormulaError::Value => "#VALUE!",
            FormulaError::Arithmetic => "#ARITHM!",
        })
    }
}

impl Error for FormulaError {}

/// Structural errors surfaced at the sheet API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// An invalid [`Position`](crate::Position) was passed to a sheet operation.
    InvalidPosition,
    /// The body of a formula failed to parse.
    Formula(String),
    /// Committing the edit would close a reference cycle.
    CircularDependency,
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetError::InvalidPosition => write!(f, "invalid cell position"),
            SheetError::Formula(msg) => write!(f, "invalid formula: {msg}"),
            SheetError::CircularDependency => write!(f, "circular dependency"),
        }
    }
}

impl Error for SheetError {}
