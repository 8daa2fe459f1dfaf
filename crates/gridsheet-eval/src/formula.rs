//! The formula facade: an owned AST plus the derived data the cell and
//! sheet layers need, namely the canonical expression text and the set of
//! valid referenced positions.

use gridsheet_common::{FormulaError, Position};
use gridsheet_parse::{canonical, parse, AstNode, ParserError};

use crate::interpreter;

/// A parsed formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    ast: AstNode,
    expression: String,
    referenced: Vec<Position>,
}

impl Formula {
    /// Parse a formula body (the text after the leading `=`).
    pub fn parse(body: &str) -> Result<Self, ParserError> {
        let ast = parse(body)?;
        let expression = canonical(&ast);

        // Invalid references stay in the AST (they evaluate to #REF!) but
        // are never registered as dependencies.
        let mut referenced: Vec<Position> = ast
            .referenced_cells()
            .into_iter()
            .filter(|pos| pos.is_valid())
            .collect();
        referenced.sort_unstable();
        referenced.dedup();

        Ok(Formula {
            ast,
            expression,
            referenced,
        })
    }

    /// The canonical printed form of the expression, without the `=` sigil.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Valid positions this formula references, deduplicated and sorted.
    pub fn referenced_cells(&self) -> &[Position] {
        &self.referenced
    }

    /// Evaluate against `lookup`, which resolves a referenced position to a
    /// number or to the error its cell is in.
    pub fn evaluate<F>(&self, lookup: F) -> Result<f64, FormulaError>
    where
        F: Fn(Position) -> Result<f64, FormulaError>,
    {
        interpreter::evaluate(&self.ast, &lookup)
    }
}
