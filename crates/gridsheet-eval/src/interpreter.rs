//! Recursive evaluation of formula ASTs against a cell lookup.

use gridsheet_common::{FormulaError, Position};
use gridsheet_parse::{AstNode, BinaryOp, UnaryOp};

/// Evaluate `node`, resolving references through `lookup`.
///
/// Any operand error short-circuits the whole expression. Every produced
/// number, literals included, must be finite; division by zero and overflow
/// to infinity or NaN both surface as [`FormulaError::Arithmetic`].
pub(crate) fn evaluate<F>(node: &AstNode, lookup: &F) -> Result<f64, FormulaError>
where
    F: Fn(Position) -> Result<f64, FormulaError>,
{
    match node {
        AstNode::Number(n) => sanitize(*n),
        AstNode::Reference { pos, .. } => {
            if !pos.is_valid() {
                return Err(FormulaError::Ref);
            }
            lookup(*pos)
        }
        AstNode::UnaryOp { op, expr } => {
            let value = evaluate(expr, lookup)?;
            match op {
                UnaryOp::Plus => Ok(value),
                UnaryOp::Minus => sanitize(-value),
            }
        }
        AstNode::BinaryOp { op, left, right } => {
            let lhs = evaluate(left, lookup)?;
            let rhs = evaluate(right, lookup)?;
            match op {
                BinaryOp::Add => sanitize(lhs + rhs),
                BinaryOp::Sub => sanitize(lhs - rhs),
                BinaryOp::Mul => sanitize(lhs * rhs),
                BinaryOp::Div => {
                    if rhs == 0.0 {
                        return Err(FormulaError::Arithmetic);
                    }
                    sanitize(lhs / rhs)
                }
            }
        }
    }
}

#[inline]
fn sanitize(n: f64) -> Result<f64, FormulaError> {
    if n.is_finite() {
        Ok(n)
    } else {
        Err(FormulaError::Arithmetic)
    }
}
