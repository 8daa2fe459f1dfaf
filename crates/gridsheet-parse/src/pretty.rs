//! Canonical rendering of formula ASTs.
//!
//! The canonical form carries minimal parentheses consistent with precedence
//! and left associativity, drops redundant unary `+`, and prints numbers in
//! their shortest round-trippable decimal form. It is what a formula cell
//! stores as its raw text after the `=` sigil.

use crate::parser::{AstNode, BinaryOp, UnaryOp};

/// Render `ast` in canonical form.
pub fn canonical(ast: &AstNode) -> String {
    let mut out = String::new();
    write_node(&mut out, ast);
    out
}

// Operands outrank every operator; unary sign outranks all binary operators.
fn node_precedence(node: &AstNode) -> u8 {
    match node {
        AstNode::Number(_) | AstNode::Reference { .. } => 4,
        AstNode::UnaryOp { .. } => 3,
        AstNode::BinaryOp { op, .. } => op.precedence(),
    }
}

fn write_node(out: &mut String, node: &AstNode) {
    match node {
        AstNode::Number(n) => out.push_str(&n.to_string()),
        AstNode::Reference { original, .. } => out.push_str(original),
        AstNode::UnaryOp { op, expr } => {
            if *op == UnaryOp::Minus {
                out.push('-');
            }
            // Unary sign outranks binary operators, so a binary operand
            // keeps its parentheses; anything else prints bare.
            let parens = matches!(**expr, AstNode::BinaryOp { .. });
            write_child(out, expr, parens);
        }
        AstNode::BinaryOp { op, left, right } => {
            write_child(out, left, node_precedence(left) < op.precedence());
            out.push_str(op.symbol());
            // The right operand of `-` and `/` re-groups at equal
            // precedence, so it keeps its parentheses there too.
            let right_prec = node_precedence(right);
            let parens = right_prec < op.precedence()
                || (right_prec == op.precedence()
                    && matches!(op, BinaryOp::Sub | BinaryOp::Div));
            write_child(out, right, parens);
        }
    }
}

fn write_child(out: &mut String, node: &AstNode, parens: bool) {
    if parens {
        out.push('(');
        write_node(out, node);
        out.push(')');
    } else {
        write_node(out, node);
    }
}
