//! A single cell: its content, its place in the dependency graph, and its
//! evaluation cache.

use std::cell::RefCell;

use rustc_hash::FxHashSet;

use gridsheet_common::{CellValue, FormulaError, Position};

use crate::formula::Formula;
use crate::sheet::Sheet;

/// Introduces a formula when followed by at least one more character.
pub const FORMULA_SIGN: char = '=';
/// Forces text interpretation; kept in the raw text, stripped from the value.
pub const ESCAPE_SIGN: char = '\'';

/// Formula content: the parsed formula, its raw text (`=` + canonical
/// expression) and the one-slot evaluation cache.
///
/// The cache sits behind a `RefCell` so the read path stays `&self`; it is
/// the only thing evaluation ever writes.
#[derive(Debug)]
pub(crate) struct FormulaContent {
    formula: Formula,
    text: String,
    cache: RefCell<Option<Result<f64, FormulaError>>>,
}

impl FormulaContent {
    pub(crate) fn new(formula: Formula) -> Self {
        let text = format!("{FORMULA_SIGN}{}", formula.expression());
        FormulaContent {
            formula,
            text,
            cache: RefCell::new(None),
        }
    }

    pub(crate) fn referenced_cells(&self) -> &[Position] {
        self.formula.referenced_cells()
    }
}

/// What a cell holds: nothing, literal text, or a formula.
#[derive(Debug)]
pub(crate) enum CellContent {
    Empty,
    Text(String),
    Formula(FormulaContent),
}

/// A cell owned by a [`Sheet`].
///
/// Besides its content a cell records both directions of the dependency
/// graph: `to_cells` are the positions its formula references, `from_cells`
/// the positions whose formulas reference it. Peers are addressed by
/// position and re-looked-up through the sheet, so reclaiming a cell can
/// never leave a dangling edge.
#[derive(Debug)]
pub struct Cell {
    content: CellContent,
    pub(crate) to_cells: FxHashSet<Position>,
    pub(crate) from_cells: FxHashSet<Position>,
}

impl Cell {
    pub(crate) fn new() -> Self {
        Cell {
            content: CellContent::Empty,
            to_cells: FxHashSet::default(),
            from_cells: FxHashSet::default(),
        }
    }

    pub(crate) fn set_content(&mut self, content: CellContent) {
        self.content = content;
    }

    /// The value this cell presents to readers.
    ///
    /// Formula cells consult their cache first and fill it on a miss;
    /// every edit invalidates caches transitively, so a filled slot is
    /// always current.
    pub fn value(&self, sheet: &Sheet) -> CellValue {
        match &self.content {
            CellContent::Empty => CellValue::Empty,
            CellContent::Text(raw) => {
                let shown = raw.strip_prefix(ESCAPE_SIGN).unwrap_or(raw);
                CellValue::Text(shown.to_string())
            }
            CellContent::Formula(fc) => {
                if let Some(result) = *fc.cache.borrow() {
                    return result.into();
                }
                let result = fc.formula.evaluate(|pos| sheet.lookup_number(pos));
                *fc.cache.borrow_mut() = Some(result);
                result.into()
            }
        }
    }

    /// The raw text as entered, except that formula cells report `=` plus
    /// the canonical expression.
    pub fn text(&self) -> &str {
        match &self.content {
            CellContent::Empty => "",
            CellContent::Text(raw) => raw,
            CellContent::Formula(fc) => &fc.text,
        }
    }

    /// Positions named by the current content; empty for non-formulas.
    pub fn referenced_cells(&self) -> &[Position] {
        match &self.content {
            CellContent::Formula(fc) => fc.formula.referenced_cells(),
            _ => &[],
        }
    }

    /// Whether any other cell's formula references this one.
    pub fn is_referenced(&self) -> bool {
        !self.from_cells.is_empty()
    }

    pub(crate) fn invalidate(&self) {
        if let CellContent::Formula(fc) = &self.content {
            fc.cache.borrow_mut().take();
        }
    }
}
