//! The sheet: a sparse table of owned cells and the entry point for every
//! mutation. The sheet coordinates what individual cells cannot do alone:
//! cycle rejection, edge bookkeeping, cache invalidation and reclamation.

use std::io::{self, Write};

use rustc_hash::{FxHashMap, FxHashSet};

use gridsheet_common::{CellValue, FormulaError, Position, SheetError, Size};

use crate::cell::{Cell, CellContent, FormulaContent, FORMULA_SIGN};
use crate::formula::Formula;

/// A sparse, in-memory sheet.
///
/// Cells materialize on first write or when a committed formula references
/// them; an Empty cell stays in the table for as long as something
/// references it.
#[derive(Debug, Default)]
pub struct Sheet {
    cells: FxHashMap<Position, Cell>,
}

impl Sheet {
    pub fn new() -> Self {
        Sheet::default()
    }

    /// Set the content of the cell at `pos` from raw input text.
    ///
    /// Classification: empty input empties the cell; `=` followed by at
    /// least one character is a formula (a lone `=` is text); everything
    /// else is text, with a leading `'` forcing text interpretation.
    ///
    /// Fails with [`SheetError::Formula`] on a formula syntax error and
    /// with [`SheetError::CircularDependency`] if committing would close a
    /// reference cycle. On any failure the sheet is left exactly as it was.
    pub fn set_cell(&mut self, pos: Position, text: &str) -> Result<(), SheetError> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition);
        }

        let content = classify(text)?;
        let new_refs: Vec<Position> = match &content {
            CellContent::Formula(fc) => fc.referenced_cells().to_vec(),
            _ => Vec::new(),
        };

        if self.creates_cycle(pos, &new_refs) {
            return Err(SheetError::CircularDependency);
        }

        // Point of no return: unlink the old outgoing edges, replace the
        // content in place (incoming edges survive), then wire up the new
        // references, materializing their targets as Empty where needed.
        let old_to: Vec<Position> = match self.cells.get_mut(&pos) {
            Some(cell) => cell.to_cells.drain().collect(),
            None => Vec::new(),
        };
        for target in old_to {
            if let Some(cell) = self.cells.get_mut(&target) {
                cell.from_cells.remove(&pos);
            }
        }

        let cell = self.cells.entry(pos).or_insert_with(Cell::new);
        cell.set_content(content);
        cell.to_cells = new_refs.iter().copied().collect();
        for reference in &new_refs {
            self.cells
                .entry(*reference)
                .or_insert_with(Cell::new)
                .from_cells
                .insert(pos);
        }

        self.invalidate_from(pos);
        Ok(())
    }

    /// A read-only handle to the cell at `pos`, or `None` if it was never
    /// materialized.
    pub fn get_cell(&self, pos: Position) -> Result<Option<&Cell>, SheetError> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition);
        }
        Ok(self.cells.get(&pos))
    }

    /// Empty the cell at `pos`. A cell nobody references is dropped from
    /// the table; a referenced one stays materialized as Empty. Clearing an
    /// absent cell is a no-op.
    pub fn clear_cell(&mut self, pos: Position) -> Result<(), SheetError> {
        if !pos.is_valid() {
            return Err(SheetError::InvalidPosition);
        }
        let Some(cell) = self.cells.get_mut(&pos) else {
            return Ok(());
        };

        let old_to: Vec<Position> = cell.to_cells.drain().collect();
        cell.set_content(CellContent::Empty);
        for target in old_to {
            if let Some(target_cell) = self.cells.get_mut(&target) {
                target_cell.from_cells.remove(&pos);
            }
        }

        self.invalidate_from(pos);

        if self.cells.get(&pos).is_some_and(|c| !c.is_referenced()) {
            self.cells.remove(&pos);
        }
        Ok(())
    }

    /// The minimal bounding rectangle covering every cell with non-empty
    /// raw text; `(0, 0)` when there is none.
    pub fn printable_size(&self) -> Size {
        let mut size = Size::default();
        for (pos, cell) in &self.cells {
            if cell.text().is_empty() {
                continue;
            }
            size.rows = size.rows.max(pos.row + 1);
            size.cols = size.cols.max(pos.col + 1);
        }
        size
    }

    /// Print evaluated values, row-major, tab-separated, one line per row.
    pub fn print_values<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_with(out, |cell| cell.value(self).to_string())
    }

    /// Print raw texts, row-major, tab-separated, one line per row.
    pub fn print_texts<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.print_with(out, |cell| cell.text().to_string())
    }

    fn print_with<W, F>(&self, out: &mut W, render: F) -> io::Result<()>
    where
        W: Write,
        F: Fn(&Cell) -> String,
    {
        let size = self.printable_size();
        for row in 0..size.rows {
            for col in 0..size.cols {
                if col > 0 {
                    write!(out, "\t")?;
                }
                if let Some(cell) = self.cells.get(&Position::new(row, col)) {
                    write!(out, "{}", render(cell))?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Resolve a reference during formula evaluation.
    ///
    /// Absent and Empty cells count as 0; a text value must parse in full
    /// as a number (the empty, escape-only string counts as 0); an
    /// erroring dependency propagates its own error.
    pub(crate) fn lookup_number(&self, pos: Position) -> Result<f64, FormulaError> {
        let Some(cell) = self.cells.get(&pos) else {
            return Ok(0.0);
        };
        match cell.value(self) {
            CellValue::Empty => Ok(0.0),
            CellValue::Number(n) => Ok(n),
            CellValue::Text(s) => {
                if s.is_empty() {
                    Ok(0.0)
                } else {
                    s.parse::<f64>().map_err(|_| FormulaError::Value)
                }
            }
            CellValue::Error(e) => Err(e),
        }
    }

    /// Would giving `pos` the references `new_refs` close a cycle?
    ///
    /// A new edge `pos -> r` closes a cycle iff `r` already reaches `pos`,
    /// i.e. iff `pos` reaches `r` backwards over `from_cells`. Walk the
    /// referrer closure from `pos` with a visited set and look for any
    /// member of `new_refs`; `pos` itself is visited first, so a
    /// self-reference is caught immediately. Absent cells have no edges
    /// and can never be part of a cycle.
    fn creates_cycle(&self, pos: Position, new_refs: &[Position]) -> bool {
        if new_refs.is_empty() {
            return false;
        }
        let referenced: FxHashSet<Position> = new_refs.iter().copied().collect();

        let mut visited = FxHashSet::default();
        let mut to_visit = vec![pos];
        while let Some(current) = to_visit.pop() {
            if !visited.insert(current) {
                continue;
            }
            if referenced.contains(&current) {
                return true;
            }
            if let Some(cell) = self.cells.get(&current) {
                to_visit.extend(cell.from_cells.iter().copied().filter(|p| !visited.contains(p)));
            }
        }
        false
    }

    /// Drop the cached value of `pos` and of every cell that transitively
    /// depends on it. Worklist plus visited set, so diamond-shaped
    /// dependencies are walked once.
    fn invalidate_from(&self, pos: Position) {
        let mut visited = FxHashSet::default();
        let mut to_visit = vec![pos];
        while let Some(current) = to_visit.pop() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(cell) = self.cells.get(&current) {
                cell.invalidate();
                to_visit.extend(cell.from_cells.iter().copied().filter(|p| !visited.contains(p)));
            }
        }
    }
}

fn classify(text: &str) -> Result<CellContent, SheetError> {
    if text.is_empty() {
        return Ok(CellContent::Empty);
    }
    if let Some(body) = text.strip_prefix(FORMULA_SIGN) {
        if !body.is_empty() {
            let formula =
                Formula::parse(body).map_err(|e| SheetError::Formula(e.to_string()))?;
            return Ok(CellContent::Formula(FormulaContent::new(formula)));
        }
    }
    Ok(CellContent::Text(text.to_string()))
}
