use crate::{CellValue, Position, Sheet, SheetError};

/// Evaluate a single formula on a fresh sheet and return the resulting value.
///
/// This helper is intended for documentation examples to avoid repetitive setup.
///
/// # Example
///
/// ```rust
/// # use gridsheet::doc_examples::eval_formula;
/// let value = eval_formula("=1+2*3")?;
/// assert_eq!(value, gridsheet::CellValue::Number(7.0));
/// # Ok::<(), gridsheet::SheetError>(())
/// ```
pub fn eval_formula(formula: &str) -> Result<CellValue, SheetError> {
    let mut sheet = Sheet::new();
    let origin = Position::new(0, 0);
    sheet.set_cell(origin, formula)?;
    let value = sheet
        .get_cell(origin)?
        .map(|cell| cell.value(&sheet))
        .unwrap_or(CellValue::Empty);
    Ok(value)
}
