use gridsheet_eval::{CellValue, FormulaError, Position, Sheet, SheetError};

fn pos(a1: &str) -> Position {
    Position::from_a1(a1).unwrap()
}

fn value(sheet: &Sheet, a1: &str) -> CellValue {
    sheet
        .get_cell(pos(a1))
        .unwrap()
        .expect("cell should exist")
        .value(sheet)
}

fn text(sheet: &Sheet, a1: &str) -> String {
    sheet
        .get_cell(pos(a1))
        .unwrap()
        .expect("cell should exist")
        .text()
        .to_string()
}

#[test]
fn text_round_trips() {
    let mut sheet = Sheet::new();
    for input in ["hello", "=", "'=1+2", "  padded  ", "12x"] {
        sheet.set_cell(pos("A1"), input).unwrap();
        assert_eq!(text(&sheet, "A1"), input);
    }
}

#[test]
fn lone_equals_is_text() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=").unwrap();
    assert_eq!(value(&sheet, "A1"), CellValue::Text("=".to_string()));
    assert_eq!(text(&sheet, "A1"), "=");
}

#[test]
fn escape_sigil_is_kept_in_text_and_stripped_in_value() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "'=hello").unwrap();
    assert_eq!(text(&sheet, "A1"), "'=hello");
    assert_eq!(value(&sheet, "A1"), CellValue::Text("=hello".to_string()));
}

#[test]
fn formula_text_is_canonicalized() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=1+ 2*3").unwrap();
    assert_eq!(text(&sheet, "A1"), "=1+2*3");
    assert_eq!(value(&sheet, "A1"), CellValue::Number(7.0));
}

#[test]
fn formula_syntax_error_leaves_cell_unchanged() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "keep me").unwrap();

    let err = sheet.set_cell(pos("A1"), "=1+*2").unwrap_err();
    assert!(matches!(err, SheetError::Formula(_)));
    assert_eq!(text(&sheet, "A1"), "keep me");
}

#[test]
fn invalid_position_is_rejected_everywhere() {
    let mut sheet = Sheet::new();
    let bad = Position::INVALID;
    assert_eq!(sheet.set_cell(bad, "1"), Err(SheetError::InvalidPosition));
    assert_eq!(sheet.clear_cell(bad), Err(SheetError::InvalidPosition));
    assert!(sheet.get_cell(bad).is_err());
    assert_eq!(sheet.printable_size().rows, 0);
}

#[test]
fn absent_cell_reads_as_none() {
    let sheet = Sheet::new();
    assert!(sheet.get_cell(pos("Q42")).unwrap().is_none());
}

#[test]
fn dependency_recalculates_after_edit() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "2").unwrap();
    sheet.set_cell(pos("A2"), "=A1+3").unwrap();
    assert_eq!(value(&sheet, "A2"), CellValue::Number(5.0));

    sheet.set_cell(pos("A1"), "10").unwrap();
    assert_eq!(value(&sheet, "A2"), CellValue::Number(13.0));
}

#[test]
fn chained_dependencies_recalculate() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "1").unwrap();
    sheet.set_cell(pos("B1"), "=A1*2").unwrap();
    sheet.set_cell(pos("C1"), "=B1*2").unwrap();
    sheet.set_cell(pos("D1"), "=C1+B1").unwrap();
    assert_eq!(value(&sheet, "D1"), CellValue::Number(6.0));

    sheet.set_cell(pos("A1"), "5").unwrap();
    assert_eq!(value(&sheet, "D1"), CellValue::Number(30.0));
}

#[test]
fn non_numeric_text_operand_is_value_error() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "text").unwrap();
    sheet.set_cell(pos("B1"), "=A1+1").unwrap();
    assert_eq!(
        value(&sheet, "B1"),
        CellValue::Error(FormulaError::Value)
    );
}

#[test]
fn numeric_text_operand_is_usable() {
    // The permissive rule: a text value that parses in full as a number
    // acts as that number, even behind the escape sigil.
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "'123").unwrap();
    sheet.set_cell(pos("B1"), "=A1").unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Number(123.0));

    sheet.set_cell(pos("A2"), "2.5").unwrap();
    sheet.set_cell(pos("B2"), "=A2*2").unwrap();
    assert_eq!(value(&sheet, "B2"), CellValue::Number(5.0));
}

#[test]
fn escape_only_text_counts_as_zero() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "'").unwrap();
    sheet.set_cell(pos("B1"), "=A1+1").unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Number(1.0));
}

#[test]
fn absent_and_empty_references_count_as_zero() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("B1"), "=A1+7").unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Number(7.0));
}

#[test]
fn division_by_zero_is_arithmetic_error() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=1/0").unwrap();
    assert_eq!(
        value(&sheet, "A1"),
        CellValue::Error(FormulaError::Arithmetic)
    );
}

#[test]
fn errors_propagate_through_referencing_formulas() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=1/0").unwrap();
    sheet.set_cell(pos("B1"), "=A1+1").unwrap();
    assert_eq!(
        value(&sheet, "B1"),
        CellValue::Error(FormulaError::Arithmetic)
    );
}

#[test]
fn out_of_range_reference_is_ref_error() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=ZZZZ123+1").unwrap();
    assert_eq!(value(&sheet, "A1"), CellValue::Error(FormulaError::Ref));
}

#[test]
fn clear_is_idempotent() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "5").unwrap();
    sheet.clear_cell(pos("A1")).unwrap();
    assert!(sheet.get_cell(pos("A1")).unwrap().is_none());
    sheet.clear_cell(pos("A1")).unwrap();
    assert!(sheet.get_cell(pos("A1")).unwrap().is_none());
}

#[test]
fn clearing_a_dependency_recalculates_referrers() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "4").unwrap();
    sheet.set_cell(pos("B1"), "=A1*10").unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Number(40.0));

    sheet.clear_cell(pos("A1")).unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Number(0.0));
}

#[test]
fn referenced_empty_cell_stays_materialized() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("B1"), "=A1").unwrap();

    // A1 was materialized to back the reference and must stay while B1
    // points at it, even through an explicit clear.
    let a1 = sheet.get_cell(pos("A1")).unwrap().expect("materialized");
    assert!(a1.is_referenced());
    assert_eq!(a1.text(), "");

    sheet.clear_cell(pos("A1")).unwrap();
    assert!(sheet.get_cell(pos("A1")).unwrap().is_some());

    // Once B1 no longer references it, clearing reclaims it.
    sheet.set_cell(pos("B1"), "1").unwrap();
    sheet.clear_cell(pos("A1")).unwrap();
    assert!(sheet.get_cell(pos("A1")).unwrap().is_none());
}

#[test]
fn materialized_empty_cells_outlive_the_referencing_formula() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("B1"), "=A1").unwrap();
    sheet.set_cell(pos("B1"), "7").unwrap();

    // The backing cell persists until explicitly cleared.
    assert!(sheet.get_cell(pos("A1")).unwrap().is_some());
    sheet.clear_cell(pos("A1")).unwrap();
    assert!(sheet.get_cell(pos("A1")).unwrap().is_none());
}

#[test]
fn replacing_a_formula_rewires_edges() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "1").unwrap();
    sheet.set_cell(pos("A2"), "2").unwrap();
    sheet.set_cell(pos("B1"), "=A1").unwrap();
    assert!(sheet.get_cell(pos("A1")).unwrap().unwrap().is_referenced());

    sheet.set_cell(pos("B1"), "=A2").unwrap();
    assert!(!sheet.get_cell(pos("A1")).unwrap().unwrap().is_referenced());
    assert!(sheet.get_cell(pos("A2")).unwrap().unwrap().is_referenced());

    // Old dependency edits no longer disturb B1.
    sheet.set_cell(pos("A1"), "100").unwrap();
    assert_eq!(value(&sheet, "B1"), CellValue::Number(2.0));
}

#[test]
fn referenced_cells_are_sorted_and_deduplicated() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("C1"), "=B2+A1*B2+A10").unwrap();
    let refs = sheet
        .get_cell(pos("C1"))
        .unwrap()
        .unwrap()
        .referenced_cells()
        .to_vec();
    assert_eq!(refs, vec![pos("A1"), pos("B2"), pos("A10")]);
}
