//! Meta crate that re-exports the primary gridsheet building blocks.
//! Downstream users can depend on this crate alone and still reach the
//! underlying layers when deeper integration is required.

pub use gridsheet_common as common;
pub use gridsheet_eval as eval;
pub use gridsheet_parse as parse;

pub use gridsheet_eval::{
    Cell, CellValue, Formula, FormulaError, ParserError, Position, Sheet, SheetError, Size,
};

pub mod doc_examples;
