//! Grid coordinates and their canonical A1 textual form.
//!
//! `Position` is a 0-based (row, column) pair with the same limits in both
//! directions: 16,384 rows × 16,384 columns. The textual form is column
//! letters (`A..Z`, `AA..AZ`, `BA..`) followed by the 1-based row number.

use core::fmt;

use once_cell::sync::Lazy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest supported grid extent, rows and columns alike.
pub const MAX_ROWS: u32 = 16_384;
pub const MAX_COLS: u32 = 16_384;

// Column lookup table for common columns (A-ZZ = 702 columns)
static COLUMN_LOOKUP: Lazy<Vec<String>> = Lazy::new(|| {
    let mut cols = Vec::with_capacity(702);
    for c in b'A'..=b'Z' {
        cols.push(String::from(c as char));
    }
    for c1 in b'A'..=b'Z' {
        for c2 in b'A'..=b'Z' {
            cols.push(format!("{}{}", c1 as char, c2 as char));
        }
    }
    cols
});

/// Errors returned when parsing a textual cell position.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PositionParseError {
    /// Input was empty or stopped before the row number.
    Truncated,
    /// Input deviates from `[A-Z]+[1-9][0-9]*` (lowercase letters, a leading
    /// zero in the row, trailing garbage).
    Malformed,
    /// Well-formed but outside the supported grid.
    OutOfRange,
}

impl fmt::Display for PositionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionParseError::Truncated => write!(f, "position is missing its row number"),
            PositionParseError::Malformed => {
                write!(f, "position does not match column letters + row number")
            }
            PositionParseError::OutOfRange => {
                write!(f, "position exceeds {MAX_ROWS} rows x {MAX_COLS} columns")
            }
        }
    }
}

impl std::error::Error for PositionParseError {}

/// A 0-based grid coordinate.
///
/// The `INVALID` sentinel represents a reference that was syntactically
/// A1-shaped but names a cell outside the grid; it keeps such references
/// representable so they can surface as a `#REF!` error at evaluation time.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub const INVALID: Self = Position {
        row: u32::MAX,
        col: u32::MAX,
    };

    pub const fn new(row: u32, col: u32) -> Self {
        Position { row, col }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.row < MAX_ROWS && self.col < MAX_COLS
    }

    /// Parse the canonical form `[A-Z]+[1-9][0-9]*`, e.g. `A1` or `ZZ99`.
    pub fn from_a1(s: &str) -> Result<Self, PositionParseError> {
        let bytes = s.as_bytes();
        if bytes.is_empty() {
            return Err(PositionParseError::Truncated);
        }

        let mut i = 0;
        while i < bytes.len() && bytes[i].is_ascii_uppercase() {
            i += 1;
        }
        if i == 0 {
            return Err(PositionParseError::Malformed);
        }
        if i == bytes.len() {
            return Err(PositionParseError::Truncated);
        }

        let col = letters_to_column_index(&s[..i]).ok_or(PositionParseError::OutOfRange)?;

        let row_part = &bytes[i..];
        if row_part[0] == b'0' || !row_part.iter().all(|b| b.is_ascii_digit()) {
            return Err(PositionParseError::Malformed);
        }
        let row_1based = s[i..]
            .parse::<u32>()
            .map_err(|_| PositionParseError::OutOfRange)?;

        let pos = Position::new(row_1based - 1, col);
        if !pos.is_valid() {
            return Err(PositionParseError::OutOfRange);
        }
        Ok(pos)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_to_letters(self.col), self.row + 1)
    }
}

/// The minimal bounding rectangle of a sheet's printable area.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Size {
    pub rows: u32,
    pub cols: u32,
}

fn column_to_letters(col: u32) -> String {
    if col < 702 {
        return COLUMN_LOOKUP[col as usize].clone();
    }

    let mut col = col;
    let mut buf = Vec::new();
    loop {
        let rem = (col % 26) as u8;
        buf.push(b'A' + rem);
        col /= 26;
        if col == 0 {
            break;
        }
        col -= 1;
    }
    buf.reverse();
    String::from_utf8(buf).expect("only ASCII A-Z")
}

fn letters_to_column_index(s: &str) -> Option<u32> {
    let mut col: u32 = 0;
    for (idx, ch) in s.bytes().enumerate() {
        let val = (ch - b'A') as u32;
        col = col.checked_mul(26)?;
        col = col.checked_add(val)?;
        if idx != s.len() - 1 {
            col = col.checked_add(1)?;
        }
    }
    (col < MAX_COLS).then_some(col)
}
