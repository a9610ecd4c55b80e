//! Cell id parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell ids
//! (e.g., "A1", "B12", "Z100") and coordinates. Columns are a single letter
//! `A`-`Z`; rows are stored zero-indexed and written one-indexed.
//!
//! # Examples
//!
//! ```ignore
//! let id = CellId::parse("B3").unwrap();
//! assert_eq!(id.col, 1);  // 0-indexed
//! assert_eq!(id.row, 2);
//! assert_eq!(id.to_string(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use super::FormulaError;

/// Number of columns in the grid (A-Z).
pub const GRID_COLS: usize = 26;
/// Number of rows in the grid (1-100).
pub const GRID_ROWS: usize = 100;

/// A cell address. Ordering is row-major, matching the grid's cell order.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellId {
    pub row: usize,
    pub col: usize,
}

fn cell_id_re() -> &'static Regex {
    static CELL_ID_RE: OnceLock<Regex> = OnceLock::new();
    CELL_ID_RE.get_or_init(|| {
        Regex::new(r"^(?<letter>[A-Z])(?<number>[1-9][0-9]*)$").expect("cell id regex must compile")
    })
}

impl CellId {
    pub fn new(col: usize, row: usize) -> CellId {
        CellId { row, col }
    }

    /// Parse a cell id from spreadsheet notation (e.g., "A1", "Z100").
    ///
    /// Only single uppercase column letters are accepted. Rows past the grid
    /// are syntactically valid; use [`CellId::in_grid`] to check bounds.
    pub fn parse(name: &str) -> Option<CellId> {
        let caps = cell_id_re().captures(name)?;
        let col = (caps["letter"].as_bytes()[0] - b'A') as usize;
        let row = caps["number"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellId::new(col, row))
    }

    /// Column letter for a zero-indexed column (0 -> A, 25 -> Z).
    pub fn col_letter(col: usize) -> char {
        debug_assert!(col < GRID_COLS);
        (b'A' + (col % GRID_COLS) as u8) as char
    }

    /// Whether the id lies inside the 26 x 100 grid.
    pub fn in_grid(&self) -> bool {
        self.col < GRID_COLS && self.row < GRID_ROWS
    }

    /// The id `dx` columns and `dy` rows away, if still inside the grid.
    pub fn offset(&self, dx: isize, dy: isize) -> Option<CellId> {
        let col = self.col.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        let moved = CellId::new(col, row);
        moved.in_grid().then_some(moved)
    }

    /// Every id in the grid, row by row.
    pub fn all() -> impl Iterator<Item = CellId> {
        (0..GRID_ROWS).flat_map(|row| (0..GRID_COLS).map(move |col| CellId::new(col, row)))
    }
}

impl std::str::FromStr for CellId {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellId::parse(s).ok_or_else(|| FormulaError::InvalidReference(s.to_string()))
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellId::col_letter(self.col), self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_multi_letter_columns() {
        assert!(CellId::parse("AA1").is_none());
    }

    #[test]
    fn test_parse_rejects_leading_zero_rows() {
        assert!(CellId::parse("A01").is_none());
        assert!(CellId::parse("A0").is_none());
    }

    #[test]
    fn test_rows_past_grid_parse_but_are_out_of_grid() {
        let id = CellId::parse("C101").unwrap();
        assert_eq!(id, CellId::new(2, 100));
        assert!(!id.in_grid());
        assert!(CellId::parse("Z100").unwrap().in_grid());
    }

    #[test]
    fn test_offset_stops_at_edges() {
        let a1 = CellId::new(0, 0);
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(a1.offset(1, 1), Some(CellId::new(1, 1)));
        assert_eq!(CellId::new(25, 99).offset(1, 0), None);
        assert_eq!(CellId::new(25, 99).offset(0, 1), None);
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut ids = vec![CellId::new(0, 1), CellId::new(1, 0), CellId::new(0, 0)];
        ids.sort();
        assert_eq!(ids, vec![CellId::new(0, 0), CellId::new(1, 0), CellId::new(0, 1)]);
    }

    #[test]
    fn test_all_covers_grid() {
        assert_eq!(CellId::all().count(), GRID_COLS * GRID_ROWS);
        assert_eq!(CellId::all().nth(26), Some(CellId::new(0, 1)));
    }
}
