//! Rectangular ranges (`Start:End`) and the range sum used by `SUM`.

use super::cell_id::{CellId, GRID_ROWS};
use super::error::{FormulaError, Result};
use super::eval::CellLookup;

/// A block of cells from `start` to `end`, inclusive on both axes.
///
/// No normalization is performed: a range whose end lies before its start on
/// either axis contains no cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub start: CellId,
    pub end: CellId,
}

impl Range {
    pub fn new(start: CellId, end: CellId) -> Range {
        Range { start, end }
    }

    /// Parse a range like "A1:B5".
    pub fn parse(text: &str) -> Result<Range> {
        let (start, end) = text
            .split_once(':')
            .ok_or_else(|| FormulaError::InvalidRange(text.to_string()))?;
        Range::from_endpoints(start, end)
    }

    pub(crate) fn from_endpoints(start: &str, end: &str) -> Result<Range> {
        let start = start.trim().parse::<CellId>()?;
        let end = end.trim().parse::<CellId>()?;
        Ok(Range::new(start, end))
    }

    /// Cells in the range, column by column, clipped to the grid.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        let last_row = self.end.row.min(GRID_ROWS - 1);
        (self.start.col..=self.end.col)
            .flat_map(move |col| (self.start.row..=last_row).map(move |row| CellId::new(col, row)))
    }

    /// Sum the numeric values in the range. Absent and non-numeric cells count
    /// as 0, and an empty range sums to 0.
    pub fn sum<L: CellLookup + ?Sized>(&self, cells: &L) -> f64 {
        self.cells().filter_map(|id| cells.number_at(id)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_range() {
        let range = Range::parse("A1:B2").unwrap();
        assert_eq!(range.start, CellId::new(0, 0));
        assert_eq!(range.end, CellId::new(1, 1));
        assert!(Range::parse("A1").is_err());
        assert!(Range::parse("A1:5").is_err());
    }

    #[test]
    fn test_cells_column_major() {
        let range = Range::parse("A1:B2").unwrap();
        let cells: Vec<String> = range.cells().map(|c| c.to_string()).collect();
        assert_eq!(cells, vec!["A1", "A2", "B1", "B2"]);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        assert_eq!(Range::parse("B2:A1").unwrap().cells().count(), 0);
        assert_eq!(Range::parse("A2:B1").unwrap().cells().count(), 0);
    }

    #[test]
    fn test_cells_clipped_to_grid() {
        let range = Range::parse("A99:A500").unwrap();
        assert_eq!(range.cells().count(), 2);
    }

    #[test]
    fn test_sum_skips_missing_values() {
        let mut cells = HashMap::new();
        cells.insert(CellId::new(0, 0), 1.0);
        cells.insert(CellId::new(1, 1), 4.0);
        assert_eq!(Range::parse("A1:B2").unwrap().sum(&cells), 5.0);
        assert_eq!(Range::parse("C1:C9").unwrap().sum(&cells), 0.0);
    }
}
