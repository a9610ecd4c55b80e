use crate::error::{CellsheetError, Result};
use cellsheet_engine::engine::{CellId, CellLookup, StoredValue};
use std::collections::BTreeMap;
use tracing::info;

use super::style::{StyleAttribute, StyleMap};

/// One named sheet: sparse values and styles keyed by cell id.
///
/// Both maps iterate in row-major order, which is also the recalculation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub(crate) values: BTreeMap<CellId, StoredValue>,
    pub(crate) styles: BTreeMap<CellId, StyleMap>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            values: BTreeMap::new(),
            styles: BTreeMap::new(),
        }
    }

    /// Stored value, or `None` for an empty cell.
    pub fn value(&self, id: CellId) -> Option<&StoredValue> {
        self.values.get(&id)
    }

    /// Text shown in the cell (empty string when absent).
    pub fn display(&self, id: CellId) -> String {
        self.values.get(&id).map(StoredValue::display).unwrap_or_default()
    }

    /// Overwrite a cell. Writing empty text leaves the cell absent.
    pub fn set_value(&mut self, id: CellId, value: StoredValue) {
        if matches!(&value, StoredValue::Text(s) if s.is_empty()) {
            self.values.remove(&id);
        } else {
            self.values.insert(id, value);
        }
    }

    pub fn values(&self) -> impl Iterator<Item = (&CellId, &StoredValue)> {
        self.values.iter()
    }

    pub fn style(&self, id: CellId) -> Option<&StyleMap> {
        self.styles.get(&id)
    }

    /// Merge one attribute into the cell's style map, creating it if absent.
    /// An empty value removes the attribute.
    pub fn set_style(&mut self, id: CellId, attribute: StyleAttribute, value: &str) {
        if value.is_empty() {
            if let Some(map) = self.styles.get_mut(&id) {
                map.remove(&attribute);
                if map.is_empty() {
                    self.styles.remove(&id);
                }
            }
            return;
        }
        self.styles
            .entry(id)
            .or_default()
            .insert(attribute, value.to_string());
    }

    pub fn styles(&self) -> impl Iterator<Item = (&CellId, &StyleMap)> {
        self.styles.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.styles.is_empty()
    }
}

impl CellLookup for Sheet {
    fn number_at(&self, id: CellId) -> Option<f64> {
        self.values.get(&id).and_then(StoredValue::numeric_value)
    }
}

/// An ordered list of sheets with exactly one current sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct Workbook {
    pub(crate) sheets: Vec<Sheet>,
    pub(crate) current: usize,
}

impl Workbook {
    /// Create a workbook holding a single empty `Sheet1`.
    pub fn new() -> Self {
        Workbook {
            sheets: vec![Sheet::new("Sheet1")],
            current: 0,
        }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_sheet(&self) -> &Sheet {
        &self.sheets[self.current]
    }

    pub(crate) fn current_sheet_mut(&mut self) -> &mut Sheet {
        &mut self.sheets[self.current]
    }

    pub fn sheet(&self, index: usize) -> Result<&Sheet> {
        let count = self.sheets.len();
        self.sheets
            .get(index)
            .ok_or(CellsheetError::SheetOutOfRange { index, count })
    }

    pub(crate) fn sheet_mut(&mut self, index: usize) -> Result<&mut Sheet> {
        let count = self.sheets.len();
        self.sheets
            .get_mut(index)
            .ok_or(CellsheetError::SheetOutOfRange { index, count })
    }

    /// Append an empty sheet named `Sheet<N>` (N = sheet count + 1) and make
    /// it current. Returns its index.
    pub fn create_sheet(&mut self) -> usize {
        let name = format!("Sheet{}", self.sheets.len() + 1);
        info!(sheet = %name, "created sheet");
        self.sheets.push(Sheet::new(name));
        self.current = self.sheets.len() - 1;
        self.current
    }

    /// Make `index` the current sheet.
    pub fn switch_to(&mut self, index: usize) -> Result<()> {
        self.sheet(index)?;
        self.current = index;
        Ok(())
    }

    /// Stored value of a cell, `None` when the cell is empty.
    pub fn get_value(&self, sheet: usize, id: CellId) -> Result<Option<&StoredValue>> {
        Ok(self.sheet(sheet)?.value(id))
    }

    /// Overwrite (or create) a cell's stored value.
    pub fn set_value(&mut self, sheet: usize, id: CellId, value: StoredValue) -> Result<()> {
        self.sheet_mut(sheet)?.set_value(id, value);
        Ok(())
    }

    pub fn get_style(&self, sheet: usize, id: CellId) -> Result<Option<&StyleMap>> {
        Ok(self.sheet(sheet)?.style(id))
    }

    /// Merge a style attribute into a cell's style map.
    pub fn set_style(
        &mut self,
        sheet: usize,
        id: CellId,
        attribute: StyleAttribute,
        value: &str,
    ) -> Result<()> {
        self.sheet_mut(sheet)?.set_style(id, attribute, value);
        Ok(())
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a cell id typed by a user (case-insensitive).
pub fn parse_cell_id(name: &str) -> Result<CellId> {
    CellId::parse(&name.trim().to_ascii_uppercase())
        .ok_or_else(|| CellsheetError::InvalidCellId(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> CellId {
        CellId::parse(name).unwrap()
    }

    #[test]
    fn test_new_workbook_has_one_sheet() {
        let wb = Workbook::new();
        assert_eq!(wb.sheets().len(), 1);
        assert_eq!(wb.current_index(), 0);
        assert_eq!(wb.current_sheet().name, "Sheet1");
        assert!(wb.current_sheet().is_empty());
    }

    #[test]
    fn test_create_sheet_appends_and_switches() {
        let mut wb = Workbook::new();
        assert_eq!(wb.create_sheet(), 1);
        assert_eq!(wb.create_sheet(), 2);
        assert_eq!(wb.current_index(), 2);
        let names: Vec<&str> = wb.sheets().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sheet1", "Sheet2", "Sheet3"]);
    }

    #[test]
    fn test_switch_to_out_of_range() {
        let mut wb = Workbook::new();
        wb.create_sheet();
        assert!(wb.switch_to(0).is_ok());
        assert_eq!(wb.current_index(), 0);
        assert!(matches!(
            wb.switch_to(2),
            Err(CellsheetError::SheetOutOfRange { index: 2, count: 2 })
        ));
        assert_eq!(wb.current_index(), 0);
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut wb = Workbook::new();
        for text in ["hello", " spaced ", "42", "#ERROR!", "SUM(A1:B2)"] {
            wb.set_value(0, id("B7"), StoredValue::text(text)).unwrap();
            assert_eq!(
                wb.get_value(0, id("B7")).unwrap(),
                Some(&StoredValue::text(text))
            );
        }
    }

    #[test]
    fn test_absent_cell_is_empty() {
        let wb = Workbook::new();
        assert_eq!(wb.get_value(0, id("Q50")).unwrap(), None);
        assert_eq!(wb.current_sheet().display(id("Q50")), "");
        assert!(wb.get_value(3, id("A1")).is_err());
    }

    #[test]
    fn test_out_of_grid_write_is_accepted() {
        let mut wb = Workbook::new();
        let far = id("A150");
        wb.set_value(0, far, StoredValue::text("far")).unwrap();
        assert_eq!(wb.current_sheet().display(far), "far");
    }

    #[test]
    fn test_parse_cell_id() {
        assert_eq!(parse_cell_id(" b12 ").unwrap(), id("B12"));
        assert!(matches!(
            parse_cell_id("AA1"),
            Err(CellsheetError::InvalidCellId(_))
        ));
    }
}
