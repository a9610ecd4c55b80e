//! cellsheet-core - UI-agnostic workbook model, recalculation + CSV storage.

pub mod error;
pub mod navigation;
pub mod storage;
pub mod workbook;

pub use error::{CellsheetError, Result};
pub use navigation::{NavKey, navigate};
pub use workbook::{
    ActiveCellResolver, CellUpdate, CsvExport, Sheet, StyleAttribute, StyleMap, Workbook,
    parse_cell_id,
};

pub use cellsheet_engine::engine::{CellId, Computed, ERROR_MARKER, StoredValue};

#[cfg(test)]
mod tests {
    use super::*;

    struct FocusedCell(Option<CellId>);

    impl ActiveCellResolver for FocusedCell {
        fn resolve_active_cell(&self) -> Option<CellId> {
            self.0
        }
    }

    #[test]
    fn test_edit_style_and_export_flow() {
        let mut wb = Workbook::new();
        let a1 = CellId::parse("A1").unwrap();
        let focus = FocusedCell(navigate(a1, NavKey::Tab));

        wb.set_cell_input(a1, "4");
        let b1 = focus.resolve_active_cell().unwrap();
        wb.set_cell_input(b1, "=A1*A1");
        wb.toggle_style(&focus, StyleAttribute::FontWeight);

        assert_eq!(wb.current_sheet().display(b1), "16");
        assert!(wb.current_sheet().style(b1).is_some());
        assert_eq!(wb.export_csv().contents, "\"4\",\"16\"\n");
    }

    #[test]
    fn test_sheet_switch_keeps_contents() {
        let mut wb = Workbook::new();
        let a1 = CellId::parse("A1").unwrap();
        wb.set_cell_input(a1, "first");
        wb.create_sheet();
        wb.set_cell_input(a1, "second");
        wb.switch_to(0).unwrap();
        assert_eq!(wb.current_sheet().display(a1), "first");
        assert_eq!(wb.export_csv().file_name, "Sheet1.csv");
        wb.switch_to(1).unwrap();
        assert_eq!(wb.export_csv().file_name, "Sheet2.csv");
    }
}
