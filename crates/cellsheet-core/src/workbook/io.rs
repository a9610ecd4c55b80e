use super::{CellUpdate, Workbook};
use crate::error::Result;
use crate::storage::{parse_csv, write_csv};
use cellsheet_engine::engine::{CellId, Computed, GRID_COLS, GRID_ROWS, StoredValue};
use std::path::Path;
use tracing::{info, warn};

/// CSV text for one sheet together with its download name.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvExport {
    pub file_name: String,
    pub contents: String,
}

impl Workbook {
    /// Replace a sheet's values with a text grid and clear its styles.
    ///
    /// Field `c` of row `r` lands in column `c`, row `r`. Empty fields are
    /// skipped, as are fields outside the grid. Fields starting with `=`
    /// become formulas. Returns the number of cells assigned.
    pub fn import_replace(&mut self, sheet: usize, rows: &[Vec<String>]) -> Result<usize> {
        let sheet = self.sheet_mut(sheet)?;
        sheet.values.clear();
        sheet.styles.clear();

        let mut assigned = 0;
        for (row, fields) in rows.iter().enumerate() {
            for (col, field) in fields.iter().enumerate() {
                if field.is_empty() {
                    continue;
                }
                if col >= GRID_COLS || row >= GRID_ROWS {
                    warn!(row = row + 1, column = col + 1, "skipping CSV field outside the grid");
                    continue;
                }
                let value = match field.strip_prefix('=') {
                    Some(source) => StoredValue::Formula {
                        source: source.to_string(),
                        result: Computed::Error,
                    },
                    None => StoredValue::text(field.as_str()),
                };
                sheet.values.insert(CellId::new(col, row), value);
                assigned += 1;
            }
        }
        Ok(assigned)
    }

    /// Import CSV text into the current sheet, replacing it, then recalculate.
    pub fn import_csv(&mut self, content: &str) -> Result<Vec<CellUpdate>> {
        let rows = parse_csv(content);
        let assigned = self.import_replace(self.current, &rows)?;
        info!(
            sheet = %self.current_sheet().name,
            rows = rows.len(),
            cells = assigned,
            "imported CSV"
        );
        Ok(self.recalculate())
    }

    /// Read a CSV file and import it into the current sheet.
    pub fn import_csv_file(&mut self, path: &Path) -> Result<Vec<CellUpdate>> {
        let content = std::fs::read_to_string(path)?;
        self.import_csv(&content)
    }

    /// Serialize the current sheet, named `<SheetName>.csv`.
    pub fn export_csv(&self) -> CsvExport {
        let sheet = self.current_sheet();
        CsvExport {
            file_name: format!("{}.csv", sheet.name),
            contents: write_csv(sheet),
        }
    }

    /// Write the current sheet to `path`, or to `<SheetName>.csv` in the
    /// working directory. Returns the path written.
    pub fn export_csv_file(&self, path: Option<&Path>) -> Result<std::path::PathBuf> {
        let export = self.export_csv();
        let target = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| std::path::PathBuf::from(&export.file_name));
        std::fs::write(&target, export.contents)?;
        info!(path = %target.display(), "exported CSV");
        Ok(target)
    }
}
