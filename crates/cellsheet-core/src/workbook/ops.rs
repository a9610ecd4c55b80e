use super::Workbook;
use cellsheet_engine::engine::{CellId, Computed, StoredValue, evaluate_formula};
use tracing::debug;

/// A cell whose visible text changed and should be redrawn.
#[derive(Clone, Debug, PartialEq)]
pub struct CellUpdate {
    pub id: CellId,
    pub display: String,
}

impl Workbook {
    /// Handle an edit of a cell on the current sheet.
    ///
    /// Input starting with `=` becomes a formula; anything else is stored as
    /// trimmed literal text. Every formula cell on the sheet is then
    /// re-evaluated. Returns the refreshed formula cells.
    pub fn set_cell_input(&mut self, id: CellId, input: &str) -> Vec<CellUpdate> {
        let input = input.trim();
        let value = match input.strip_prefix('=') {
            Some(source) => StoredValue::Formula {
                source: source.to_string(),
                result: Computed::Error,
            },
            None => StoredValue::text(input),
        };
        self.current_sheet_mut().set_value(id, value);
        self.recalculate()
    }

    /// Re-evaluate every formula cell of the current sheet, once, in row-major
    /// order.
    ///
    /// There is no dependency ordering: a formula that refers to a formula
    /// later in the order sees that cell's previous result, and cyclic
    /// references are evaluated once per pass without converging.
    pub fn recalculate(&mut self) -> Vec<CellUpdate> {
        let sheet = self.current_sheet_mut();
        let formulas: Vec<(CellId, String)> = sheet
            .values
            .iter()
            .filter_map(|(id, value)| value.formula_source().map(|src| (*id, src.to_string())))
            .collect();

        let mut updates = Vec::with_capacity(formulas.len());
        for (id, source) in formulas {
            let result = evaluate_formula(&source, &*sheet);
            sheet.values.insert(id, StoredValue::Formula { source, result });
            updates.push(CellUpdate {
                id,
                display: result.display(),
            });
        }

        debug!(sheet = %sheet.name, formulas = updates.len(), "recalculated sheet");
        updates
    }
}
