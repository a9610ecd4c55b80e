//! Workbook state and logic (UI-agnostic).

mod io;
mod ops;
mod state;
mod style;

pub use io::CsvExport;
pub use ops::CellUpdate;
pub use state::{Sheet, Workbook, parse_cell_id};
pub use style::{ActiveCellResolver, StyleAttribute, StyleMap};
