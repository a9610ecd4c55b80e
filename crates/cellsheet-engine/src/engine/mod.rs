//! Formula engine API.
//!
//! This module provides the computation side of the spreadsheet:
//!
//! - [`CellId`] - Cell id parsing (A1 notation <-> column/row indices)
//! - [`Range`] - Rectangular `Start:End` blocks and their sums
//! - [`evaluate_formula`] - Evaluate formula text against a [`CellLookup`]
//! - [`eval_arithmetic`] - The dedicated arithmetic parser
//! - [`StoredValue`], [`Computed`] - What cells hold
//! - [`format_number`] - Format numbers for display

mod cell_id;
mod error;
mod eval;
mod format;
mod lexer;
mod parser;
mod range;
mod value;

pub use cell_id::{CellId, GRID_COLS, GRID_ROWS};
pub use error::{FormulaError, Result};
pub use eval::{CellLookup, evaluate_formula, substitute_references};
pub use format::format_number;
pub use parser::eval_arithmetic;
pub use range::Range;
pub use value::{Computed, ERROR_MARKER, StoredValue};
