//! Error types for Cellsheet core.

use thiserror::Error;

/// Errors that can occur in the workbook store
#[derive(Error, Debug)]
pub enum CellsheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sheet {index} out of range ({count} sheets)")]
    SheetOutOfRange { index: usize, count: usize },

    #[error("Invalid cell id: {0}")]
    InvalidCellId(String),
}

pub type Result<T> = std::result::Result<T, CellsheetError>;
