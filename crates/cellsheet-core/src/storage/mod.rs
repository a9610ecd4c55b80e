//! CSV import/export

mod csv;

pub use csv::{parse_csv, write_csv};
