//! Spreadsheet export
//!
//! - [`csv::CsvExport`]: renders questions into the 27-column review sheet
//! - [`csv::segment_questions`]: splits a collection into one sheet per
//!   language, discipline, level and type

pub mod csv;

pub use csv::{CSV_HEADERS, CsvExport, csv_field, segment_file_name, segment_questions};
