//! Exporting a user's transactions to CSV or XLSX files.

mod csv;
mod endpoint;
mod rows;
mod workbook;

pub use self::endpoint::export_transactions_endpoint;
pub use self::rows::{EXPORT_HEADER, ExportRow, sort_rows};

pub(crate) use self::csv::write_csv;
pub(crate) use self::workbook::write_workbook;
