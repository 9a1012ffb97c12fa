//! XLSX serialization for transaction exports.

use rust_xlsxwriter::Workbook;

use crate::{
    Error,
    export::rows::{EXPORT_HEADER, ExportRow},
};

/// The name of the single sheet in exported workbooks.
const SHEET_NAME: &str = "Transactions";

/// Serialize `rows` to the bytes of a single-sheet XLSX workbook.
///
/// # Errors
/// Returns an [Error::ExportFailed] if the workbook cannot be built.
pub(crate) fn write_workbook(rows: &[ExportRow]) -> Result<Vec<u8>, Error> {
    build_workbook(rows).map_err(|error| Error::ExportFailed(error.to_string()))
}

fn build_workbook(rows: &[ExportRow]) -> Result<Vec<u8>, rust_xlsxwriter::XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (column, header) in EXPORT_HEADER.iter().enumerate() {
        worksheet.write_string(0, column as u16, *header)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let output_row = (index + 1) as u32;
        worksheet.write_string(output_row, 0, &row.transaction_type)?;
        worksheet.write_string(output_row, 1, &row.category)?;
        worksheet.write_number(output_row, 2, row.amount as f64)?;
        worksheet.write_string(output_row, 3, &row.description)?;
        worksheet.write_string(output_row, 4, row.date_string())?;
    }

    workbook.save_to_buffer()
}
