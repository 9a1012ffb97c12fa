//! CSV serialization for transaction exports.

use crate::{Error, export::rows::{EXPORT_HEADER, ExportRow}};

/// Serialize `rows` to CSV bytes with the fixed header row.
///
/// # Errors
/// Returns an [Error::ExportFailed] if writing a record fails.
pub(crate) fn write_csv(rows: &[ExportRow]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(EXPORT_HEADER)
        .map_err(|error| Error::ExportFailed(error.to_string()))?;

    for row in rows {
        writer
            .write_record([
                row.transaction_type.as_str(),
                row.category.as_str(),
                &row.amount.to_string(),
                row.description.as_str(),
                &row.date_string(),
            ])
            .map_err(|error| Error::ExportFailed(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::ExportFailed(error.to_string()))
}
