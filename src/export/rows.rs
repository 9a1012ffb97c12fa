//! The tabular representation of transactions used by the export endpoints.

use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::transaction::Transaction;

/// The export column headers, in output order.
pub const EXPORT_HEADER: [&str; 5] = ["Type", "Category", "Amount", "Description", "Date"];

/// Date format used in exported files, e.g. "2024-06-05 10:00:00".
const EXPORT_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// One row of an export file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    /// The transaction type as stored, "income" or "expense".
    pub transaction_type: String,
    /// The transaction category.
    pub category: String,
    /// The transaction amount.
    pub amount: i64,
    /// The transaction description.
    pub description: String,
    /// When the transaction happened.
    pub date: OffsetDateTime,
}

impl ExportRow {
    /// Build an export row from a stored transaction.
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            transaction_type: transaction.transaction_type.as_str().to_owned(),
            category: transaction.category.clone(),
            amount: transaction.amount,
            description: transaction.description.clone(),
            date: transaction.date,
        }
    }

    /// The date formatted for file output.
    pub fn date_string(&self) -> String {
        self.date
            .format(EXPORT_DATE_FORMAT)
            .expect("date formatting cannot fail for a valid date")
    }
}

/// The columns a client may sort an export by.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ExportColumn {
    Type,
    Category,
    Amount,
    Description,
    Date,
}

impl ExportColumn {
    /// Match a `sort_by` query value to a column.
    ///
    /// The value is capitalized first so that "amount", "AMOUNT" and "Amount"
    /// all match the Amount column. Values that match no column yield `None`.
    fn from_query(sort_by: &str) -> Option<Self> {
        match capitalize(sort_by).as_str() {
            "Type" => Some(Self::Type),
            "Category" => Some(Self::Category),
            "Amount" => Some(Self::Amount),
            "Description" => Some(Self::Description),
            "Date" => Some(Self::Date),
            _ => None,
        }
    }
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Sort `rows` ascending by the column named in `sort_by`.
///
/// A `sort_by` value that names no export column leaves the row order
/// untouched. The sort is stable.
pub fn sort_rows(rows: &mut [ExportRow], sort_by: &str) {
    let column = match ExportColumn::from_query(sort_by) {
        Some(column) => column,
        None => return,
    };

    match column {
        ExportColumn::Type => rows.sort_by(|a, b| a.transaction_type.cmp(&b.transaction_type)),
        ExportColumn::Category => rows.sort_by(|a, b| a.category.cmp(&b.category)),
        ExportColumn::Amount => rows.sort_by(|a, b| a.amount.cmp(&b.amount)),
        ExportColumn::Description => rows.sort_by(|a, b| a.description.cmp(&b.description)),
        ExportColumn::Date => rows.sort_by(|a, b| a.date.cmp(&b.date)),
    }
}
