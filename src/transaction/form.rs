//! The typed form submitted when creating or editing a transaction.

use serde::{Deserialize, Serialize};

use crate::{category::resolve_category, transaction::TransactionType};

/// The form data for creating or editing a transaction.
///
/// Every field is typed, so a submission with a missing field or a
/// non-numeric amount is rejected by the form extractor with a 400 before any
/// handler code runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionForm {
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category selected from the default list.
    pub category: String,
    /// A custom category name, only honored when `category` is "Other".
    #[serde(default)]
    pub new_category: Option<String>,
    /// The value of the transaction in whole currency units.
    pub amount: i64,
    /// Text detailing the transaction.
    pub description: String,
}

impl TransactionForm {
    /// The category to store, after applying the custom-category rule.
    pub fn resolved_category(&self) -> String {
        resolve_category(self.category.clone(), self.new_category.as_deref())
    }
}
