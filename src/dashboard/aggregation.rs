//! Transaction data aggregation for the dashboard.
//!
//! A single pass over a user's transactions buckets amounts by category and
//! by calendar month, and accumulates the grand totals.

use std::collections::BTreeMap;

use serde::Serialize;
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::transaction::{Transaction, TransactionType};

/// The income and expense totals accumulated for one calendar month.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// Total income for the month.
    pub income: i64,
    /// Total expenses for the month.
    pub expense: i64,
}

/// The aggregated numbers shown on the dashboard.
#[derive(Debug, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Income totals keyed by category.
    pub income_by_category: BTreeMap<String, i64>,
    /// Expense totals keyed by category.
    pub expense_by_category: BTreeMap<String, i64>,
    /// Income and expense totals keyed by calendar month ("YYYY-MM").
    pub monthly_summary: BTreeMap<String, MonthlyTotals>,
    /// The sum of all income transactions.
    pub total_income: i64,
    /// The sum of all expense transactions.
    pub total_expense: i64,
}

/// Month key format, e.g. "2024-01".
const MONTH_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]");

/// Format the calendar month a transaction falls into.
fn month_key(date: &OffsetDateTime) -> String {
    date.format(MONTH_FORMAT)
        .expect("year-month formatting cannot fail for a valid date")
}

/// Aggregate `transactions` into the dashboard summary.
///
/// Categories are bucketed by exact string match, so categories that differ
/// in case or decoration are distinct buckets.
pub fn summarize(transactions: &[Transaction]) -> DashboardSummary {
    let mut income_by_category = BTreeMap::new();
    let mut expense_by_category = BTreeMap::new();
    let mut monthly_summary: BTreeMap<String, MonthlyTotals> = BTreeMap::new();
    let mut total_income = 0;
    let mut total_expense = 0;

    for transaction in transactions {
        let month = monthly_summary.entry(month_key(&transaction.date)).or_default();

        match transaction.transaction_type {
            TransactionType::Income => {
                month.income += transaction.amount;
                *income_by_category
                    .entry(transaction.category.clone())
                    .or_insert(0) += transaction.amount;
                total_income += transaction.amount;
            }
            TransactionType::Expense => {
                month.expense += transaction.amount;
                *expense_by_category
                    .entry(transaction.category.clone())
                    .or_insert(0) += transaction.amount;
                total_expense += transaction.amount;
            }
        }
    }

    DashboardSummary {
        income_by_category,
        expense_by_category,
        monthly_summary,
        total_income,
        total_expense,
    }
}

#[cfg(test)]
mod aggregation_tests {
    use time::{OffsetDateTime, macros::datetime};

    use crate::{
        dashboard::aggregation::summarize,
        transaction::{Transaction, TransactionType},
        user::UserID,
    };

    fn create_test_transaction(
        transaction_type: TransactionType,
        category: &str,
        amount: i64,
        date: OffsetDateTime,
    ) -> Transaction {
        Transaction {
            id: 1,
            user_id: UserID::new(1),
            transaction_type,
            category: category.to_owned(),
            amount,
            description: String::new(),
            date,
        }
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        let summary = summarize(&[]);

        assert!(summary.income_by_category.is_empty());
        assert!(summary.expense_by_category.is_empty());
        assert!(summary.monthly_summary.is_empty());
        assert_eq!(summary.total_income, 0);
        assert_eq!(summary.total_expense, 0);
    }

    #[test]
    fn buckets_amounts_by_category_and_month() {
        let transactions = vec![
            create_test_transaction(
                TransactionType::Income,
                "Salary 💰",
                3000,
                datetime!(2024-01-25 09:00 UTC),
            ),
            create_test_transaction(
                TransactionType::Income,
                "Freelance",
                500,
                datetime!(2024-01-28 09:00 UTC),
            ),
            create_test_transaction(
                TransactionType::Expense,
                "Food 🍔",
                150,
                datetime!(2024-01-30 12:00 UTC),
            ),
            create_test_transaction(
                TransactionType::Expense,
                "Food 🍔",
                200,
                datetime!(2024-02-02 12:00 UTC),
            ),
        ];

        let summary = summarize(&transactions);

        assert_eq!(summary.income_by_category["Salary 💰"], 3000);
        assert_eq!(summary.income_by_category["Freelance"], 500);
        assert_eq!(summary.expense_by_category["Food 🍔"], 350);
        assert_eq!(summary.monthly_summary["2024-01"].income, 3500);
        assert_eq!(summary.monthly_summary["2024-01"].expense, 150);
        assert_eq!(summary.monthly_summary["2024-02"].income, 0);
        assert_eq!(summary.monthly_summary["2024-02"].expense, 200);
        assert_eq!(summary.total_income, 3500);
        assert_eq!(summary.total_expense, 350);
    }

    #[test]
    fn category_match_is_exact() {
        let date = datetime!(2024-03-10 12:00 UTC);
        let transactions = vec![
            create_test_transaction(TransactionType::Expense, "food", 10, date),
            create_test_transaction(TransactionType::Expense, "Food", 20, date),
            create_test_transaction(TransactionType::Expense, "Food 🍔", 30, date),
        ];

        let summary = summarize(&transactions);

        assert_eq!(summary.expense_by_category.len(), 3);
        assert_eq!(summary.expense_by_category["food"], 10);
        assert_eq!(summary.expense_by_category["Food"], 20);
        assert_eq!(summary.expense_by_category["Food 🍔"], 30);
    }

    #[test]
    fn category_totals_sum_to_grand_totals() {
        let transactions = vec![
            create_test_transaction(
                TransactionType::Income,
                "Salary 💰",
                3000,
                datetime!(2024-01-25 09:00 UTC),
            ),
            create_test_transaction(
                TransactionType::Income,
                "Gift 🎁",
                120,
                datetime!(2024-02-14 09:00 UTC),
            ),
            create_test_transaction(
                TransactionType::Expense,
                "Food 🍔",
                150,
                datetime!(2024-01-30 12:00 UTC),
            ),
            create_test_transaction(
                TransactionType::Expense,
                "Transportation 🚌",
                60,
                datetime!(2024-02-20 08:00 UTC),
            ),
        ];

        let summary = summarize(&transactions);

        let income_sum: i64 = summary.income_by_category.values().sum();
        let expense_sum: i64 = summary.expense_by_category.values().sum();
        let monthly_income_sum: i64 = summary.monthly_summary.values().map(|m| m.income).sum();
        let monthly_expense_sum: i64 = summary.monthly_summary.values().map(|m| m.expense).sum();

        assert_eq!(income_sum, summary.total_income);
        assert_eq!(expense_sum, summary.total_expense);
        assert_eq!(monthly_income_sum, summary.total_income);
        assert_eq!(monthly_expense_sum, summary.total_expense);
    }

    #[test]
    fn month_keys_are_calendar_months() {
        let transactions = vec![
            create_test_transaction(
                TransactionType::Income,
                "Salary 💰",
                100,
                datetime!(2023-12-31 23:59 UTC),
            ),
            create_test_transaction(
                TransactionType::Income,
                "Salary 💰",
                100,
                datetime!(2024-01-01 00:00 UTC),
            ),
        ];

        let summary = summarize(&transactions);

        assert_eq!(summary.monthly_summary.len(), 2);
        assert_eq!(summary.monthly_summary["2023-12"].income, 100);
        assert_eq!(summary.monthly_summary["2024-01"].income, 100);
    }

    #[test]
    fn example_freelance_income() {
        let transactions = vec![create_test_transaction(
            TransactionType::Income,
            "Freelance",
            500,
            datetime!(2024-06-05 10:00 UTC),
        )];

        let summary = summarize(&transactions);

        assert_eq!(summary.income_by_category["Freelance"], 500);
        assert_eq!(summary.monthly_summary["2024-06"].income, 500);
        assert_eq!(summary.total_income, 500);
    }
}
