//! Default category lists and the category resolution rule for transaction forms.

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use serde::Deserialize;

use crate::AppState;

/// The category that stands in for "none of the listed categories".
///
/// Submitting this category together with a non-empty custom category name
/// replaces it with the custom name (see [resolve_category]).
pub const OTHER_CATEGORY: &str = "Other";

/// The default category lists offered for new transactions.
///
/// These are configuration: the server binary constructs them at startup and
/// passes them into [AppState] rather than reading module-level constants.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryConfig {
    /// Categories offered for income transactions.
    pub income: Vec<String>,
    /// Categories offered for expense transactions.
    pub expense: Vec<String>,
}

impl CategoryConfig {
    /// Get the category list for `transaction_type`.
    ///
    /// Returns an empty slice for anything that is not "income" or "expense",
    /// mirroring the lookup-with-default the category endpoint exposes.
    pub fn for_type(&self, transaction_type: &str) -> &[String] {
        match transaction_type {
            "income" => &self.income,
            "expense" => &self.expense,
            _ => &[],
        }
    }
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            income: vec![
                "Salary 💰".to_owned(),
                "Investment 📊".to_owned(),
                "Gift 🎁".to_owned(),
                OTHER_CATEGORY.to_owned(),
            ],
            expense: vec![
                "Food 🍔".to_owned(),
                "Transportation 🚌".to_owned(),
                "Entertainment 🎮".to_owned(),
                OTHER_CATEGORY.to_owned(),
            ],
        }
    }
}

/// Pick the category to store for a transaction form submission.
///
/// If the submitted `category` is the literal [OTHER_CATEGORY] and a non-empty
/// custom category string was supplied, the custom string (trimmed) wins.
/// In every other case the submitted category is kept as-is, including the
/// literal "Other" when the custom field is empty or whitespace.
pub fn resolve_category(category: String, new_category: Option<&str>) -> String {
    if category != OTHER_CATEGORY {
        return category;
    }

    match new_category.map(str::trim) {
        Some(custom) if !custom.is_empty() => custom.to_owned(),
        _ => category,
    }
}

/// The state needed to serve the category lists.
#[derive(Debug, Clone)]
pub struct CategoriesState {
    /// The configured default category lists.
    pub categories: CategoryConfig,
}

impl FromRef<AppState> for CategoriesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            categories: state.categories.clone(),
        }
    }
}

/// The query parameters accepted by the category list endpoint.
#[derive(Debug, Deserialize)]
pub struct CategoriesQuery {
    /// The transaction type to list categories for, "income" or "expense".
    #[serde(rename = "type", default)]
    pub transaction_type: Option<String>,
}

/// A route handler that returns the default category list for the requested
/// transaction type as JSON. Unknown or missing types yield an empty list.
pub async fn get_categories(
    State(state): State<CategoriesState>,
    Query(query): Query<CategoriesQuery>,
) -> Json<Vec<String>> {
    let categories = state
        .categories
        .for_type(query.transaction_type.as_deref().unwrap_or(""));

    Json(categories.to_vec())
}


#[cfg(test)]
mod get_categories_tests {
    use axum::extract::{Query, State};

    use super::{CategoriesQuery, CategoriesState, CategoryConfig, get_categories};

    fn get_state() -> CategoriesState {
        CategoriesState {
            categories: CategoryConfig::default(),
        }
    }

    #[tokio::test]
    async fn returns_income_categories() {
        let response = get_categories(
            State(get_state()),
            Query(CategoriesQuery {
                transaction_type: Some("income".to_owned()),
            }),
        )
        .await;

        assert_eq!(
            response.0,
            vec!["Salary 💰", "Investment 📊", "Gift 🎁", "Other"]
        );
    }

    #[tokio::test]
    async fn returns_expense_categories() {
        let response = get_categories(
            State(get_state()),
            Query(CategoriesQuery {
                transaction_type: Some("expense".to_owned()),
            }),
        )
        .await;

        assert_eq!(
            response.0,
            vec!["Food 🍔", "Transportation 🚌", "Entertainment 🎮", "Other"]
        );
    }

    #[tokio::test]
    async fn returns_empty_list_for_unknown_type() {
        let response = get_categories(
            State(get_state()),
            Query(CategoriesQuery {
                transaction_type: Some("savings".to_owned()),
            }),
        )
        .await;

        assert!(response.0.is_empty());
    }

    #[tokio::test]
    async fn returns_empty_list_for_missing_type() {
        let response = get_categories(
            State(get_state()),
            Query(CategoriesQuery {
                transaction_type: None,
            }),
        )
        .await;

        assert!(response.0.is_empty());
    }
}
