//! Defines the endpoint that serves the dashboard summary.

use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    dashboard::aggregation::summarize,
    transaction::{TransactionState, get_transactions_for_user},
    user::UserID,
};

/// A route handler that aggregates the caller's transactions and returns the
/// dashboard summary as JSON.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_dashboard(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
) -> Response {
    let transactions = {
        let connection = state.db_connection.lock().unwrap();

        match get_transactions_for_user(user_id, &connection) {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::error!("Could not load transactions for the dashboard: {error}");
                return error.into_response();
            }
        }
    };

    Json(summarize(&transactions)).into_response()
}
