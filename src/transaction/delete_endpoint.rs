//! Defines the endpoint for deleting a transaction.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    endpoints,
    transaction::{TransactionId, TransactionState, core::delete_transaction},
    user::UserID,
};

/// A route handler for deleting a transaction, redirects to the transactions
/// list.
///
/// The delete is scoped to the user from the auth cookie. An ID that does not
/// exist or belongs to another user is a silent no-op: the response is the
/// same redirect, so nothing is leaked about other users' records.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match delete_transaction(transaction_id, user_id, &connection) {
        Ok(_) => Redirect::to(endpoints::TRANSACTIONS).into_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}
