//! Defines the endpoints for fetching and updating a single transaction.

use axum::{
    Extension, Form, Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    Error, endpoints,
    transaction::{
        TransactionForm, TransactionId, TransactionState,
        core::{get_transaction, update_transaction},
    },
    user::UserID,
};

/// A route handler that returns the transaction with `transaction_id` as JSON.
///
/// The lookup is scoped to the user from the auth cookie: an ID that does not
/// exist or belongs to another user yields JSON `null` rather than an error,
/// so the response leaks nothing about other users' records.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_edit_transaction(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match get_transaction(transaction_id, user_id, &connection) {
        Ok(transaction) => Json(Some(transaction)).into_response(),
        Err(Error::NotFound) => Json(None::<()>).into_response(),
        Err(error) => {
            tracing::error!("Could not fetch transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}

/// A route handler for updating a transaction, redirects to the transactions
/// list on success.
///
/// The update is scoped to the user from the auth cookie; an ID owned by
/// another user is a silent no-op. The transaction date and owner are never
/// changed.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    match update_transaction(
        transaction_id,
        user_id,
        form.transaction_type,
        &form.resolved_category(),
        form.amount,
        &form.description,
        &connection,
    ) {
        Ok(_) => Redirect::to(endpoints::TRANSACTIONS).into_response(),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            error.into_response()
        }
    }
}
