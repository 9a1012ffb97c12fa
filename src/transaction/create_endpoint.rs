//! Defines the endpoint for creating a new transaction.

use axum::{
    Extension, Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    endpoints,
    transaction::{Transaction, TransactionForm, TransactionState, core::create_transaction},
    user::UserID,
};

/// A route handler for creating a new transaction, redirects to the
/// transactions list on success.
///
/// The transaction is dated with the current time and owned by the user from
/// the auth cookie.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let builder = Transaction::build(
        user_id,
        form.transaction_type,
        form.resolved_category(),
        form.amount,
        &form.description,
    );

    let connection = state.db_connection.lock().unwrap();

    match create_transaction(builder, &connection) {
        Ok(_) => Redirect::to(endpoints::TRANSACTIONS).into_response(),
        Err(error) => {
            tracing::error!("Could not create transaction: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod create_endpoint_tests {
    use axum::{Extension, Form, extract::State, http::StatusCode};

    use crate::{
        endpoints,
        test_utils::{get_test_state_with_user, transaction_state},
        transaction::{
            TransactionForm, TransactionType, create_transaction_endpoint,
            get_transactions_for_user,
        },
    };

    #[tokio::test]
    async fn creates_transaction_and_redirects() {
        let (state, user) = get_test_state_with_user();

        let form = TransactionForm {
            transaction_type: TransactionType::Income,
            category: "Other".to_owned(),
            new_category: Some("Freelance".to_owned()),
            amount: 500,
            description: "logo design".to_owned(),
        };

        let response = create_transaction_endpoint(
            State(transaction_state(&state)),
            Extension(user.id),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            endpoints::TRANSACTIONS
        );

        let connection = state.db_connection.lock().unwrap();
        let transactions = get_transactions_for_user(user.id, &connection).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].category, "Freelance");
        assert_eq!(transactions[0].amount, 500);
        assert_eq!(transactions[0].transaction_type, TransactionType::Income);
    }

    #[tokio::test]
    async fn keeps_literal_other_category() {
        let (state, user) = get_test_state_with_user();

        let form = TransactionForm {
            transaction_type: TransactionType::Expense,
            category: "Other".to_owned(),
            new_category: Some("".to_owned()),
            amount: 25,
            description: "mystery".to_owned(),
        };

        create_transaction_endpoint(
            State(transaction_state(&state)),
            Extension(user.id),
            Form(form),
        )
        .await;

        let connection = state.db_connection.lock().unwrap();
        let transactions = get_transactions_for_user(user.id, &connection).unwrap();
        assert_eq!(transactions[0].category, "Other");
    }
}
