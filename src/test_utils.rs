//! Shared helpers for tests.

use rusqlite::Connection;
use time::macros::datetime;

use crate::{
    AppState, CategoryConfig, PasswordHash,
    transaction::{Transaction, TransactionState, TransactionType, create_transaction},
    user::{User, UserID, create_user},
};

/// The password used for test users.
pub(crate) const TEST_PASSWORD: &str = "averysecurepassword";

/// Create an [AppState] backed by an in-memory database.
pub(crate) fn get_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not create in-memory SQLite database");

    AppState::new(connection, "wibble-wobble", CategoryConfig::default())
        .expect("Could not create app state")
}

/// Create an [AppState] backed by an in-memory database along with a
/// registered test user whose password is [TEST_PASSWORD].
pub(crate) fn get_test_state_with_user() -> (AppState, User) {
    let state = get_test_state();

    let user = {
        let connection = state.db_connection.lock().unwrap();
        // A low cost keeps the hashing fast in tests.
        let password_hash =
            PasswordHash::new(TEST_PASSWORD, 4).expect("Could not hash test password");

        create_user("alice", password_hash, &connection).expect("Could not create test user")
    };

    (state, user)
}

/// The transaction sub-state for handlers that only need the database.
pub(crate) fn transaction_state(state: &AppState) -> TransactionState {
    TransactionState {
        db_connection: state.db_connection.clone(),
    }
}

/// Insert a fixed expense transaction owned by `user_id`.
pub(crate) fn add_test_transaction(state: &AppState, user_id: UserID) -> Transaction {
    let connection = state.db_connection.lock().unwrap();

    create_transaction(
        Transaction::build(
            user_id,
            TransactionType::Expense,
            "Food 🍔".to_owned(),
            25,
            "lunch",
        )
        .date(datetime!(2024-06-05 12:00 UTC)),
        &connection,
    )
    .expect("Could not create test transaction")
}
