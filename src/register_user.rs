//! The registration endpoint for creating a new user account.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, PasswordHash, endpoints, user::create_user};

/// The state needed to register a user.
#[derive(Debug, Clone)]
pub struct RegisterState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegisterState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The raw data entered by the user in the registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    /// The name the new user will log in with.
    pub username: String,
    /// The password for the new account.
    pub password: String,
}

/// Handler for registration requests via the POST method.
///
/// Hashes the submitted password and stores the new user, then redirects to
/// the log-in page. A username that is already taken yields the plain-text
/// duplicate-username message; any other storage failure is an internal
/// error, not a duplicate.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn register_user(
    State(state): State<RegisterState>,
    Form(form): Form<RegisterForm>,
) -> Response {
    let password_hash = match PasswordHash::new(&form.password, PasswordHash::DEFAULT_COST) {
        Ok(password_hash) => password_hash,
        Err(error) => {
            tracing::error!("Could not hash password: {error}");
            return error.into_response();
        }
    };

    let connection = state.db_connection.lock().unwrap();

    match create_user(&form.username, password_hash, &connection) {
        Ok(_) => Redirect::to(endpoints::LOG_IN).into_response(),
        Err(error @ Error::DuplicateUsername) => error.into_response(),
        Err(error) => {
            tracing::error!("Could not create user: {error}");
            error.into_response()
        }
    }
}
