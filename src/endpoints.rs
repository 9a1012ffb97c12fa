//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/edit_transaction/{transaction_id}',
//! use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The route for registering a new user.
pub const REGISTER: &str = "/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/login";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/logout";
/// The route for the aggregated dashboard summary.
pub const DASHBOARD: &str = "/dashboard";
/// The route for listing the current user's transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for creating a new transaction.
pub const ADD_TRANSACTION: &str = "/add_transaction";
/// The route for fetching and updating a single transaction.
pub const EDIT_TRANSACTION: &str = "/edit_transaction/{transaction_id}";
/// The route for deleting a transaction.
pub const DELETE_TRANSACTION: &str = "/delete_transaction/{transaction_id}";
/// The route for downloading transactions as a CSV or XLSX file.
pub const EXPORT_TRANSACTIONS: &str = "/export_transactions/{file_type}";
/// The route for fetching the default category lists.
pub const GET_CATEGORIES: &str = "/get_categories";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/edit_transaction/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
