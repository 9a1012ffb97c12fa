//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    auth_middleware::auth_guard,
    category::get_categories,
    dashboard::get_dashboard,
    endpoints,
    export::export_transactions_endpoint,
    log_in::post_log_in,
    log_out::get_log_out,
    register_user::register_user,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_edit_transaction, get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::GET_CATEGORIES, get(get_categories));

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(endpoints::DASHBOARD, get(get_dashboard))
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(
            endpoints::ADD_TRANSACTION,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::EDIT_TRANSACTION,
            get(get_edit_transaction).post(edit_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            post(delete_transaction_endpoint),
        )
        .route(
            endpoints::EXPORT_TRANSACTIONS,
            get(export_transactions_endpoint),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes.merge(unprotected_routes).with_state(state)
}

/// The root path '/' redirects to the dashboard.
async fn get_index() -> Redirect {
    Redirect::to(endpoints::DASHBOARD)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD);
    }
}
