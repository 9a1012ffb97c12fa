//! Defines the endpoint for downloading transactions as a file.

use axum::{
    Extension,
    extract::{Path, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    Error,
    export::{ExportRow, sort_rows, write_csv, write_workbook},
    transaction::{TransactionState, get_transactions_for_user},
    user::UserID,
};

/// The content type of XLSX spreadsheets.
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// The query parameters accepted by the export endpoint.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// The column to sort the export by. Defaults to the date column.
    #[serde(default)]
    pub sort_by: Option<String>,
}

/// A route handler that serializes the caller's transactions to a CSV or XLSX
/// file download.
///
/// `file_type` selects the format: "csv" or "excel"; anything else is a 400.
/// The optional `sort_by` query parameter names an export column
/// (case-insensitively); unknown column names are silently ignored. Only the
/// caller's own transactions are ever included in the download.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn export_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(file_type): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Response {
    let transactions = {
        let connection = state.db_connection.lock().unwrap();

        match get_transactions_for_user(user_id, &connection) {
            Ok(transactions) => transactions,
            Err(error) => {
                tracing::error!("Could not load transactions for export: {error}");
                return error.into_response();
            }
        }
    };

    let mut rows: Vec<ExportRow> = transactions.iter().map(ExportRow::from_transaction).collect();
    sort_rows(&mut rows, query.sort_by.as_deref().unwrap_or("date"));

    let result = match file_type.as_str() {
        "csv" => write_csv(&rows).map(|bytes| ("text/csv", "transactions.csv", bytes)),
        "excel" => {
            write_workbook(&rows).map(|bytes| (XLSX_CONTENT_TYPE, "transactions.xlsx", bytes))
        }
        _ => Err(Error::InvalidFileType(file_type)),
    };

    match result {
        Ok((content_type, file_name, bytes)) => (
            [
                (CONTENT_TYPE, content_type.to_owned()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{file_name}\""),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod export_endpoint_tests {
    use axum::{
        Extension,
        extract::{Path, Query, State},
        http::StatusCode,
    };
    use time::macros::datetime;

    use crate::{
        PasswordHash,
        export::endpoint::{ExportQuery, export_transactions_endpoint},
        test_utils::{get_test_state_with_user, transaction_state},
        transaction::{Transaction, TransactionType, create_transaction},
        user::create_user,
    };

    fn no_sort() -> Query<ExportQuery> {
        Query(ExportQuery { sort_by: None })
    }

    #[tokio::test]
    async fn csv_export_has_exact_header() {
        let (state, user) = get_test_state_with_user();

        let response = export_transactions_endpoint(
            State(transaction_state(&state)),
            Extension(user.id),
            Path("csv".to_owned()),
            no_sort(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("content-type").unwrap(), "text/csv");
        assert_eq!(
            response.headers().get("content-disposition").unwrap(),
            "attachment; filename=\"transactions.csv\""
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert_eq!(
            text.lines().next(),
            Some("Type,Category,Amount,Description,Date")
        );
    }

    #[tokio::test]
    async fn csv_export_only_contains_own_transactions() {
        let (state, user) = get_test_state_with_user();
        let stranger = {
            let connection = state.db_connection.lock().unwrap();
            let stranger = create_user(
                "mallory",
                PasswordHash::new_unchecked("hunter3"),
                &connection,
            )
            .unwrap();
            create_transaction(
                Transaction::build(
                    user.id,
                    TransactionType::Income,
                    "Freelance".to_owned(),
                    500,
                    "logo design",
                ),
                &connection,
            )
            .unwrap();
            create_transaction(
                Transaction::build(
                    stranger.id,
                    TransactionType::Expense,
                    "Secrets".to_owned(),
                    1234,
                    "classified",
                ),
                &connection,
            )
            .unwrap();
            stranger
        };

        let response = export_transactions_endpoint(
            State(transaction_state(&state)),
            Extension(user.id),
            Path("csv".to_owned()),
            no_sort(),
        )
        .await;

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("Freelance"));
        assert!(
            !text.contains("Secrets"),
            "the export must not include other users' transactions"
        );

        // The other user's own export only contains their row.
        let response = export_transactions_endpoint(
            State(transaction_state(&state)),
            Extension(stranger.id),
            Path("csv".to_owned()),
            no_sort(),
        )
        .await;
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("Secrets"));
        assert!(!text.contains("Freelance"));
    }

    #[tokio::test]
    async fn csv_export_sorts_by_requested_column() {
        let (state, user) = get_test_state_with_user();
        {
            let connection = state.db_connection.lock().unwrap();
            for (amount, description, date) in [
                (500, "big", datetime!(2024-06-01 10:00 UTC)),
                (25, "small", datetime!(2024-06-02 10:00 UTC)),
                (150, "medium", datetime!(2024-06-03 10:00 UTC)),
            ] {
                create_transaction(
                    Transaction::build(
                        user.id,
                        TransactionType::Expense,
                        "Food 🍔".to_owned(),
                        amount,
                        description,
                    )
                    .date(date),
                    &connection,
                )
                .unwrap();
            }
        }

        let response = export_transactions_endpoint(
            State(transaction_state(&state)),
            Extension(user.id),
            Path("csv".to_owned()),
            Query(ExportQuery {
                sort_by: Some("amount".to_owned()),
            }),
        )
        .await;

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let descriptions: Vec<&str> = text
            .lines()
            .skip(1)
            .map(|line| line.split(',').nth(3).unwrap())
            .collect();
        assert_eq!(descriptions, vec!["small", "medium", "big"]);
    }

    #[tokio::test]
    async fn excel_export_has_spreadsheet_content_type() {
        let (state, user) = get_test_state_with_user();

        let response = export_transactions_endpoint(
            State(transaction_state(&state)),
            Extension(user.id),
            Path("excel".to_owned()),
            no_sort(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(
            response.headers().get("content-disposition").unwrap(),
            "attachment; filename=\"transactions.xlsx\""
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..2], b"PK");
    }

    #[tokio::test]
    async fn unknown_file_type_is_a_bad_request() {
        let (state, user) = get_test_state_with_user();

        let response = export_transactions_endpoint(
            State(transaction_state(&state)),
            Extension(user.id),
            Path("pdf".to_owned()),
            no_sort(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Invalid file type");
    }
}
