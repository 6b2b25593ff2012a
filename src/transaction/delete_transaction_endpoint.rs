//! Defines the endpoint for deleting a transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState, Error, alert::Alert, database_id::TransactionID,
    transaction::core::delete_transaction, user::UserID,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting a transaction.
///
/// The delete button uses hx-swap="delete", so a 200 response removes the
/// table row on the client. The status code has to be 200 OK or HTMX will
/// not delete the row.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionID>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return render_error_alert();
        }
    };

    match delete_transaction(transaction_id, user_id, &connection) {
        Ok(()) => Alert::success("Transaction deleted", "").into_response_with_status(StatusCode::OK),
        Err(Error::DeleteMissingTransaction) => Alert::error(
            "Could not delete transaction",
            "The transaction could not be found. \
            Try refreshing the page to see if the transaction has already been deleted.",
        )
        .into_response_with_status(StatusCode::NOT_FOUND),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            render_error_alert()
        }
    }
}

fn render_error_alert() -> Response {
    Alert::error(
        "Could not delete transaction",
        "An unexpected error occurred. Try again later or check the logs on the server.",
    )
    .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
}
