//! Defines the endpoint for updating an existing transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error, alert::Alert, database_id::TransactionID, endpoints,
    transaction::core::update_transaction, user::UserID,
};

use super::form::TransactionForm;

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for updating a transaction, redirects to the transactions
/// view on success.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionID>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return render_error_alert();
        }
    };

    match update_transaction(transaction_id, form.into_builder(), user_id, &connection) {
        Ok(()) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ (Error::InvalidCategory(_) | Error::InvalidAmount(_))) => {
            Alert::error_simple(&error.to_string())
                .into_response_with_status(StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(Error::UpdateMissingTransaction) => Alert::error(
            "Could not update transaction",
            "The transaction could not be found. \
            Try refreshing the page to see if it has been deleted.",
        )
        .into_response_with_status(StatusCode::NOT_FOUND),
        Err(error) => {
            tracing::error!("Could not update transaction {transaction_id}: {error}");
            render_error_alert()
        }
    }
}

fn render_error_alert() -> Response {
    Alert::error(
        "Could not update transaction",
        "Try again or check the server logs.",
    )
    .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, State},
        http::{HeaderValue, StatusCode},
    };
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        endpoints,
        transaction::{
            PaymentStatus, Transaction, TransactionKind, create_transaction, get_transaction,
        },
        user::UserID,
    };

    use super::{EditTransactionState, TransactionForm, edit_transaction_endpoint};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn insert_test_user(connection: &Connection) -> UserID {
        connection
            .execute(
                "INSERT INTO user (name, email, cpf, password)
                 VALUES ('Ana', 'ana@example.com', '529.982.247-25', 'hunter2')",
                (),
            )
            .unwrap();
        UserID::new(connection.last_insert_rowid())
    }

    #[tokio::test]
    async fn can_update_transaction() {
        let conn = get_test_connection();
        let user_id = insert_test_user(&conn);
        let transaction = create_transaction(
            Transaction::build(
                TransactionKind::Expense,
                99.9,
                date!(2025 - 10 - 05),
                "Moradia",
            )
            .description("Aluguel"),
            user_id,
            &conn,
        )
        .unwrap();
        let state = EditTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        };
        let form = TransactionForm {
            kind: TransactionKind::Expense,
            amount: 150.0,
            date: date!(2025 - 10 - 10),
            description: Some("Consulta".to_owned()),
            category: "Saúde".to_owned(),
            status: Some("Pago".to_owned()),
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Extension(user_id),
            Path(transaction.id),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT),
            Some(&HeaderValue::from_static(endpoints::TRANSACTIONS_VIEW))
        );
        let connection = state.db_connection.lock().unwrap();
        let updated = get_transaction(transaction.id, user_id, &connection).unwrap();
        assert_eq!(updated.amount, 150.0);
        assert_eq!(updated.date, date!(2025 - 10 - 10));
        assert_eq!(updated.description, "Consulta");
        assert_eq!(updated.category, "Saúde");
        assert_eq!(updated.status, Some(PaymentStatus::Paid));
    }

    #[tokio::test]
    async fn update_returns_404_for_missing_transaction() {
        let conn = get_test_connection();
        let user_id = insert_test_user(&conn);
        let state = EditTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        };
        let form = TransactionForm {
            kind: TransactionKind::Expense,
            amount: 150.0,
            date: date!(2025 - 10 - 10),
            description: None,
            category: "Saúde".to_owned(),
            status: None,
        };

        let response =
            edit_transaction_endpoint(State(state), Extension(user_id), Path(999), Form(form))
                .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_rejects_invalid_category() {
        let conn = get_test_connection();
        let user_id = insert_test_user(&conn);
        let transaction = create_transaction(
            Transaction::build(
                TransactionKind::Expense,
                99.9,
                date!(2025 - 10 - 05),
                "Moradia",
            ),
            user_id,
            &conn,
        )
        .unwrap();
        let state = EditTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        };
        let form = TransactionForm {
            kind: TransactionKind::Expense,
            amount: 99.9,
            date: date!(2025 - 10 - 05),
            description: None,
            category: "Viagens".to_owned(),
            status: None,
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Extension(user_id),
            Path(transaction.id),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let connection = state.db_connection.lock().unwrap();
        let unchanged = get_transaction(transaction.id, user_id, &connection).unwrap();
        assert_eq!(unchanged.category, "Moradia");
    }

    #[tokio::test]
    async fn cannot_update_other_users_transaction() {
        let conn = get_test_connection();
        let owner = insert_test_user(&conn);
        conn.execute(
            "INSERT INTO user (name, email, cpf, password)
             VALUES ('Bia', 'bia@example.com', '111.444.777-35', 'hunter2')",
            (),
        )
        .unwrap();
        let other_user = UserID::new(conn.last_insert_rowid());
        let transaction = create_transaction(
            Transaction::build(
                TransactionKind::Expense,
                99.9,
                date!(2025 - 10 - 05),
                "Moradia",
            ),
            owner,
            &conn,
        )
        .unwrap();
        let state = EditTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        };
        let form = TransactionForm {
            kind: TransactionKind::Expense,
            amount: 1.0,
            date: date!(2025 - 10 - 05),
            description: None,
            category: "Moradia".to_owned(),
            status: None,
        };

        let response = edit_transaction_endpoint(
            State(state.clone()),
            Extension(other_user),
            Path(transaction.id),
            Form(form),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let connection = state.db_connection.lock().unwrap();
        let unchanged = get_transaction(transaction.id, owner, &connection).unwrap();
        assert_eq!(unchanged.amount, 99.9);
    }
}
