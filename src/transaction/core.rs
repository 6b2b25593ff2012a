//! Defines the core data models and database queries for transactions.

use std::fmt::Display;

use rusqlite::{Connection, Row, params, params_from_iter};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::TransactionID, user::UserID};

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction adds money to or removes money from the user's
/// pocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned, e.g. salary, freelance work.
    Income,
    /// Money spent, e.g. rent, groceries.
    Expense,
}

impl TransactionKind {
    /// The text stored in the database `kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Parse the database `kind` column text.
    pub fn from_str(kind: &str) -> Option<Self> {
        match kind {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an expense has been paid yet.
///
/// Income transactions have no payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// The expense is still due.
    Pending,
    /// The expense has been paid.
    Paid,
}

impl PaymentStatus {
    /// The text stored in the database `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pendente",
            PaymentStatus::Paid => "Pago",
        }
    }

    /// Parse the database `status` column text.
    pub fn from_str(status: &str) -> Option<Self> {
        match status {
            "Pendente" => Some(PaymentStatus::Pending),
            "Pago" => Some(PaymentStatus::Paid),
            _ => None,
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionID,
    /// The ID of the user that owns the transaction.
    pub user_id: UserID,
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The amount of money spent or earned. Always positive; `kind` carries
    /// the direction.
    pub amount: f64,
    /// When the transaction happened, or for a pending expense, when it is
    /// due.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The category name, from the fixed list for the transaction's kind.
    pub category: String,
    /// The payment status. `None` for income.
    pub status: Option<PaymentStatus>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        kind: TransactionKind,
        amount: f64,
        date: Date,
        category: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            amount,
            date,
            description: String::new(),
            category: category.to_owned(),
            status: match kind {
                TransactionKind::Expense => Some(PaymentStatus::Pending),
                TransactionKind::Income => None,
            },
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Expenses default to [PaymentStatus::Pending]; income has no payment
/// status. Call [create_transaction] to insert the finished builder.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// Whether the transaction is income or an expense.
    pub kind: TransactionKind,
    /// The monetary amount of the transaction. Always positive.
    pub amount: f64,
    /// The date when the transaction occurred or is due.
    pub date: Date,
    /// A human-readable description of the transaction.
    pub description: String,
    /// The category name.
    pub category: String,
    /// The payment status. Ignored for income.
    pub status: Option<PaymentStatus>,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the payment status for the transaction.
    ///
    /// Has no effect on income, which never has a payment status.
    pub fn status(mut self, status: PaymentStatus) -> Self {
        if self.kind == TransactionKind::Expense {
            self.status = Some(status);
        }
        self
    }
}

/// The optional filters for listing a user's transactions.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionFilter {
    /// Keep only transactions within this month.
    pub month: Option<(Date, Date)>,
    /// Keep only transactions with this exact category name.
    pub category: Option<String>,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category is not in the fixed list for the
///   transaction's kind,
/// - [Error::InvalidAmount] if the amount is not a positive number,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    validate_builder(&builder)?;

    let status = match builder.kind {
        TransactionKind::Expense => builder.status.or(Some(PaymentStatus::Pending)),
        TransactionKind::Income => None,
    };

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, kind, amount, date, description, category, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING id, user_id, kind, amount, date, description, category, status",
        )?
        .query_row(
            params![
                user_id.as_i64(),
                builder.kind.as_str(),
                builder.amount,
                builder.date,
                builder.description,
                builder.category,
                status.map(|status| status.as_str()),
            ],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// The query is scoped to `user_id`, so asking for another user's transaction
/// behaves the same as asking for one that does not exist.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a transaction owned by
///   `user_id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(
    id: TransactionID,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, user_id, kind, amount, date, description, category, status
             FROM \"transaction\" WHERE id = :id AND user_id = :user_id",
        )?
        .query_row(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// List a user's transactions, most recent first.
///
/// Transactions are ordered by date descending and then by ID descending, so
/// two transactions on the same day appear newest first. `filter` optionally
/// restricts the list to a month and/or a category.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_transactions(
    user_id: UserID,
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut query = String::from(
        "SELECT id, user_id, kind, amount, date, description, category, status
         FROM \"transaction\" WHERE user_id = ?1",
    );
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id.as_i64())];

    if let Some((month_start, month_end)) = filter.month {
        query.push_str(" AND date >= ? AND date <= ?");
        params.push(Box::new(month_start));
        params.push(Box::new(month_end));
    }

    if let Some(ref category) = filter.category {
        query.push_str(" AND category = ?");
        params.push(Box::new(category.clone()));
    }

    query.push_str(" ORDER BY date DESC, id DESC");

    let transactions = connection
        .prepare(&query)?
        .query_map(params_from_iter(params.iter().map(|p| p.as_ref())), |row| {
            map_transaction_row(row)
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(transactions)
}

/// Update an existing transaction with the fields from `builder`.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] or [Error::InvalidAmount] if the builder fails
///   validation,
/// - [Error::UpdateMissingTransaction] if `id` does not refer to a
///   transaction owned by `user_id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionID,
    builder: TransactionBuilder,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    validate_builder(&builder)?;

    let status = match builder.kind {
        TransactionKind::Expense => builder.status.or(Some(PaymentStatus::Pending)),
        TransactionKind::Income => None,
    };

    let rows_changed = connection.execute(
        "UPDATE \"transaction\"
         SET kind = ?1, amount = ?2, date = ?3, description = ?4, category = ?5, status = ?6
         WHERE id = ?7 AND user_id = ?8",
        params![
            builder.kind.as_str(),
            builder.amount,
            builder.date,
            builder.description,
            builder.category,
            status.map(|status| status.as_str()),
            id,
            user_id.as_i64(),
        ],
    )?;

    if rows_changed == 0 {
        return Err(Error::UpdateMissingTransaction);
    }

    Ok(())
}

/// Delete the transaction with the given `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a
///   transaction owned by `user_id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(
    id: TransactionID,
    user_id: UserID,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_changed = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
        params![id, user_id.as_i64()],
    )?;

    if rows_changed == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

fn validate_builder(builder: &TransactionBuilder) -> Result<(), Error> {
    if !builder.amount.is_finite() || builder.amount <= 0.0 {
        return Err(Error::InvalidAmount(builder.amount));
    }

    if !crate::transaction::is_valid_category(builder.kind, &builder.category) {
        return Err(Error::InvalidCategory(builder.category.clone()));
    }

    Ok(())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                amount REAL NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                status TEXT,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Composite index used by the transactions page and the dashboard.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id: i64 = row.get(1)?;
    let raw_kind: String = row.get(2)?;
    let amount = row.get(3)?;
    let date = row.get(4)?;
    let description = row.get(5)?;
    let category = row.get(6)?;
    let raw_status: Option<String> = row.get(7)?;

    let kind =
        TransactionKind::from_str(&raw_kind).ok_or(rusqlite::Error::InvalidQuery)?;
    let status = raw_status.as_deref().and_then(PaymentStatus::from_str);

    Ok(Transaction {
        id,
        user_id: UserID::new(user_id),
        kind,
        amount,
        date,
        description,
        category,
        status,
    })
}

// ============================================================================
// TESTS
// ============================================================================
