//! Database queries for retrieving dashboard transaction data.
//!
//! This module provides a simplified transaction view optimized for dashboard
//! aggregations, containing only the fields the summaries need.

use rusqlite::Connection;
use time::Date;

use crate::{
    Error,
    transaction::{PaymentStatus, TransactionKind},
    user::UserID,
};

/// A simplified transaction view for dashboard aggregations.
///
/// This is separate from the main Transaction domain model because
/// the dashboard only needs the fields used by the summaries.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Transaction {
    pub kind: TransactionKind,
    pub amount: f64,
    pub date: Date,
    pub description: String,
    pub category: String,
    pub status: Option<PaymentStatus>,
}

/// Gets all of a user's transactions in insertion order.
///
/// The insertion order matters: the category buckets on the dashboard list
/// categories in the order they first appear here.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query preparation or execution fails.
pub(super) fn get_transactions_for_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    // Rows with a kind other than income or expense are excluded here so the
    // aggregation downstream never sees them.
    let mut stmt = connection.prepare(
        "SELECT kind, amount, date, description, category, status
         FROM \"transaction\"
         WHERE user_id = :user_id AND kind IN ('income', 'expense')
         ORDER BY id ASC",
    )?;

    stmt.query_map(&[(":user_id", &user_id.as_i64())], |row| {
        let raw_kind: String = row.get(0)?;
        let kind = TransactionKind::from_str(&raw_kind).ok_or(rusqlite::Error::InvalidQuery)?;
        let raw_status: Option<String> = row.get(5)?;

        Ok(Transaction {
            kind,
            amount: row.get(1)?,
            date: row.get(2)?,
            description: row.get(3)?,
            category: row.get(4)?,
            status: raw_status.as_deref().and_then(PaymentStatus::from_str),
        })
    })?
    .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
    .map_err(|error| error.into())
}
