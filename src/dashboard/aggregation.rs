//! Transaction data aggregation for the dashboard summaries.
//!
//! Provides pure functions that reduce a user's transactions to income and
//! expense totals, the balance, expense buckets per category, and alerts for
//! pending expenses that are due soon.

use time::{Date, Duration};

use crate::{
    dashboard::transaction::Transaction,
    transaction::{PaymentStatus, TransactionKind},
};

/// How many days ahead the dashboard looks for pending expenses by default.
pub(super) const DEFAULT_DUE_SOON_HORIZON_DAYS: i64 = 7;

/// A pending expense that is due within the alert horizon.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DueSoonAlert {
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub due_date: Date,
    /// Days from the reference date until the due date. Zero means due today.
    pub days_until_due: i64,
}

/// The aggregated numbers shown on the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DashboardSummary {
    /// Sum of all income amounts.
    pub total_income: f64,
    /// Sum of all expense amounts, regardless of payment status.
    pub total_expenses: f64,
    /// `total_income - total_expenses`. Negative when spending exceeds income.
    pub balance: f64,
    /// Expense totals per category, in the order each category first appears
    /// in the input.
    pub expense_by_category: Vec<(String, f64)>,
    /// Pending expenses due between `as_of` and `as_of + horizon_days`
    /// inclusive, in input order.
    pub due_soon: Vec<DueSoonAlert>,
}

/// Reduces `transactions` to the dashboard summary.
///
/// `as_of` is the reference date for the due-soon window: a pending expense is
/// due soon when its date falls within `as_of..=as_of + horizon_days`. Pending
/// expenses dated before `as_of` are overdue rather than due soon and are not
/// alerted.
pub(super) fn summarize(
    transactions: &[Transaction],
    as_of: Date,
    horizon_days: i64,
) -> DashboardSummary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut expense_by_category: Vec<(String, f64)> = Vec::new();
    let mut due_soon = Vec::new();

    let horizon_end = as_of.saturating_add(Duration::days(horizon_days));

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => total_income += transaction.amount,
            TransactionKind::Expense => {
                total_expenses += transaction.amount;

                match expense_by_category
                    .iter_mut()
                    .find(|(category, _)| *category == transaction.category)
                {
                    Some((_, total)) => *total += transaction.amount,
                    None => expense_by_category
                        .push((transaction.category.clone(), transaction.amount)),
                }

                let is_pending = transaction.status == Some(PaymentStatus::Pending);
                if is_pending && transaction.date >= as_of && transaction.date <= horizon_end {
                    due_soon.push(DueSoonAlert {
                        description: transaction.description.clone(),
                        category: transaction.category.clone(),
                        amount: transaction.amount,
                        due_date: transaction.date,
                        days_until_due: (transaction.date - as_of).whole_days(),
                    });
                }
            }
        }
    }

    DashboardSummary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        expense_by_category,
        due_soon,
    }
}
