//! Defines the route handler for the page that displays transactions as a
//! table.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, Month};

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_SECONDARY_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        STATUS_BADGE_PAID_STYLE, STATUS_BADGE_PENDING_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, edit_delete_action_links, format_currency,
    },
    navigation::NavBar,
    transaction::{
        EXPENSE_CATEGORIES, INCOME_CATEGORIES, PaymentStatus, Transaction, TransactionFilter,
        TransactionKind, get_transactions,
    },
    user::UserID,
};

/// The query parameters for filtering the transactions page.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionsQuery {
    /// A month in "YYYY-MM" format.
    pub month: Option<String>,
    /// An exact category name.
    pub category: Option<String>,
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render an overview of the user's transactions, most recent first.
///
/// Unknown month or category values are ignored rather than rejected, so a
/// stale link still renders the unfiltered page.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Response, Error> {
    let selection = FilterSelection::from_query(&query);

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_transactions(user_id, &selection.filter, &connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    Ok(transactions_view(&transactions, &selection).into_response())
}

/// The validated filter along with the raw values to echo back into the
/// filter form.
struct FilterSelection {
    filter: TransactionFilter,
    month: Option<String>,
    category: Option<String>,
}

impl FilterSelection {
    fn from_query(query: &TransactionsQuery) -> Self {
        let month_bounds = query.month.as_deref().and_then(|raw| {
            let bounds = parse_month(raw);
            if bounds.is_none() {
                tracing::warn!("Ignoring invalid month filter {raw:?}");
            }
            bounds
        });

        let category = query.category.as_deref().filter(|raw| {
            let known = is_known_category(raw);
            if !known {
                tracing::warn!("Ignoring unknown category filter {raw:?}");
            }
            known
        });

        Self {
            filter: TransactionFilter {
                month: month_bounds,
                category: category.map(|category| category.to_owned()),
            },
            month: month_bounds.and(query.month.clone()),
            category: category.map(|category| category.to_owned()),
        }
    }

    fn is_active(&self) -> bool {
        self.month.is_some() || self.category.is_some()
    }
}

/// Parse a "YYYY-MM" string into the first and last date of that month.
fn parse_month(raw: &str) -> Option<(Date, Date)> {
    let (year, month) = raw.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u8 = month.parse().ok()?;
    let month = Month::try_from(month).ok()?;

    let start = Date::from_calendar_date(year, month, 1).ok()?;
    let end = Date::from_calendar_date(year, month, month.length(year)).ok()?;

    Some((start, end))
}

fn is_known_category(category: &str) -> bool {
    EXPENSE_CATEGORIES.contains(&category) || INCOME_CATEGORIES.contains(&category)
}

fn transactions_view(transactions: &[Transaction], selection: &FilterSelection) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex flex-wrap items-center justify-between gap-4 mb-4"
            {
                h1 class="text-2xl font-bold" { "Transactions" }

                div class="flex gap-2"
                {
                    a href=(endpoints::NEW_EXPENSE_VIEW) class=(BUTTON_SECONDARY_STYLE) { "New Expense" }
                    a href=(endpoints::NEW_INCOME_VIEW) class=(BUTTON_SECONDARY_STYLE) { "New Income" }
                }
            }

            (filter_form(selection))

            div class="relative overflow-x-auto shadow-md sm:rounded-lg"
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class="px-6 py-3 text-right" { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @if transactions.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td
                                    colspan="6"
                                    data-empty-state="true"
                                    class="px-6 py-8 text-center text-gray-500 dark:text-gray-400"
                                {
                                    @if selection.is_active() {
                                        "No transactions match the selected filters."
                                    } @else {
                                        "No transactions yet."
                                    }
                                }
                            }
                        } @else {
                            @for transaction in transactions {
                                (transaction_row(transaction))
                            }
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

fn filter_form(selection: &FilterSelection) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            class="flex flex-wrap items-end gap-4 mb-4"
        {
            div
            {
                label for="month" class="block mb-1 text-sm font-medium" { "Month" }
                input
                    type="month"
                    name="month"
                    id="month"
                    value=[selection.month.as_deref()]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class="block mb-1 text-sm font-medium" { "Category" }
                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selection.category.is_none()] { "All categories" }

                    optgroup label="Expenses"
                    {
                        @for category in EXPENSE_CATEGORIES {
                            option
                                value=(category)
                                selected[selection.category.as_deref() == Some(*category)]
                            {
                                (category)
                            }
                        }
                    }

                    optgroup label="Income"
                    {
                        @for category in INCOME_CATEGORIES {
                            // "Outros" appears in both lists, only mark the expense entry
                            // selected to keep the HTML valid.
                            option
                                value=(category)
                                selected[selection.category.as_deref() == Some(*category)
                                    && !EXPENSE_CATEGORIES.contains(category)]
                            {
                                (category)
                            }
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Filter" }

            @if selection.is_active() {
                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "Clear" }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (amount_str, amount_class) = match transaction.kind {
        TransactionKind::Income => (
            format_currency(transaction.amount),
            "text-green-600 dark:text-green-500",
        ),
        TransactionKind::Expense => (
            format_currency(-transaction.amount),
            "text-red-600 dark:text-red-500",
        ),
    };
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let delete_url = format_endpoint(endpoints::TRANSACTION, transaction.id);
    let confirm_message = format!(
        "Are you sure you want to delete the transaction '{}'? This cannot be undone.",
        transaction.description
    );

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-row="true"
        {
            td class=(TABLE_CELL_STYLE) { time datetime=(transaction.date) { (transaction.date) } }
            td class=(TABLE_CELL_STYLE) { (transaction.description) }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class={ "px-6 py-4 text-right whitespace-nowrap " (amount_class) } { (amount_str) }
            td class=(TABLE_CELL_STYLE) { (status_badge(transaction.status)) }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    (edit_delete_action_links(
                        &edit_url,
                        &delete_url,
                        &confirm_message,
                        "closest tr",
                        "delete",
                    ))
                }
            }
        }
    }
}

fn status_badge(status: Option<PaymentStatus>) -> Markup {
    html! {
        @match status {
            Some(PaymentStatus::Pending) => {
                span class=(STATUS_BADGE_PENDING_STYLE) { "Pendente" }
            }
            Some(PaymentStatus::Paid) => {
                span class=(STATUS_BADGE_PAID_STYLE) { "Pago" }
            }
            None => {
                span class="text-gray-400 dark:text-gray-500" { "-" }
            }
        }
    }
}
