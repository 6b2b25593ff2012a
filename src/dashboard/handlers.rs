//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - The state type used by the handler

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{DEFAULT_DUE_SOON_HORIZON_DAYS, DashboardSummary, summarize},
        cards::summary_cards_view,
        tables::{due_soon_table, expense_by_category_table},
        transaction::get_transactions_for_user,
    },
    endpoints,
    html::{base, link},
    navigation::NavBar,
    timezone::get_local_date,
    user::UserID,
};

/// The state needed for displaying the dashboard page.
///
/// Contains the database connection and timezone information required
/// by the dashboard handler.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with an overview of the user's finances.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    let today = get_local_date(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let transactions = get_transactions_for_user(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let summary = summarize(&transactions, today, DEFAULT_DUE_SOON_HORIZON_DAYS);

    Ok(dashboard_view(nav_bar, &summary).into_response())
}

/// Renders the dashboard page when no transaction data exists.
///
/// Displays a helpful message with links to add an expense or income.
///
/// # Arguments
/// * `nav_bar` - Navigation bar component
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_expense_link = link(endpoints::NEW_EXPENSE_VIEW, "an expense");
    let new_income_link = link(endpoints::NEW_INCOME_VIEW, "some income");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Your summaries will show up here once you add some transactions.
                Start by adding " (new_expense_link) " or " (new_income_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with the summary cards and tables.
///
/// # Arguments
/// * `nav_bar` - Navigation bar component
/// * `summary` - The aggregated dashboard data
fn dashboard_view(nav_bar: NavBar, summary: &DashboardSummary) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (summary_cards_view(summary))

            section
                id="dashboard-tables"
                class="w-full mx-auto mb-4"
            {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
                {
                    (expense_by_category_table(summary))
                    (due_soon_table(&summary.due_soon))
                }
            }
        }
    );

    base("Dashboard", &[], &content)
}
