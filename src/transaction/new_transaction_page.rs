//! Defines the route handlers for the pages that record a new expense or
//! income.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, currency_input_styles, loading_spinner,
    },
    navigation::NavBar,
    timezone::get_local_date,
    transaction::TransactionKind,
};

use super::form::{TransactionFormDefaults, transaction_form_fields};

fn new_transaction_view(kind: TransactionKind, today: Date) -> Markup {
    let (title, active_endpoint) = match kind {
        TransactionKind::Expense => ("New Expense", endpoints::NEW_EXPENSE_VIEW),
        TransactionKind::Income => ("New Income", endpoints::NEW_INCOME_VIEW),
    };
    let nav_bar = NavBar::new(active_endpoint).into_html();
    let defaults = TransactionFormDefaults::empty(kind, today);
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { (title) }

                (transaction_form_fields(&defaults))

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Save"
                }
            }
        }
    };

    base(title, &[currency_input_styles()], &content)
}

/// The state needed for the new expense and new income pages.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for recording a new expense.
pub async fn get_new_expense_page(
    State(state): State<NewTransactionPageState>,
) -> Result<Response, Error> {
    render_new_transaction_page(TransactionKind::Expense, &state)
}

/// Renders the page for recording a new income.
pub async fn get_new_income_page(
    State(state): State<NewTransactionPageState>,
) -> Result<Response, Error> {
    render_new_transaction_page(TransactionKind::Income, &state)
}

fn render_new_transaction_page(
    kind: TransactionKind,
    state: &NewTransactionPageState,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    Ok(new_transaction_view(kind, today).into_response())
}
