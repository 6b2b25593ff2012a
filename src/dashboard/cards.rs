//! Summary cards for the dashboard header.
//!
//! Shows total income, total expenses, and the resulting balance.

use maud::{Markup, html};

use crate::{dashboard::aggregation::DashboardSummary, html::currency_rounded_with_tooltip};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col gap-1";
const CARD_LABEL_STYLE: &str = "text-sm text-gray-600 dark:text-gray-400";
const CARD_GREEN_STYLE: &str = "text-3xl font-bold text-green-600 dark:text-green-400";
const CARD_RED_STYLE: &str = "text-3xl font-bold text-red-600 dark:text-red-400";

/// Renders the three summary cards: income, expenses, and balance.
///
/// The balance is green when non-negative and red when the user has spent
/// more than they earned.
pub(super) fn summary_cards_view(summary: &DashboardSummary) -> Markup {
    let balance_style = if summary.balance >= 0.0 {
        CARD_GREEN_STYLE
    } else {
        CARD_RED_STYLE
    };

    html! {
        section id="summary-cards" class="w-full mx-auto mb-8" {
            div class="grid grid-cols-1 sm:grid-cols-3 gap-4" {
                div class=(CARD_STYLE) {
                    span class=(CARD_LABEL_STYLE) { "Income" }
                    span class=(CARD_GREEN_STYLE) {
                        (currency_rounded_with_tooltip(summary.total_income))
                    }
                }

                div class=(CARD_STYLE) {
                    span class=(CARD_LABEL_STYLE) { "Expenses" }
                    span class=(CARD_RED_STYLE) {
                        (currency_rounded_with_tooltip(summary.total_expenses))
                    }
                }

                div class=(CARD_STYLE) {
                    span class=(CARD_LABEL_STYLE) { "Balance" }
                    span class=(balance_style) {
                        (currency_rounded_with_tooltip(summary.balance))
                    }
                }
            }
        }
    }
}
