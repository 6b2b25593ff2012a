//! Table views for dashboard data display.
//!
//! Provides HTML tables for the expense-by-category breakdown and for the
//! pending expenses that are due soon.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::{DashboardSummary, DueSoonAlert},
    html::{
        STATUS_BADGE_PENDING_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
};

const TABLE_HEADER_CELL_STYLE: &str = "px-3 py-3 text-left";
const TABLE_AMOUNT_CELL_STYLE: &str = "text-right whitespace-nowrap";

/// Renders the table of expense totals per category.
///
/// The rows keep the order of [DashboardSummary::expense_by_category], which
/// is the order the categories first appear in the user's transactions.
pub(super) fn expense_by_category_table(summary: &DashboardSummary) -> Markup {
    if summary.expense_by_category.is_empty() {
        return html! {};
    }

    html! {
        div {
            h3 class="text-xl font-semibold mb-4" { "Expenses by Category" }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Category" }
                            th scope="col" class={(TABLE_HEADER_CELL_STYLE) " text-right"} { "Total" }
                        }
                    }
                    tbody {
                        @for (category, total) in &summary.expense_by_category {
                            tr class=(TABLE_ROW_STYLE) {
                                th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"} {
                                    (category)
                                }
                                td class={(TABLE_CELL_STYLE) " " (TABLE_AMOUNT_CELL_STYLE)} {
                                    (format_currency(*total))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the table of pending expenses due within the alert horizon.
///
/// Shows nothing when no alerts are due, rather than an empty table.
pub(super) fn due_soon_table(alerts: &[DueSoonAlert]) -> Markup {
    if alerts.is_empty() {
        return html! {};
    }

    html! {
        div {
            h3 class="text-xl font-semibold mb-4" { "Due Soon" }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_HEADER_CELL_STYLE) { "Due" }
                            th scope="col" class={(TABLE_HEADER_CELL_STYLE) " text-right"} { "Amount" }
                        }
                    }
                    tbody {
                        @for alert in alerts {
                            tr class=(TABLE_ROW_STYLE) {
                                th scope="row" class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"} {
                                    (alert.description)
                                }
                                td class=(TABLE_CELL_STYLE) {
                                    (alert.category)
                                }
                                td class=(TABLE_CELL_STYLE) {
                                    span class=(STATUS_BADGE_PENDING_STYLE) {
                                        (due_label(alert.days_until_due))
                                    }
                                }
                                td class={(TABLE_CELL_STYLE) " " (TABLE_AMOUNT_CELL_STYLE)} {
                                    (format_currency(alert.amount))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn due_label(days_until_due: i64) -> String {
    match days_until_due {
        0 => "Due today".to_owned(),
        1 => "Due tomorrow".to_owned(),
        days => format!("Due in {days} days"),
    }
}
