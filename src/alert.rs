//! Alert messages displayed to users via out-of-band htmx swaps.
//!
//! Alerts render into the `#alert-container` element that the base layout
//! places at the bottom of every page, so endpoint handlers can surface
//! success and error messages without replacing the page content.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// A dismissable success or error message.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    /// Create a new success alert.
    pub fn success(message: &str, details: &str) -> Self {
        Alert::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Alert::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert without details.
    pub fn error_simple(message: &str) -> Self {
        Self::error(message, "")
    }

    /// Render the alert as an HTML response with the given status code.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Html(self.into_html().into_string())).into_response()
    }

    /// Render the alert as a fragment targeting `#alert-container`.
    pub fn into_html(self) -> Markup {
        let (message, details, color_style) = match self {
            Alert::Success { message, details } => (
                message,
                details,
                "text-green-800 bg-green-50 dark:bg-gray-800 dark:text-green-400",
            ),
            Alert::Error { message, details } => (
                message,
                details,
                "text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400",
            ),
        };

        html! {
            div id="alert-container" hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div
                    class={ "flex items-start gap-3 p-4 mb-4 rounded-lg shadow-lg " (color_style) }
                    role="alert"
                {
                    div class="flex-1"
                    {
                        p class="font-medium" { (message) }

                        @if !details.is_empty() {
                            p class="mt-1 text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        class="shrink-0 text-lg leading-none font-semibold cursor-pointer"
                        aria-label="Close"
                        onclick="this.closest('#alert-container').classList.add('hidden')"
                    {
                        "×"
                    }
                }
            }
        }
    }
}
