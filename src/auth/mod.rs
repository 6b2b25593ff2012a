//! Authentication: the log-in flow and the middleware that guards routes.

mod log_in;
mod middleware;
mod redirect;
mod token;

pub use log_in::{get_log_in_page, post_log_in};
pub use middleware::{AuthState, auth_guard, auth_guard_hx};
pub(crate) use redirect::{build_log_in_redirect_url, normalize_redirect_url};
pub(crate) use token::Token;
