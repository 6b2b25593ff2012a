//! Everything for recording and displaying transactions: the data model and
//! database queries, the fixed category lists, the pages for listing,
//! creating and editing transactions, and the API endpoints behind them.

mod categories;
mod core;
mod create_transaction_endpoint;
mod delete_transaction_endpoint;
mod edit_page;
mod edit_transaction_endpoint;
mod form;
mod new_transaction_page;
mod transactions_page;

pub use categories::{EXPENSE_CATEGORIES, INCOME_CATEGORIES, categories_for, is_valid_category};
pub use core::{
    PaymentStatus, Transaction, TransactionBuilder, TransactionFilter, TransactionKind,
    create_transaction, create_transaction_table, delete_transaction, get_transaction,
    get_transactions, update_transaction,
};
pub use create_transaction_endpoint::create_transaction_endpoint;
pub use delete_transaction_endpoint::delete_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
pub use edit_transaction_endpoint::edit_transaction_endpoint;
pub use new_transaction_page::{get_new_expense_page, get_new_income_page};
pub use transactions_page::get_transactions_page;
