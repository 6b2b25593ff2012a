//! The fixed category lists for expenses and income.
//!
//! Categories are a closed set per transaction kind. Forms render them as a
//! select element and the database stores the category name as text, so the
//! handlers validate submitted names against these lists.

use crate::transaction::TransactionKind;

/// The categories available for expenses, in display order.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Moradia",
    "Alimentação",
    "Transporte",
    "Lazer",
    "Saúde",
    "Educação",
    "Outros",
];

/// The categories available for income, in display order.
pub const INCOME_CATEGORIES: &[&str] = &[
    "Salário",
    "Freelance",
    "Investimentos",
    "Presentes",
    "Reembolso",
    "Outros",
];

/// The category list for the given transaction kind.
pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Expense => EXPENSE_CATEGORIES,
        TransactionKind::Income => INCOME_CATEGORIES,
    }
}

/// Check whether `category` is a valid category name for `kind`.
pub fn is_valid_category(kind: TransactionKind, category: &str) -> bool {
    categories_for(kind).contains(&category)
}
