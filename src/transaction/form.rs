//! The shared form fields for creating and editing transactions.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::{PaymentStatus, Transaction, TransactionBuilder, TransactionKind, categories_for},
};

/// The initial values for the transaction form fields.
pub(super) struct TransactionFormDefaults<'a> {
    /// Whether the form records an expense or income.
    pub kind: TransactionKind,
    /// The prefilled amount, if any.
    pub amount: Option<f64>,
    /// The prefilled date.
    pub date: Date,
    /// The prefilled description, if any.
    pub description: Option<&'a str>,
    /// The preselected category, if any.
    pub category: Option<&'a str>,
    /// The preselected payment status. Ignored for income.
    pub status: PaymentStatus,
    /// The latest date the form accepts, if any.
    ///
    /// Pending expenses may be due in the future, so only income forms cap
    /// the date at today.
    pub max_date: Option<Date>,
}

impl<'a> TransactionFormDefaults<'a> {
    /// The defaults for an empty form: today's date, pending status, no
    /// other values.
    pub fn empty(kind: TransactionKind, today: Date) -> Self {
        Self {
            kind,
            amount: None,
            date: today,
            description: None,
            category: None,
            status: PaymentStatus::Pending,
            max_date: match kind {
                TransactionKind::Income => Some(today),
                TransactionKind::Expense => None,
            },
        }
    }

    /// The defaults for editing `transaction`.
    pub fn from_transaction(transaction: &'a Transaction, today: Date) -> Self {
        Self {
            kind: transaction.kind,
            amount: Some(transaction.amount),
            date: transaction.date,
            description: Some(&transaction.description),
            category: Some(&transaction.category),
            status: transaction.status.unwrap_or(PaymentStatus::Pending),
            max_date: match transaction.kind {
                TransactionKind::Income => Some(today),
                TransactionKind::Expense => None,
            },
        }
    }
}

/// Renders the input fields shared by the create and edit transaction forms.
///
/// The caller supplies the surrounding form element, heading and submit
/// button.
pub(super) fn transaction_form_fields(defaults: &TransactionFormDefaults) -> Markup {
    let categories = categories_for(defaults.kind);

    html! {
        input type="hidden" name="kind" value=(defaults.kind.as_str());

        div
        {
            label
                for="amount"
                class=(FORM_LABEL_STYLE)
            {
                "Amount"
            }

            // w-full needed to ensure input takes the full width when prefilled with a value
            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    min="0.01"
                    placeholder="0.00"
                    required
                    autofocus
                    value=[defaults.amount]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label
                for="date"
                class=(FORM_LABEL_STYLE)
            {
                "Date"
            }

            input
                name="date"
                id="date"
                type="date"
                max=[defaults.max_date]
                required
                value=(defaults.date)
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="description"
                class=(FORM_LABEL_STYLE)
            {
                "Description"
            }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label
                for="category"
                class=(FORM_LABEL_STYLE)
            {
                "Category"
            }

            select
                name="category"
                id="category"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" disabled selected[defaults.category.is_none()] { "Select a category" }

                @for category in categories {
                    option value=(category) selected[defaults.category == Some(*category)] { (category) }
                }
            }
        }

        @if defaults.kind == TransactionKind::Expense {
            fieldset
            {
                legend class=(FORM_LABEL_STYLE) { "Status" }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for status in [PaymentStatus::Pending, PaymentStatus::Paid] {
                        div class="flex items-center gap-2"
                        {
                            input
                                type="radio"
                                name="status"
                                id={ "status-" (status.as_str()) }
                                value=(status.as_str())
                                checked[defaults.status == status]
                                class=(FORM_RADIO_INPUT_STYLE);

                            label
                                for={ "status-" (status.as_str()) }
                                class=(FORM_RADIO_LABEL_STYLE)
                            {
                                (status.as_str())
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The form data for creating or editing a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the transaction is an expense or income.
    pub kind: TransactionKind,
    /// The value of the transaction in reais. Always positive.
    pub amount: f64,
    /// The date when the transaction occurred or is due.
    pub date: Date,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// The category name.
    pub category: String,
    /// The payment status as stored in the database, e.g. "Pendente".
    /// Absent for income.
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionForm {
    /// Convert the form data into a [TransactionBuilder] ready for insertion
    /// or update.
    pub fn into_builder(self) -> TransactionBuilder {
        let mut builder = Transaction::build(self.kind, self.amount, self.date, &self.category);

        if let Some(ref description) = self.description {
            builder = builder.description(description);
        }

        if let Some(status) = self.status.as_deref().and_then(PaymentStatus::from_str) {
            builder = builder.status(status);
        }

        builder
    }
}

#[cfg(test)]
mod form_tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::transaction::{
        EXPENSE_CATEGORIES, INCOME_CATEGORIES, PaymentStatus, TransactionKind,
    };

    use super::{TransactionForm, TransactionFormDefaults, transaction_form_fields};

    fn render(defaults: &TransactionFormDefaults) -> Html {
        Html::parse_fragment(&transaction_form_fields(defaults).into_string())
    }

    #[test]
    fn renders_hidden_kind_input() {
        let defaults = TransactionFormDefaults::empty(TransactionKind::Expense, date!(2025 - 10 - 10));

        let document = render(&defaults);

        let selector = Selector::parse("input[type='hidden'][name='kind']").unwrap();
        let input = document
            .select(&selector)
            .next()
            .expect("no hidden kind input found");
        assert_eq!(input.value().attr("value"), Some("expense"));
    }

    #[test]
    fn expense_form_lists_expense_categories() {
        let defaults = TransactionFormDefaults::empty(TransactionKind::Expense, date!(2025 - 10 - 10));

        let document = render(&defaults);

        let selector = Selector::parse("select[name='category'] option").unwrap();
        let options: Vec<&str> = document
            .select(&selector)
            .filter_map(|option| option.value().attr("value"))
            .filter(|value| !value.is_empty())
            .collect();
        assert_eq!(options, EXPENSE_CATEGORIES);
    }

    #[test]
    fn income_form_lists_income_categories() {
        let defaults = TransactionFormDefaults::empty(TransactionKind::Income, date!(2025 - 10 - 10));

        let document = render(&defaults);

        let selector = Selector::parse("select[name='category'] option").unwrap();
        let options: Vec<&str> = document
            .select(&selector)
            .filter_map(|option| option.value().attr("value"))
            .filter(|value| !value.is_empty())
            .collect();
        assert_eq!(options, INCOME_CATEGORIES);
    }

    #[test]
    fn expense_form_has_status_radios() {
        let defaults = TransactionFormDefaults::empty(TransactionKind::Expense, date!(2025 - 10 - 10));

        let document = render(&defaults);

        let selector = Selector::parse("input[type='radio'][name='status']").unwrap();
        let values: Vec<&str> = document
            .select(&selector)
            .filter_map(|radio| radio.value().attr("value"))
            .collect();
        assert_eq!(values, ["Pendente", "Pago"]);

        let checked = Selector::parse("input[type='radio'][name='status'][checked]").unwrap();
        let checked_values: Vec<&str> = document
            .select(&checked)
            .filter_map(|radio| radio.value().attr("value"))
            .collect();
        assert_eq!(checked_values, ["Pendente"]);
    }

    #[test]
    fn income_form_has_no_status_radios() {
        let defaults = TransactionFormDefaults::empty(TransactionKind::Income, date!(2025 - 10 - 10));

        let document = render(&defaults);

        let selector = Selector::parse("input[type='radio'][name='status']").unwrap();
        assert_eq!(document.select(&selector).count(), 0);
    }

    #[test]
    fn income_date_is_capped_at_today() {
        let today = date!(2025 - 10 - 10);
        let defaults = TransactionFormDefaults::empty(TransactionKind::Income, today);

        let document = render(&defaults);

        let selector = Selector::parse("input[name='date']").unwrap();
        let input = document.select(&selector).next().expect("no date input");
        assert_eq!(input.value().attr("max"), Some(today.to_string().as_str()));
    }

    #[test]
    fn expense_date_allows_future_due_dates() {
        let defaults = TransactionFormDefaults::empty(TransactionKind::Expense, date!(2025 - 10 - 10));

        let document = render(&defaults);

        let selector = Selector::parse("input[name='date']").unwrap();
        let input = document.select(&selector).next().expect("no date input");
        assert_eq!(input.value().attr("max"), None);
    }

    #[test]
    fn form_deserialises_expense_with_status() {
        let form: TransactionForm = serde_urlencoded::from_str(
            "kind=expense&amount=99.9&date=2025-10-15&description=Aluguel&category=Moradia&status=Pago",
        )
        .unwrap();

        let builder = form.into_builder();

        assert_eq!(builder.kind, TransactionKind::Expense);
        assert_eq!(builder.amount, 99.9);
        assert_eq!(builder.date, date!(2025 - 10 - 15));
        assert_eq!(builder.description, "Aluguel");
        assert_eq!(builder.category, "Moradia");
        assert_eq!(builder.status, Some(PaymentStatus::Paid));
    }

    #[test]
    fn form_deserialises_income_without_status() {
        let form: TransactionForm = serde_urlencoded::from_str(
            "kind=income&amount=3500&date=2025-10-01&description=&category=Sal%C3%A1rio",
        )
        .unwrap();

        let builder = form.into_builder();

        assert_eq!(builder.kind, TransactionKind::Income);
        assert_eq!(builder.status, None);
    }
}
