//! The form for entering a new expense, shared by the add page and the dashboard.

use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints,
    expense::SUGGESTED_CATEGORIES,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// Render a form that posts a new expense to the add endpoint.
///
/// The date defaults to `today`. If `error_message` is set, it is shown above
/// the submit button. Pages using this form should include
/// [crate::html::dollar_input_styles] in their head elements.
pub(crate) fn expense_form(today: Date, error_message: Option<&str>) -> Markup {
    html! {
        form
            method="post"
            action=(endpoints::ADD_EXPENSE)
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    id="category"
                    name="category"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" disabled selected { "Select a category" }

                    @for category in SUGGESTED_CATEGORIES {
                        option value=(category) { (category) }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                div class="input-wrapper w-full"
                {
                    input
                        id="amount"
                        type="number"
                        name="amount"
                        step="0.01"
                        min="0.01"
                        placeholder="0.00"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    id="description"
                    type="text"
                    name="description"
                    placeholder="What was it for?"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    id="date"
                    type="date"
                    name="date"
                    value=(today)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if let Some(error_message) = error_message {
                p class="text-red-500 text-base"
                {
                    (error_message)
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}
