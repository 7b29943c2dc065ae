use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_form_action(form: &ElementRef<'_>, action: &str, method: &str) {
    let got_action = form.value().attr("action");
    let got_method = form.value().attr("method");

    assert_eq!(
        got_action,
        Some(action),
        "want form with attribute action=\"{action}\", got {got_action:?}"
    );
    assert_eq!(
        got_method,
        Some(method),
        "want form with attribute method=\"{method}\", got {got_method:?}"
    );
}

/// Assert that the form has an input named `name` of type `type_`, and
/// whether it has the `required` attribute.
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str, required: bool) {
    for input in form.select(&Selector::parse("input").unwrap()) {
        let input_name = input.value().attr("name").unwrap_or_default();

        if input_name == name {
            let input_type = input.value().attr("type").unwrap_or_default();
            let input_required = input.value().attr("required").is_some();

            assert_eq!(
                input_type, type_,
                "want input with type \"{type_}\", got {input_type:?}"
            );

            assert_eq!(
                input_required, required,
                "want input with name {name} to have required={required}, got {input_required}"
            );

            return;
        }
    }

    panic!("No input found with name \"{name}\" and type \"{type_}\"");
}

#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    for input in form.select(&Selector::parse("input").unwrap()) {
        let input_name = input.value().attr("name").unwrap_or_default();

        if input_name == name {
            let input_type = input.value().attr("type").unwrap_or_default();
            let input_value = input.value().attr("value").unwrap_or_default();

            assert_eq!(
                input_type, type_,
                "want input with type \"{type_}\", got {input_type:?}"
            );
            assert_eq!(
                input_value, value,
                "want input with value \"{value}\", got {input_value:?}"
            );

            return;
        }
    }

    panic!("No input found with name \"{name}\" and type \"{type_}\"");
}

/// Assert that the select named `name` offers exactly `want_options`, ignoring
/// options with an empty value (placeholders).
#[track_caller]
pub(crate) fn assert_form_select_options(form: &ElementRef<'_>, name: &str, want_options: &[&str]) {
    let select = form
        .select(&Selector::parse(&format!("select[name={name}]")).unwrap())
        .next()
        .unwrap_or_else(|| panic!("No select found with name \"{name}\""));

    let got_options = select
        .select(&Selector::parse("option").unwrap())
        .filter_map(|option| option.value().attr("value"))
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>();

    assert_eq!(got_options, want_options);
}

#[track_caller]
pub(crate) fn assert_form_submit_button(form: &ElementRef<'_>) {
    let submit_button = form
        .select(&Selector::parse("button").unwrap())
        .next()
        .expect("No button found");

    assert_eq!(
        submit_button.value().attr("type").unwrap_or_default(),
        "submit",
        "want submit button with type=\"submit\""
    );
}

#[track_caller]
pub(crate) fn assert_form_error_message(form: &ElementRef<'_>, want_error_message: &str) {
    let p = Selector::parse("p.text-red-500").unwrap();
    let error_message = form
        .select(&p)
        .next()
        .expect("No error message found")
        .text()
        .collect::<Vec<_>>()
        .join("");
    let got_error_message = error_message.trim();

    assert_eq!(want_error_message, got_error_message);
}
