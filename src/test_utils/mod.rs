#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use db::{get_test_connection, insert_expense};
pub(crate) use form::{
    assert_form_action, assert_form_error_message, assert_form_input,
    assert_form_input_with_value, assert_form_select_options, assert_form_submit_button,
    must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document};
pub(crate) use http::{assert_content_type, assert_redirect, assert_status_ok};
