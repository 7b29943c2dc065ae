//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/delete/{expense_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with the spending summary.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for adding an expense (GET) and the form target for creating one (POST).
pub const ADD_EXPENSE: &str = "/add";
/// The page listing the most recent expenses.
pub const RECENT_VIEW: &str = "/recent";
/// The page with the spending charts.
pub const CHARTS_VIEW: &str = "/charts";
/// The route for deleting an expense.
pub const DELETE_EXPENSE: &str = "/delete/{expense_id}";

/// The route for the per-category spending totals.
pub const SUMMARY_API: &str = "/api/summary";
/// The route for the most recent expenses as JSON.
pub const RECENT_API: &str = "/api/recent";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/delete/{expense_id}', '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::ADD_EXPENSE);
        assert_endpoint_is_valid_uri(endpoints::RECENT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::CHARTS_VIEW);
        assert_endpoint_is_valid_uri(endpoints::DELETE_EXPENSE);

        assert_endpoint_is_valid_uri(endpoints::SUMMARY_API);
        assert_endpoint_is_valid_uri(endpoints::RECENT_API);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::DELETE_EXPENSE, 7);

        assert_eq!(formatted_path, "/delete/7");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 1);

        assert_eq!(formatted_path, "/hello/1/bye");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
