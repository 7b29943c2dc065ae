//! Application router configuration.

use axum::{
    Router,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    AppState,
    api::{get_recent_api, get_summary_api},
    charts::get_charts_page,
    dashboard::get_dashboard_page,
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_add_expense_page, get_recent_page,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::ADD_EXPENSE,
            get(get_add_expense_page).post(create_expense_endpoint),
        )
        .route(endpoints::RECENT_VIEW, get(get_recent_page))
        .route(endpoints::CHARTS_VIEW, get(get_charts_page))
        .route(endpoints::DELETE_EXPENSE, post(delete_expense_endpoint))
        .route(endpoints::SUMMARY_API, get(get_summary_api))
        .route(endpoints::RECENT_API, get(get_recent_api))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Response {
    redirect_found(endpoints::DASHBOARD_VIEW)
}

/// Get a response that redirects the client to `location` with the status 302 Found.
pub(crate) fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_owned())]).into_response()
}


#[cfg(test)]
mod router_tests {
    use axum::http::{HeaderValue, StatusCode, header::REFERER};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;

    use crate::{AppState, endpoints, endpoints::format_endpoint, routing::build_router};

    fn get_test_server() -> TestServer {
        let state = AppState::new(Connection::open_in_memory().unwrap(), "Etc/UTC")
            .expect("Could not create app state");
        let app = build_router(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    async fn get_recent_json(server: &TestServer) -> Vec<Value> {
        let response = server.get(endpoints::RECENT_API).await;
        response.assert_status_ok();

        response.json::<Vec<Value>>()
    }

    #[tokio::test]
    async fn html_pages_render() {
        let server = get_test_server();

        for path in [
            endpoints::DASHBOARD_VIEW,
            endpoints::ADD_EXPENSE,
            endpoints::RECENT_VIEW,
            endpoints::CHARTS_VIEW,
        ] {
            let response = server.get(path).await;

            response.assert_status_ok();
            assert_eq!(
                response.header("content-type"),
                "text/html; charset=utf-8",
                "wrong content type for {path}"
            );
        }
    }

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(response.header("location"), endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        server
            .get("/does/not/exist")
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn add_then_list_and_summarise() {
        let server = get_test_server();
        let expenses = [
            ("Food", "10", "Lunch", "2025-10-01"),
            ("Food", "5", "Coffee", "2025-10-02"),
            ("Transport", "20", "Taxi", "2025-10-03"),
        ];

        for (category, amount, description, date) in expenses {
            let response = server
                .post(endpoints::ADD_EXPENSE)
                .form(&[
                    ("category", category),
                    ("amount", amount),
                    ("description", description),
                    ("date", date),
                ])
                .await;

            response.assert_status(StatusCode::FOUND);
            assert_eq!(response.header("location"), endpoints::RECENT_VIEW);
        }

        let recent = get_recent_json(&server).await;
        let dates = recent
            .iter()
            .map(|expense| expense["date"].as_str().unwrap_or_default())
            .collect::<Vec<_>>();
        assert_eq!(dates, vec!["2025-10-03", "2025-10-02", "2025-10-01"]);

        let summary = server.get(endpoints::SUMMARY_API).await;
        summary.assert_status_ok();
        let mut totals = summary.json::<Vec<Value>>();
        totals.sort_by_key(|total| total["category"].as_str().unwrap_or_default().to_owned());
        assert_eq!(
            totals,
            vec![
                serde_json::json!({"category": "Food", "value": 15.0}),
                serde_json::json!({"category": "Transport", "value": 20.0}),
            ]
        );
    }

    #[tokio::test]
    async fn invalid_add_redirects_back_to_form() {
        let server = get_test_server();

        let response = server
            .post(endpoints::ADD_EXPENSE)
            .form(&[("category", "Bills"), ("amount", "-4"), ("date", "2025-10-01")])
            .await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(
            response.header("location"),
            format!("{}?error=invalid_amount", endpoints::ADD_EXPENSE)
        );
        assert!(get_recent_json(&server).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_date_is_server_error() {
        let server = get_test_server();

        let response = server
            .post(endpoints::ADD_EXPENSE)
            .form(&[("category", "Bills"), ("amount", "4"), ("date", "yesterday")])
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(get_recent_json(&server).await.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_expense_and_redirects_to_referer() {
        let server = get_test_server();
        server
            .post(endpoints::ADD_EXPENSE)
            .form(&[("category", "Bills"), ("amount", "80"), ("date", "2025-10-01")])
            .await
            .assert_status(StatusCode::FOUND);
        let id = get_recent_json(&server).await[0]["id"]
            .as_i64()
            .expect("expense should have an integer id");

        let response = server
            .post(&format_endpoint(endpoints::DELETE_EXPENSE, id))
            .add_header(REFERER, HeaderValue::from_static("/dashboard"))
            .await;

        response.assert_status(StatusCode::FOUND);
        assert_eq!(response.header("location"), "/dashboard");
        assert!(get_recent_json(&server).await.is_empty());
    }

    #[tokio::test]
    async fn delete_missing_expense_is_not_found() {
        let server = get_test_server();
        server
            .post(endpoints::ADD_EXPENSE)
            .form(&[("category", "Bills"), ("amount", "80"), ("date", "2025-10-01")])
            .await
            .assert_status(StatusCode::FOUND);

        let response = server
            .post(&format_endpoint(endpoints::DELETE_EXPENSE, 999))
            .await;

        response.assert_status_not_found();
        assert_eq!(get_recent_json(&server).await.len(), 1);
    }

    #[tokio::test]
    async fn delete_with_non_integer_id_is_bad_request() {
        let server = get_test_server();

        server
            .post("/delete/abc")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
