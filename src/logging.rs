//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::Response,
};

/// The maximum number of characters of a request or response body that is
/// logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] characters, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = read_body(body).await;
    log_request(&parts, &String::from_utf8_lossy(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = read_body(body).await;
    log_response(&parts, &String::from_utf8_lossy(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

async fn read_body(body: Body) -> Bytes {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .inspect_err(|error| tracing::error!("could not read body for logging: {error}"))
        .unwrap_or_default()
}

/// Returns the first [LOG_BODY_LENGTH_LIMIT] characters of `body`, or `None`
/// if the body is short enough to be logged in full.
fn truncate_body(body: &str) -> Option<&str> {
    body.char_indices()
        .nth(LOG_BODY_LENGTH_LIMIT)
        .map(|(end, _)| &body[..end])
}

fn log_request(parts: &request::Parts, body: &str) {
    let method = &parts.method;
    let uri = &parts.uri;

    match truncate_body(body) {
        Some(truncated) => {
            tracing::info!("Received request: {method} {uri}\nbody: {truncated}...");
            tracing::debug!("Full request body: {body:?}");
        }
        None => tracing::info!("Received request: {method} {uri}\nbody: {body:?}"),
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    let status = parts.status;

    match truncate_body(body) {
        Some(truncated) => {
            tracing::info!("Sending response: {status}\nbody: {truncated}...");
            tracing::debug!("Full response body: {body:?}");
        }
        None => tracing::info!("Sending response: {status}\nbody: {body:?}"),
    }
}
