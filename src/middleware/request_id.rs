use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use uuid::Uuid;

/// Middleware that tags each request with an id, stamps it on the response
/// and logs completion classified by status code.
pub async fn track_request(mut req: Request<Body>, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();

    // Make the id available to handlers
    req.extensions_mut().insert(request_id.clone());

    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let mut response = next.run(req).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis();

    if status.is_server_error() {
        tracing::error!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration_ms,
            "Request completed with server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration_ms,
            "Request completed with client error"
        );
    } else {
        tracing::info!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration_ms,
            "Request completed successfully"
        );
    }

    response
        .headers_mut()
        .insert("X-Request-ID", request_id.parse().unwrap());

    response
}
