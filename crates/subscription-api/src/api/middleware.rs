//! Request middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{debug, warn};

/// Logs every request with its method, path, status, and latency.
///
/// Error statuses are logged at `warn` so a flood of failed
/// subscription calls stands out without raising the log level.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let status = response.status();

    if status.is_success() {
        debug!(%method, %uri, %status, ?elapsed, "Handled request");
    } else {
        warn!(%method, %uri, %status, ?elapsed, "Request finished with error status");
    }

    response
}
