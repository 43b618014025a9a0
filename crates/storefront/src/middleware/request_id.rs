//! Request correlation.
//!
//! Every request gets an `x-request-id`: the upstream proxy's value when
//! one arrives, a fresh UUID v4 otherwise. The id is recorded on the
//! tracing span, tagged on the Sentry scope, and echoed on the response so
//! a user-reported failure can be matched to its logs.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the request id, inbound and outbound.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn incoming_id(request: &Request) -> Option<String> {
    let value = request.headers().get(REQUEST_ID_HEADER)?;
    value.to_str().ok().map(str::to_owned)
}

/// Attach a correlation id to the request's span, Sentry scope, and
/// response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = incoming_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
