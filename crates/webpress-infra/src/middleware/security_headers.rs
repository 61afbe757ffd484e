use axum::extract::State;
use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};

/// Security headers middleware
///
/// Install with `from_fn_with_state(config.is_production(), ...)`; HSTS is
/// only sent in production where the service sits behind HTTPS.
pub async fn security_headers_middleware(
    State(is_production): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();

    // Served images must never be sniffed into something executable.
    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    if is_production {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}
