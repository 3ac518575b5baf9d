//! Metrics middleware and the request correlation extractor.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header::HeaderName, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use cinedex_core::RequestContext;
use std::future::Future;
use std::time::Instant;

use crate::metrics::{
    normalize_path, HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION,
};

/// Inbound correlation header, forwarded to the ratings service.
pub const CLIENT_REF_ID: HeaderName = HeaderName::from_static("clientrefid");

/// Request id header set by the request-id layer.
pub const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Metrics middleware that tracks HTTP request duration and counts.
///
/// This middleware records:
/// - Request duration (histogram)
/// - Request count (counter)
/// - Requests in flight (gauge)
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());

    HTTP_REQUESTS_IN_FLIGHT.inc();

    let response = next.run(request).await;

    HTTP_REQUESTS_IN_FLIGHT.dec();

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUEST_DURATION
        .with_label_values(&[&method, &path, &status])
        .observe(duration);
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    response
}

/// Extractor for the request's correlation context.
///
/// Uses the caller's `clientRefId` header when present, otherwise the
/// request id. Never rejects.
#[derive(Debug, Clone)]
pub struct Correlation(pub RequestContext);

impl<S> FromRequestParts<S> for Correlation
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let header = |name: &HeaderName| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let client_ref_id = header(&CLIENT_REF_ID).or_else(|| header(&REQUEST_ID));
        std::future::ready(Ok(Correlation(RequestContext::new(client_ref_id))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn extract(request: Request<()>) -> RequestContext {
        let (mut parts, _) = request.into_parts();
        let Correlation(ctx) = Correlation::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        ctx
    }

    #[tokio::test]
    async fn test_prefers_client_ref_id() {
        let request = Request::builder()
            .header("clientRefId", "abc-1")
            .header("x-request-id", "req-9")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.client_ref_id(), Some("abc-1"));
    }

    #[tokio::test]
    async fn test_falls_back_to_request_id() {
        let request = Request::builder()
            .header("x-request-id", "req-9")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.client_ref_id(), Some("req-9"));
    }

    #[tokio::test]
    async fn test_blank_header_is_ignored() {
        let request = Request::builder()
            .header("clientRefId", "   ")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.client_ref_id(), None);
    }
}
