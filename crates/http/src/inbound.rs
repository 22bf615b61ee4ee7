//! Derives the per-request [`RequestContext`] from the inbound envelope.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use lambda_http::request::RequestContext as LambdaRequestContext;
use shelf_kernel::RequestContext;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extractor yielding the [`RequestContext`] of the current request.
#[derive(Debug, Clone)]
pub struct Inbound(pub RequestContext);

impl<S> FromRequestParts<S> for Inbound
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(request_context(parts)))
    }
}

/// Caller identity comes from the API Gateway authorizer claims placed in the
/// request extensions by the Lambda runtime; plain HTTP requests are anonymous.
pub fn request_context(parts: &Parts) -> RequestContext {
    let mut context = parts
        .extensions
        .get::<LambdaRequestContext>()
        .and_then(|envelope| serde_json::to_value(envelope).ok())
        .map(|envelope| RequestContext::from_envelope(&envelope))
        .unwrap_or_default();

    context.invocation_id = parts
        .extensions
        .get::<lambda_http::Context>()
        .map(|lambda| lambda.request_id.clone())
        .or_else(|| {
            parts
                .headers
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        });

    context
}
