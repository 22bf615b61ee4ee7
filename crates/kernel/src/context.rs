//! Per-request context handed to every resolver.

use serde_json::Value;

/// Claim carrying the caller identity, injected by the upstream authorizer.
pub const CALLER_CLAIM: &str = "sub";

/// Locations of the authorizer claims in the different API Gateway envelopes:
/// REST API (Cognito), HTTP API (JWT) and Lambda authorizers.
const CLAIM_POINTERS: &[&str] = &[
    "/authorizer/claims",
    "/authorizer/jwt/claims",
    "/authorizer/lambda",
];

/// Identity and correlation data derived once from the inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Authenticated user, `None` for anonymous requests.
    pub caller_id: Option<String>,
    /// Lambda request id or `x-request-id`, used for log correlation.
    pub invocation_id: Option<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_caller(caller_id: impl Into<String>) -> Self {
        Self {
            caller_id: Some(caller_id.into()),
            invocation_id: None,
        }
    }

    /// Build the context from a serialized API Gateway request context.
    ///
    /// The claim is trusted as-is: signature verification happened upstream.
    pub fn from_envelope(envelope: &Value) -> Self {
        Self {
            caller_id: caller_from_envelope(envelope),
            invocation_id: None,
        }
    }
}

fn caller_from_envelope(envelope: &Value) -> Option<String> {
    CLAIM_POINTERS
        .iter()
        .filter_map(|pointer| envelope.pointer(pointer))
        .filter_map(|claims| claims.get(CALLER_CLAIM))
        .find_map(|claim| match claim {
            Value::String(sub) if !sub.is_empty() => Some(sub.clone()),
            _ => None,
        })
}
