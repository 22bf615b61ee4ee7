//! Synchronous dispatch of JSON calls to named backend functions.
//!
//! [`Invoker`] owns the calling convention (envelope, logging, error
//! normalization); a [`Transport`] only moves bytes to a function and back.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

pub mod error;
pub mod lambda;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod transport;

pub use error::{InvokeError, TransportError};
pub use lambda::LambdaTransport;
pub use transport::Transport;

/// Request body every backend function receives.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    user_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<&'a Value>,
}

/// Calls backend functions by name over a shared transport.
#[derive(Clone)]
pub struct Invoker {
    transport: Arc<dyn Transport>,
}

impl Invoker {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Invoker backed by AWS Lambda; the SDK client is created on first call.
    pub fn lambda(settings: &shelf_kernel::settings::InvokerSettings) -> Self {
        Self::new(Arc::new(LambdaTransport::new(settings)))
    }

    /// Invoke `target` once and parse its JSON result.
    ///
    /// Every failure, whatever its source, comes back as an [`InvokeError`]
    /// tagged with `target`.
    pub async fn invoke(
        &self,
        target: &str,
        caller_id: Option<&str>,
        payload: Option<Value>,
    ) -> Result<Value, InvokeError> {
        if target.is_empty() {
            return Err(fail(target, "backend function name must not be empty"));
        }

        let envelope = Envelope {
            user_id: caller_id,
            payload: payload.as_ref(),
        };
        let body = serde_json::to_vec(&envelope)
            .map_err(|err| fail(target, format!("failed to encode request: {err}")))?;

        tracing::debug!(
            function = target,
            payload = %String::from_utf8_lossy(&body),
            "invoking backend function"
        );

        let raw = self
            .transport
            .call(target, body)
            .await
            .map_err(|err| fail(target, err.to_string()))?;

        serde_json::from_slice(&raw)
            .map_err(|err| fail(target, format!("malformed response: {err}")))
    }
}

fn fail(target: &str, message: impl Into<String>) -> InvokeError {
    let err = InvokeError::new(target, message);
    tracing::error!(
        function = target,
        error = %err.message,
        "failed to invoke backend function"
    );
    err
}
