//! Errors surfaced to GraphQL clients as field-level errors.

use async_graphql::ErrorExtensions;
use shelf_invoker::InvokeError;
use thiserror::Error;

const ANONYMOUS: &str = "anonymous";

/// Resolver failures. Each variant is raised explicitly where it happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend call failed; `message` is the original failure text.
    #[error("{message}")]
    RemoteCallFailed { target: String, message: String },

    #[error("{kind} '{id}' not found for caller {caller}")]
    NotFound {
        kind: &'static str,
        id: String,
        caller: String,
    },
}

impl GatewayError {
    pub fn remote_call_failed(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteCallFailed {
            target: target.into(),
            message: message.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>, caller: Option<&str>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
            caller: caller.unwrap_or(ANONYMOUS).to_string(),
        }
    }

    /// Machine-readable code placed in the error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RemoteCallFailed { .. } => "REMOTE_CALL_FAILED",
            Self::NotFound { .. } => "NOT_FOUND",
        }
    }
}

impl From<InvokeError> for GatewayError {
    fn from(err: InvokeError) -> Self {
        Self::RemoteCallFailed {
            target: err.target,
            message: err.message,
        }
    }
}

impl ErrorExtensions for GatewayError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, extensions| {
            extensions.set("code", self.code());
            match self {
                Self::RemoteCallFailed { target, .. } => {
                    extensions.set("target", target.as_str());
                }
                Self::NotFound { kind, id, .. } => {
                    extensions.set("kind", *kind);
                    extensions.set("id", id.as_str());
                }
            }
        })
    }
}
