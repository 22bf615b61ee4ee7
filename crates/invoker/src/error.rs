use thiserror::Error;

/// Normalized failure of a backend invocation.
///
/// The display text is the original failure message; `target` names the
/// function that failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct InvokeError {
    pub target: String,
    pub message: String,
}

impl InvokeError {
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
        }
    }
}

/// Raw failure reported by a [`Transport`](crate::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(String),

    /// The function ran and raised; `message` is its own error text.
    #[error("{message}")]
    Function { kind: String, message: String },

    #[error("backend function returned no payload")]
    EmptyResponse,
}
