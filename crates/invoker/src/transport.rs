use async_trait::async_trait;

use crate::error::TransportError;

/// Moves one request body to a named function and returns its response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, target: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError>;
}
