//! In-memory transport for tests: canned replies per function, recorded calls.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::{error::TransportError, transport::Transport};

/// One call seen by [`MockTransport`], with the envelope decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub target: String,
    pub envelope: Value,
}

impl RecordedCall {
    pub fn payload(&self) -> Option<&Value> {
        self.envelope.get("payload")
    }

    pub fn user_id(&self) -> Option<&str> {
        self.envelope.get("userId").and_then(Value::as_str)
    }
}

enum Reply {
    Body(Vec<u8>),
    Failure(String),
}

#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `target` with `value`.
    pub fn respond(&self, target: &str, value: Value) -> &Self {
        self.respond_raw(target, value.to_string().into_bytes())
    }

    pub fn respond_raw(&self, target: &str, body: Vec<u8>) -> &Self {
        self.replies
            .lock()
            .expect("mock replies poisoned")
            .insert(target.to_string(), Reply::Body(body));
        self
    }

    /// Fail every call to `target` with `message`.
    pub fn fail(&self, target: &str, message: &str) -> &Self {
        self.replies
            .lock()
            .expect("mock replies poisoned")
            .insert(target.to_string(), Reply::Failure(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock calls poisoned").clone()
    }

    pub fn calls_to(&self, target: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.target == target)
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(&self, target: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let envelope = serde_json::from_slice(&body).unwrap_or(Value::Null);
        self.calls
            .lock()
            .expect("mock calls poisoned")
            .push(RecordedCall {
                target: target.to_string(),
                envelope,
            });

        match self.replies.lock().expect("mock replies poisoned").get(target) {
            Some(Reply::Body(body)) => Ok(body.clone()),
            Some(Reply::Failure(message)) => Err(TransportError::Request(message.clone())),
            None => Err(TransportError::Request(format!(
                "no reply configured for '{target}'"
            ))),
        }
    }
}
