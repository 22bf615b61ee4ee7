//! AWS Lambda transport.

use async_trait::async_trait;
use aws_config::{meta::region::RegionProviderChain, BehaviorVersion};
use aws_sdk_lambda::{error::DisplayErrorContext, primitives::Blob, types::InvocationType, Client};
use aws_types::region::Region;
use serde::Deserialize;
use shelf_kernel::settings::InvokerSettings;
use tokio::sync::OnceCell;

use crate::{error::TransportError, transport::Transport};

/// Region used when neither settings nor the AWS provider chain name one.
pub const DEFAULT_REGION: &str = "eu-central-1";

/// Payload Lambda returns when the function raised.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FunctionErrorPayload {
    error_message: Option<String>,
}

/// Invokes functions with `RequestResponse` semantics through one shared client.
pub struct LambdaTransport {
    region: Option<String>,
    endpoint_url: Option<String>,
    client: OnceCell<Client>,
}

impl LambdaTransport {
    pub fn new(settings: &InvokerSettings) -> Self {
        Self {
            region: settings.region.clone(),
            endpoint_url: settings.endpoint_url.clone(),
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                let region = RegionProviderChain::first_try(self.region.clone().map(Region::new))
                    .or_default_provider()
                    .or_else(Region::from_static(DEFAULT_REGION));

                let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);
                if let Some(endpoint_url) = &self.endpoint_url {
                    loader = loader.endpoint_url(endpoint_url);
                }

                let config = loader.load().await;
                tracing::info!(
                    region = ?config.region(),
                    endpoint = ?self.endpoint_url,
                    "lambda client initialized"
                );
                Client::new(&config)
            })
            .await
    }
}

#[async_trait]
impl Transport for LambdaTransport {
    async fn call(&self, target: &str, body: Vec<u8>) -> Result<Vec<u8>, TransportError> {
        let output = self
            .client()
            .await
            .invoke()
            .function_name(target)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(body))
            .send()
            .await
            .map_err(|err| TransportError::Request(DisplayErrorContext(&err).to_string()))?;

        let payload = output.payload().map(|blob| blob.as_ref().to_vec());

        if let Some(kind) = output.function_error() {
            return Err(function_error(kind, payload.as_deref()));
        }

        payload.ok_or(TransportError::EmptyResponse)
    }
}

fn function_error(kind: &str, payload: Option<&[u8]>) -> TransportError {
    let message = payload
        .and_then(|bytes| serde_json::from_slice::<FunctionErrorPayload>(bytes).ok())
        .and_then(|payload| payload.error_message)
        .unwrap_or_else(|| format!("backend function failed ({kind})"));

    TransportError::Function {
        kind: kind.to_string(),
        message,
    }
}
