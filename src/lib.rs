//! Shelf gateway
//!
//! GraphQL schema and resolvers forwarding every field to a backend function,
//! plus the bootstrap that serves them.

pub mod error;
pub mod modules;
pub mod utils;

use shelf_invoker::Invoker;
use shelf_kernel::settings::Settings;

pub use error::GatewayError;
pub use modules::{build_schema, schema_builder, GatewaySchema};

/// Build the production schema from settings: Lambda-backed invoker plus the
/// GraphQL options.
pub fn gateway_schema(settings: &Settings) -> GatewaySchema {
    let mut builder = schema_builder(Invoker::lambda(&settings.invoker));
    if !settings.graphql.introspection {
        builder = builder.disable_introspection();
    }
    builder.finish()
}

/// Serve the gateway until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        region = ?settings.invoker.region,
        "shelf-gateway bootstrap starting"
    );

    let schema = gateway_schema(&settings);
    let router = shelf_http::build_router(schema, &settings);

    tracing::info!("shelf-gateway bootstrap complete");
    shelf_http::start_server(router, &settings).await
}
