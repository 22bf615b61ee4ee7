//! HTTP entry adapter: serves the GraphQL schema over plain HTTP or through
//! the AWS Lambda runtime behind API Gateway.

use anyhow::{anyhow, Context};
use async_graphql::{ObjectType, Schema, SubscriptionType};
use axum::{extract::Request, http::HeaderValue, routing::get, Router};
use shelf_kernel::settings::Settings;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::{Timestamp, Uuid};

pub mod inbound;
pub mod router;

use router::RouterBuilder;

/// Serve `router` on the Lambda runtime when present, otherwise on TCP
pub async fn start_server(router: Router, settings: &Settings) -> anyhow::Result<()> {
    if shelf_kernel::running_on_lambda() {
        return lambda_bind(router, &settings.graphql.path).await;
    }

    let address = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!("starting HTTP server on {}", address);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to address {address}"))?;

    tracing::info!(
        "GraphQL endpoint exposed at http://{}{}",
        address,
        settings.graphql.path
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the gateway router: GraphQL endpoint, health check and middlewares
pub fn build_router<Q, M, S>(schema: Schema<Q, M, S>, settings: &Settings) -> Router
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
{
    RouterBuilder::new()
        .route("/healthz", get(health_check))
        .graphql(&settings.graphql, schema)
        .with_tracing()
        .with_cors()
        .with_request_id()
        .build()
}

async fn lambda_bind(router: Router, path: &str) -> anyhow::Result<()> {
    tracing::info!("GraphQL endpoint exposed at {path} on the Lambda runtime");
    lambda_http::run(router)
        .await
        .map_err(|err| anyhow!("lambda runtime failed: {err}"))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "ok"
}

/// Request ID generator for tracing
#[derive(Clone)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let timestamp = Timestamp::now(uuid::NoContext);
        let request_id = Uuid::new_v7(timestamp)
            .to_string()
            .parse::<HeaderValue>()
            .ok()?;
        Some(RequestId::new(request_id))
    }
}
