//! Router builder for the gateway HTTP surface

use async_graphql::{http::GraphiQLSource, ObjectType, Schema, SubscriptionType};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::Method,
    response::Html,
    routing::{post, MethodRouter},
    Router,
};
use shelf_kernel::settings::GraphqlSettings;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    request_id::SetRequestIdLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Instrument;

use crate::{inbound::Inbound, MakeRequestUuid};

/// Builder for constructing the main HTTP router
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount the GraphQL endpoint, plus GraphiQL on `GET` when enabled
    pub fn graphql<Q, M, S>(mut self, settings: &GraphqlSettings, schema: Schema<Q, M, S>) -> Self
    where
        Q: ObjectType + 'static,
        M: ObjectType + 'static,
        S: SubscriptionType + 'static,
    {
        let mut endpoint = post(graphql_handler::<Q, M, S>);

        if settings.playground {
            let page = GraphiQLSource::build().endpoint(&settings.path).finish();
            endpoint = endpoint.get(move || async move { Html(page) });
        }

        tracing::info!(path = %settings.path, playground = settings.playground, "mounting GraphQL endpoint");
        self.router = self.router.route(&settings.path, endpoint.with_state(schema));
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware: any origin, with credentials
    pub fn with_cors(mut self) -> Self {
        // A wildcard origin is not allowed together with credentials, so the
        // request origin is mirrored back instead.
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_credentials(true)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers(AllowHeaders::mirror_request()),
        );
        self
    }

    /// Add request ID middleware
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Execute one GraphQL request with the caller context of the inbound request
async fn graphql_handler<Q, M, S>(
    State(schema): State<Schema<Q, M, S>>,
    Inbound(context): Inbound,
    request: GraphQLRequest,
) -> GraphQLResponse
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
{
    let span = tracing::info_span!(
        "graphql",
        caller = ?context.caller_id,
        invocation_id = ?context.invocation_id,
    );

    schema
        .execute(request.into_inner().data(context))
        .instrument(span)
        .await
        .into()
}
