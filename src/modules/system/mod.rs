pub mod models;
pub mod scalars;

use async_graphql::Object;

#[derive(Default)]
pub struct SystemQuery;

#[Object]
impl SystemQuery {
    /// Liveness check; never reaches a backend function.
    async fn ping(&self) -> &'static str {
        "Pong"
    }
}
