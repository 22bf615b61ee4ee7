pub mod models;

use async_graphql::{Context, Object, Result};
use serde::Serialize;

use super::backend::Backend;
use models::LendingPage;

const GET_LENDINGS: &str = "get-lendings";

#[derive(Debug, Serialize)]
struct LendingsPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<i32>,
}

#[derive(Default)]
pub struct LendingQuery;

#[Object]
impl LendingQuery {
    /// Books the caller has currently lent out, one page at a time.
    async fn lendings(&self, ctx: &Context<'_>, page: Option<i32>) -> Result<LendingPage> {
        Backend::of(ctx)?
            .call(GET_LENDINGS, LendingsPayload { page })
            .await
    }
}
