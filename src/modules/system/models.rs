use async_graphql::{SimpleObject, ID};
use serde::{Deserialize, Serialize};

/// Outcome of a delete, as echoed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct Removal {
    #[serde(default)]
    pub id: Option<ID>,
}
