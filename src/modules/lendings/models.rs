use async_graphql::{SimpleObject, ID};
use serde::{Deserialize, Serialize};

use crate::modules::system::scalars::Date;

/// A book lent to a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Lending {
    #[serde(default)]
    pub id: Option<ID>,
    #[serde(default)]
    pub book_id: Option<ID>,
    #[serde(default)]
    pub book_title: Option<String>,
    /// Contact the book was lent to.
    #[serde(default)]
    pub borrower_id: Option<ID>,
    #[serde(default)]
    pub borrower_nickname: Option<String>,
    #[serde(default)]
    pub library_id: Option<ID>,
    #[serde(default)]
    pub lent_at: Option<Date>,
    #[serde(default)]
    pub due_at: Option<Date>,
    #[serde(default)]
    pub returned_at: Option<Date>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct LendingPage {
    #[serde(default)]
    pub lendings: Vec<Lending>,
    #[serde(default)]
    pub count: i32,
    #[serde(default)]
    pub total: i32,
}
