use async_graphql::{InputObject, SimpleObject, ID};
use serde::{Deserialize, Serialize};

/// Book record as stored by the library backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct Book {
    pub id: ID,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub isbn10: Option<String>,
    #[serde(default)]
    pub isbn13: Option<String>,
    /// Reference to the cover image.
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub book_set: Option<String>,
    /// Position of the book inside its book set.
    #[serde(default)]
    pub book_set_order: Option<i32>,
    #[serde(default)]
    pub library_id: Option<ID>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Page of books, shaped by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct BookPage {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub count: i32,
    #[serde(default)]
    pub total: i32,
}

#[derive(Debug, Clone, Serialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub title: String,
    pub library_id: ID,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn10: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn13: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[graphql(default)]
    pub authors: Vec<String>,
    #[graphql(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_set: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_set_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdateInput {
    pub id: ID,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_id: Option<ID>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn10: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn13: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_set: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_set_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Keyword search over the caller's books.
#[derive(Debug, Clone, Serialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    #[graphql(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BooksResponse {
    pub books: Vec<Book>,
}
