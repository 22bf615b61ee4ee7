use async_graphql::{InputObject, SimpleObject, ID};
use serde::{Deserialize, Serialize};

/// A library as listed for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub id: ID,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Zero for freshly created libraries.
    #[serde(default)]
    pub books_count: i32,
}

/// A single library, with its books and book sets resolvable on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct LibraryDetail {
    pub id: ID,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub books_count: i32,
}

/// Named grouping of books inside a library (series, volumes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct BookSet {
    pub name: String,
    #[serde(default)]
    pub books_count: i32,
}

#[derive(Debug, Clone, Serialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct LibraryInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct LibraryUpdateInput {
    pub id: ID,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LibrariesResponse {
    pub libraries: Vec<Library>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookSetsResponse {
    pub book_sets: Vec<BookSet>,
}

