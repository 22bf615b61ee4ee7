use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};

/// Image to resize, sent inline as base64.
#[derive(Debug, Clone, Serialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub width: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ResizedImage {
    pub data: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
}
