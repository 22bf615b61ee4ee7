pub mod models;

use async_graphql::{Context, Object, Result, ID};
use serde_json::json;

use super::backend::Backend;
use super::system::models::Removal;
use models::{Contact, ContactInput, ContactUpdateInput, ContactsResponse};

const GET_CONTACTS: &str = "get-contacts";
const GET_CONTACT: &str = "get-contact";
const POST_CONTACT: &str = "post-contact";
const DELETE_CONTACT: &str = "delete-contact";

#[derive(Default)]
pub struct ContactQuery;

#[Object]
impl ContactQuery {
    async fn contacts(&self, ctx: &Context<'_>) -> Result<Vec<Contact>> {
        let response: ContactsResponse = Backend::of(ctx)?.call_empty(GET_CONTACTS).await?;
        Ok(response.contacts)
    }

    async fn contact(&self, ctx: &Context<'_>, id: ID) -> Result<Contact> {
        Backend::of(ctx)?.fetch_one("contact", GET_CONTACT, &id).await
    }
}

#[derive(Default)]
pub struct ContactMutation;

#[Object]
impl ContactMutation {
    async fn add_contact(&self, ctx: &Context<'_>, contact: ContactInput) -> Result<Contact> {
        Backend::of(ctx)?
            .create(POST_CONTACT, "contact", &contact)
            .await
    }

    async fn update_contact(
        &self,
        ctx: &Context<'_>,
        contact: ContactUpdateInput,
    ) -> Result<Contact> {
        Backend::of(ctx)?
            .call(POST_CONTACT, json!({ "contact": contact }))
            .await
    }

    async fn remove_contact(&self, ctx: &Context<'_>, id: ID) -> Result<Removal> {
        let removal: Option<Removal> = Backend::of(ctx)?
            .call(DELETE_CONTACT, json!({ "id": id }))
            .await?;
        Ok(removal.unwrap_or_default())
    }
}
