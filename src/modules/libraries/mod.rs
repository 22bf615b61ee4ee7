pub mod models;

use async_graphql::{ComplexObject, Context, Object, Result, ID};
use serde::Serialize;
use serde_json::json;

use super::backend::Backend;
use super::books::models::{Book, BooksResponse};
use super::system::models::Removal;
use models::{
    BookSet, BookSetsResponse, LibrariesResponse, Library, LibraryDetail, LibraryInput,
    LibraryUpdateInput,
};

const GET_LIBRARIES: &str = "get-libraries";
const GET_LIBRARY: &str = "get-library";
const POST_LIBRARY: &str = "post-library";
const DELETE_LIBRARY: &str = "delete-library";
const GET_BOOKS_FROM_LIBRARY: &str = "get-books-from-library";
const GET_BOOK_SETS_FROM_LIBRARY: &str = "get-book-sets-from-library";

#[derive(Default)]
pub struct LibraryQuery;

#[Object]
impl LibraryQuery {
    /// Libraries owned by the caller.
    async fn libraries(&self, ctx: &Context<'_>) -> Result<Vec<Library>> {
        let response: LibrariesResponse = Backend::of(ctx)?.call_empty(GET_LIBRARIES).await?;
        Ok(response.libraries)
    }

    async fn library(&self, ctx: &Context<'_>, id: ID) -> Result<LibraryDetail> {
        Backend::of(ctx)?.fetch_one("library", GET_LIBRARY, &id).await
    }
}

#[derive(Default)]
pub struct LibraryMutation;

#[Object]
impl LibraryMutation {
    /// Create a library. The result echoes the input with the assigned id.
    async fn add_library(&self, ctx: &Context<'_>, library: LibraryInput) -> Result<Library> {
        Backend::of(ctx)?
            .create(POST_LIBRARY, "library", &library)
            .await
    }

    async fn update_library(
        &self,
        ctx: &Context<'_>,
        library: LibraryUpdateInput,
    ) -> Result<Library> {
        Backend::of(ctx)?
            .call(POST_LIBRARY, json!({ "library": library }))
            .await
    }

    async fn remove_library(&self, ctx: &Context<'_>, id: ID) -> Result<Removal> {
        let removal: Option<Removal> = Backend::of(ctx)?
            .call(DELETE_LIBRARY, json!({ "id": id }))
            .await?;
        Ok(removal.unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LibraryBooksPayload<'a> {
    library_id: &'a ID,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<i32>,
}

#[ComplexObject]
impl LibraryDetail {
    /// One page of the books held in this library.
    async fn books(
        &self,
        ctx: &Context<'_>,
        page: Option<i32>,
        page_size: Option<i32>,
    ) -> Result<Vec<Book>> {
        let payload = LibraryBooksPayload {
            library_id: &self.id,
            page,
            page_size,
        };

        let response: BooksResponse = Backend::of(ctx)?
            .call(GET_BOOKS_FROM_LIBRARY, &payload)
            .await?;
        Ok(response.books)
    }

    async fn book_sets(&self, ctx: &Context<'_>) -> Result<Vec<BookSet>> {
        let response: BookSetsResponse = Backend::of(ctx)?
            .call(GET_BOOK_SETS_FROM_LIBRARY, json!({ "libraryId": &self.id }))
            .await?;
        Ok(response.book_sets)
    }
}
