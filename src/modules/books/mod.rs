pub mod models;

use async_graphql::{ComplexObject, Context, Object, Result, ID};
use serde_json::json;

use super::backend::Backend;
use super::libraries::models::LibraryDetail;
use super::system::models::Removal;
use models::{Book, BookInput, BookPage, BookUpdateInput, SearchQuery};

const GET_BOOK: &str = "get-book";
const SEARCH_BOOKS: &str = "search-books";
const POST_BOOK: &str = "post-book";
const DELETE_BOOK: &str = "delete-book";
const GET_LIBRARY: &str = "get-library";

#[derive(Default)]
pub struct BookQuery;

#[Object]
impl BookQuery {
    async fn book(&self, ctx: &Context<'_>, id: ID) -> Result<Book> {
        Backend::of(ctx)?.fetch_one("book", GET_BOOK, &id).await
    }

    /// Page through the caller's books matching every keyword.
    async fn search_books(&self, ctx: &Context<'_>, search_query: SearchQuery) -> Result<BookPage> {
        Backend::of(ctx)?.call(SEARCH_BOOKS, &search_query).await
    }
}

#[derive(Default)]
pub struct BookMutation;

#[Object]
impl BookMutation {
    async fn add_book(&self, ctx: &Context<'_>, book: BookInput) -> Result<Book> {
        Backend::of(ctx)?.create(POST_BOOK, "book", &book).await
    }

    async fn update_book(&self, ctx: &Context<'_>, book: BookUpdateInput) -> Result<Book> {
        Backend::of(ctx)?
            .call(POST_BOOK, json!({ "book": book }))
            .await
    }

    async fn remove_book(&self, ctx: &Context<'_>, id: ID) -> Result<Removal> {
        let removal: Option<Removal> = Backend::of(ctx)?
            .call(DELETE_BOOK, json!({ "id": id }))
            .await?;
        Ok(removal.unwrap_or_default())
    }
}

#[ComplexObject]
impl Book {
    /// Library owning this book, `null` for books without one.
    async fn library(&self, ctx: &Context<'_>) -> Result<Option<LibraryDetail>> {
        let Some(library_id) = &self.library_id else {
            return Ok(None);
        };

        Backend::of(ctx)?
            .fetch_one("library", GET_LIBRARY, library_id)
            .await
            .map(Some)
    }
}
