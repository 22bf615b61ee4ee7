use std::sync::Arc;

use async_graphql::Request;
use serde_json::{json, Value};
use shelf_gateway::{build_schema, GatewaySchema};
use shelf_invoker::{testing::MockTransport, Invoker};
use shelf_kernel::RequestContext;

fn schema(mock: &Arc<MockTransport>) -> GatewaySchema {
    build_schema(Invoker::new(mock.clone()))
}

async fn execute_as(schema: &GatewaySchema, caller: &str, query: &str) -> Value {
    let request = Request::new(query).data(RequestContext::for_caller(caller));
    serde_json::to_value(schema.execute(request).await).unwrap()
}

#[tokio::test]
async fn library_with_books_calls_each_function_once() {
    let mock = Arc::new(MockTransport::new());
    mock.respond(
        "get-library",
        json!({ "id": "L1", "name": "Home", "description": "Living room", "booksCount": 1 }),
    )
    .respond(
        "get-books-from-library",
        json!({ "books": [{ "id": "B1", "title": "Dune", "libraryId": "L1" }] }),
    );

    let response = execute_as(
        &schema(&mock),
        "u1",
        r#"{ library(id: "L1") { id name books(page: 1) { id title } } }"#,
    )
    .await;

    assert!(response.get("errors").is_none(), "{response}");
    assert_eq!(
        response["data"],
        json!({
            "library": {
                "id": "L1",
                "name": "Home",
                "books": [{ "id": "B1", "title": "Dune" }]
            }
        })
    );

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        mock.calls_to("get-library")[0].envelope,
        json!({ "userId": "u1", "payload": { "id": "L1" } })
    );
    assert_eq!(
        mock.calls_to("get-books-from-library")[0].envelope,
        json!({ "userId": "u1", "payload": { "libraryId": "L1", "page": 1 } })
    );
}

#[tokio::test]
async fn add_library_merges_input_with_assigned_id() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("post-library", json!({ "id": "42" }));

    let response = execute_as(
        &schema(&mock),
        "u1",
        r#"mutation { addLibrary(library: { name: "N", description: "D" }) { id name description booksCount } }"#,
    )
    .await;

    assert_eq!(
        response["data"]["addLibrary"],
        json!({ "id": "42", "name": "N", "description": "D", "booksCount": 0 })
    );
    assert_eq!(
        mock.calls_to("post-library")[0].payload(),
        Some(&json!({ "library": { "name": "N", "description": "D" } }))
    );
}

#[tokio::test]
async fn add_book_and_contact_echo_their_input() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("post-book", json!({ "id": "B9" }))
        .respond("post-contact", json!({ "id": "C3" }));
    let schema = schema(&mock);

    let book = execute_as(
        &schema,
        "u1",
        r#"mutation { addBook(book: { title: "Dune", libraryId: "L1", authors: ["Herbert"] }) { id title authors tags libraryId } }"#,
    )
    .await;
    assert_eq!(
        book["data"]["addBook"],
        json!({ "id": "B9", "title": "Dune", "authors": ["Herbert"], "tags": [], "libraryId": "L1" })
    );

    let contact = execute_as(
        &schema,
        "u1",
        r#"mutation { addContact(contact: { nickname: "Sam", email: "sam@example.com" }) { id nickname email phone } }"#,
    )
    .await;
    assert_eq!(
        contact["data"]["addContact"],
        json!({ "id": "C3", "nickname": "Sam", "email": "sam@example.com", "phone": null })
    );
    assert_eq!(
        mock.calls_to("post-contact")[0].payload(),
        Some(&json!({ "contact": { "nickname": "Sam", "email": "sam@example.com" } }))
    );
}

#[tokio::test]
async fn empty_lookup_is_reported_as_not_found() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("get-book", json!({}));

    let response = execute_as(&schema(&mock), "u1", r#"{ book(id: "B404") { id } }"#).await;

    let error = &response["errors"][0];
    assert_eq!(error["message"], "book 'B404' not found for caller u1");
    assert_eq!(error["extensions"]["code"], "NOT_FOUND");
    assert_eq!(error["path"], json!(["book"]));
}

#[tokio::test]
async fn failed_call_only_fails_its_own_field() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("get-book", json!({ "id": "B1", "title": "Dune", "libraryId": "L1" }))
        .fail("get-library", "function timed out");

    let response = execute_as(
        &schema(&mock),
        "u1",
        r#"{ ping book(id: "B1") { title library { name } } }"#,
    )
    .await;

    assert_eq!(response["data"]["ping"], "Pong");
    assert_eq!(response["data"]["book"]["title"], "Dune");
    assert_eq!(response["data"]["book"]["library"], Value::Null);

    let error = &response["errors"][0];
    assert_eq!(error["message"], "function timed out");
    assert_eq!(error["extensions"]["code"], "REMOTE_CALL_FAILED");
    assert_eq!(error["extensions"]["target"], "get-library");
    assert_eq!(error["path"], json!(["book", "library"]));
}

#[tokio::test]
async fn book_library_is_looked_up_by_library_id() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("get-book", json!({ "id": "B1", "title": "Dune", "libraryId": "L7" }))
        .respond("get-library", json!({ "id": "L7", "name": "Office" }));

    let response = execute_as(
        &schema(&mock),
        "u1",
        r#"{ book(id: "B1") { library { id name } } }"#,
    )
    .await;

    assert_eq!(
        response["data"]["book"]["library"],
        json!({ "id": "L7", "name": "Office" })
    );
    assert_eq!(
        mock.calls_to("get-library")[0].payload(),
        Some(&json!({ "id": "L7" }))
    );
}

#[tokio::test]
async fn book_without_library_skips_the_lookup() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("get-book", json!({ "id": "B1", "title": "Loose" }));

    let response = execute_as(
        &schema(&mock),
        "u1",
        r#"{ book(id: "B1") { library { id } } }"#,
    )
    .await;

    assert_eq!(response["data"]["book"]["library"], Value::Null);
    assert!(mock.calls_to("get-library").is_empty());
}

#[tokio::test]
async fn resize_image_never_forwards_the_caller() {
    let mock = Arc::new(MockTransport::new());
    mock.respond(
        "resize-image",
        json!({ "data": "cmVzaXplZA==", "mimeType": "image/png", "width": 64 }),
    );

    let response = execute_as(
        &schema(&mock),
        "u1",
        r#"mutation { resizeImage(image: { data: "aW1n", width: 64 }) { data width } }"#,
    )
    .await;

    assert_eq!(
        response["data"]["resizeImage"],
        json!({ "data": "cmVzaXplZA==", "width": 64 })
    );
    assert_eq!(
        mock.calls_to("resize-image")[0].envelope,
        json!({ "userId": null, "payload": { "data": "aW1n", "width": 64 } })
    );
}

#[tokio::test]
async fn list_queries_send_no_payload() {
    let mock = Arc::new(MockTransport::new());
    mock.respond(
        "get-libraries",
        json!({ "libraries": [{ "id": "L1", "name": "Home", "booksCount": 3 }] }),
    )
    .respond("get-contacts", json!({ "contacts": [] }));

    let response = execute_as(
        &schema(&mock),
        "u1",
        "{ libraries { id booksCount } contacts { id } }",
    )
    .await;

    assert_eq!(
        response["data"],
        json!({ "libraries": [{ "id": "L1", "booksCount": 3 }], "contacts": [] })
    );
    assert_eq!(mock.calls_to("get-libraries")[0].envelope, json!({ "userId": "u1" }));
    assert_eq!(mock.calls_to("get-contacts")[0].envelope, json!({ "userId": "u1" }));
}

#[tokio::test]
async fn search_forwards_the_query_and_passes_the_page_through() {
    let mock = Arc::new(MockTransport::new());
    mock.respond(
        "search-books",
        json!({ "books": [{ "id": "B1", "title": "Dune" }], "count": 1, "total": 12 }),
    );

    let response = execute_as(
        &schema(&mock),
        "u1",
        r#"{ searchBooks(searchQuery: { keywords: ["dune"], page: 2, pageSize: 10 }) { count total books { title } } }"#,
    )
    .await;

    assert_eq!(
        response["data"]["searchBooks"],
        json!({ "count": 1, "total": 12, "books": [{ "title": "Dune" }] })
    );
    assert_eq!(
        mock.calls_to("search-books")[0].payload(),
        Some(&json!({ "keywords": ["dune"], "page": 2, "pageSize": 10 }))
    );
}

#[tokio::test]
async fn lendings_render_dates_as_rfc3339() {
    let mock = Arc::new(MockTransport::new());
    mock.respond(
        "get-lendings",
        json!({
            "lendings": [{
                "id": "LE1",
                "bookTitle": "Dune",
                "borrowerNickname": "Sam",
                "lentAt": 1709287200000u64,
                "dueAt": "2024-03-15T10:00:00Z"
            }],
            "count": 1,
            "total": 1
        }),
    );

    let response = execute_as(
        &schema(&mock),
        "u1",
        "{ lendings { total lendings { bookTitle lentAt dueAt returnedAt } } }",
    )
    .await;

    assert_eq!(
        response["data"]["lendings"],
        json!({
            "total": 1,
            "lendings": [{
                "bookTitle": "Dune",
                "lentAt": "2024-03-01T10:00:00Z",
                "dueAt": "2024-03-15T10:00:00Z",
                "returnedAt": null
            }]
        })
    );
    assert_eq!(mock.calls_to("get-lendings")[0].payload(), Some(&json!({})));
}

#[tokio::test]
async fn remove_tolerates_an_empty_answer() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("delete-library", Value::Null);

    let response = execute_as(
        &schema(&mock),
        "u1",
        r#"mutation { removeLibrary(id: "L1") { id } }"#,
    )
    .await;

    assert!(response.get("errors").is_none(), "{response}");
    assert_eq!(response["data"]["removeLibrary"]["id"], Value::Null);
    assert_eq!(
        mock.calls_to("delete-library")[0].payload(),
        Some(&json!({ "id": "L1" }))
    );
}

#[tokio::test]
async fn request_without_caller_sends_null_user() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("get-contacts", json!({ "contacts": [] }));

    let response = schema(&mock).execute("{ contacts { id } }").await;

    assert!(response.errors.is_empty());
    assert_eq!(mock.calls()[0].user_id(), None);
    assert_eq!(mock.calls()[0].envelope["userId"], Value::Null);
}

#[tokio::test]
async fn add_library_accepts_a_numeric_id() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("post-library", json!({ "id": 42 }));

    let response = execute_as(
        &schema(&mock),
        "u1",
        r#"mutation { addLibrary(library: { name: "N" }) { id name } }"#,
    )
    .await;

    assert!(response.get("errors").is_none(), "{response}");
    assert_eq!(response["data"]["addLibrary"], json!({ "id": "42", "name": "N" }));
}

#[tokio::test]
async fn book_sets_are_read_for_the_parent_library() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("get-library", json!({ "id": "L1", "name": "Home" }))
        .respond(
            "get-book-sets-from-library",
            json!({ "bookSets": [{ "name": "Dune", "booksCount": 6 }] }),
        );

    let response = execute_as(
        &schema(&mock),
        "u1",
        r#"{ library(id: "L1") { bookSets { name booksCount } } }"#,
    )
    .await;

    assert_eq!(
        response["data"]["library"]["bookSets"],
        json!([{ "name": "Dune", "booksCount": 6 }])
    );
    let calls = mock.calls_to("get-book-sets-from-library");
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].envelope,
        json!({ "userId": "u1", "payload": { "libraryId": "L1" } })
    );
}

#[tokio::test]
async fn updates_forward_the_input_under_its_key() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("post-library", json!({ "id": "L1", "name": "Renamed", "booksCount": 4 }))
        .respond("post-book", json!({ "id": "B1", "title": "Dune Messiah" }))
        .respond("post-contact", json!({ "id": "C1", "nickname": "Sammy" }));
    let schema = schema(&mock);

    let library = execute_as(
        &schema,
        "u1",
        r#"mutation { updateLibrary(library: { id: "L1", name: "Renamed" }) { id name booksCount } }"#,
    )
    .await;
    assert_eq!(
        library["data"]["updateLibrary"],
        json!({ "id": "L1", "name": "Renamed", "booksCount": 4 })
    );
    assert_eq!(
        mock.calls_to("post-library")[0].payload(),
        Some(&json!({ "library": { "id": "L1", "name": "Renamed" } }))
    );

    let book = execute_as(
        &schema,
        "u1",
        r#"mutation { updateBook(book: { id: "B1", title: "Dune Messiah", tags: ["sf"] }) { id title } }"#,
    )
    .await;
    assert_eq!(
        book["data"]["updateBook"],
        json!({ "id": "B1", "title": "Dune Messiah" })
    );
    assert_eq!(
        mock.calls_to("post-book")[0].payload(),
        Some(&json!({ "book": { "id": "B1", "title": "Dune Messiah", "tags": ["sf"] } }))
    );

    let contact = execute_as(
        &schema,
        "u1",
        r#"mutation { updateContact(contact: { id: "C1", nickname: "Sammy" }) { id nickname } }"#,
    )
    .await;
    assert_eq!(
        contact["data"]["updateContact"],
        json!({ "id": "C1", "nickname": "Sammy" })
    );
    assert_eq!(
        mock.calls_to("post-contact")[0].envelope,
        json!({ "userId": "u1", "payload": { "contact": { "id": "C1", "nickname": "Sammy" } } })
    );
}

#[tokio::test]
async fn removals_send_the_id_and_echo_the_answer() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("delete-book", json!({ "id": "B1" }))
        .respond("delete-contact", json!({ "id": "C1" }));

    let response = execute_as(
        &schema(&mock),
        "u1",
        r#"mutation { removeBook(id: "B1") { id } removeContact(id: "C1") { id } }"#,
    )
    .await;

    assert_eq!(
        response["data"],
        json!({ "removeBook": { "id": "B1" }, "removeContact": { "id": "C1" } })
    );
    assert_eq!(
        mock.calls_to("delete-book")[0].payload(),
        Some(&json!({ "id": "B1" }))
    );
    assert_eq!(
        mock.calls_to("delete-contact")[0].payload(),
        Some(&json!({ "id": "C1" }))
    );
}

#[tokio::test]
async fn contact_is_returned_as_stored() {
    let mock = Arc::new(MockTransport::new());
    mock.respond(
        "get-contact",
        json!({ "id": "C1", "nickname": "Sam", "firstName": "Samwise", "notes": "returns late" }),
    );

    let response = execute_as(
        &schema(&mock),
        "u1",
        r#"{ contact(id: "C1") { id nickname firstName lastName notes } }"#,
    )
    .await;

    assert_eq!(
        response["data"]["contact"],
        json!({
            "id": "C1",
            "nickname": "Sam",
            "firstName": "Samwise",
            "lastName": null,
            "notes": "returns late"
        })
    );
    assert_eq!(
        mock.calls_to("get-contact")[0].envelope,
        json!({ "userId": "u1", "payload": { "id": "C1" } })
    );
}

#[tokio::test]
async fn missing_contact_and_library_are_not_found() {
    let mock = Arc::new(MockTransport::new());
    mock.respond("get-contact", json!({}))
        .respond("get-library", Value::Null);
    let schema = schema(&mock);

    let contact = execute_as(&schema, "u2", r#"{ contact(id: "C9") { id } }"#).await;
    assert_eq!(
        contact["errors"][0]["message"],
        "contact 'C9' not found for caller u2"
    );
    assert_eq!(contact["errors"][0]["extensions"]["code"], "NOT_FOUND");

    let library = execute_as(&schema, "u2", r#"{ library(id: "L9") { id } }"#).await;
    assert_eq!(
        library["errors"][0]["message"],
        "library 'L9' not found for caller u2"
    );
    assert_eq!(library["errors"][0]["extensions"]["code"], "NOT_FOUND");
    assert_eq!(library["errors"][0]["extensions"]["id"], "L9");
}

#[test]
fn sdl_exposes_every_operation() {
    let sdl = schema(&Arc::new(MockTransport::new())).sdl();

    for field in [
        "ping: String!",
        "libraries: [Library!]!",
        "library(id: ID!): LibraryDetail!",
        "book(id: ID!): Book!",
        "searchBooks(searchQuery: SearchQuery!): BookPage!",
        "contacts: [Contact!]!",
        "contact(id: ID!): Contact!",
        "lendings(page: Int): LendingPage!",
        "addLibrary(library: LibraryInput!): Library!",
        "updateLibrary(library: LibraryUpdateInput!): Library!",
        "removeLibrary(id: ID!): Removal!",
        "addBook(book: BookInput!): Book!",
        "updateBook(book: BookUpdateInput!): Book!",
        "removeBook(id: ID!): Removal!",
        "addContact(contact: ContactInput!): Contact!",
        "updateContact(contact: ContactUpdateInput!): Contact!",
        "removeContact(id: ID!): Removal!",
        "resizeImage(image: ImageInput!): ResizedImage!",
        "scalar Date",
    ] {
        assert!(sdl.contains(field), "schema is missing `{field}`:\n{sdl}");
    }
}
