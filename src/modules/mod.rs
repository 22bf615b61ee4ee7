//! GraphQL schema: one module per backend domain, merged into the roots.

mod backend;
pub mod books;
pub mod contacts;
pub mod images;
pub mod lendings;
pub mod libraries;
pub mod system;

use async_graphql::{EmptySubscription, MergedObject, Schema, SchemaBuilder};
use shelf_invoker::Invoker;

#[derive(MergedObject, Default)]
pub struct QueryRoot(
    system::SystemQuery,
    libraries::LibraryQuery,
    books::BookQuery,
    contacts::ContactQuery,
    lendings::LendingQuery,
);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    libraries::LibraryMutation,
    books::BookMutation,
    contacts::ContactMutation,
    images::ImageMutation,
);

pub type GatewaySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Schema builder with the invoker shared by every resolver.
pub fn schema_builder(invoker: Invoker) -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(invoker)
}

pub fn build_schema(invoker: Invoker) -> GatewaySchema {
    schema_builder(invoker).finish()
}
