//! REST API endpoints for products.
//!
//! A single path, `/products`, serves every verb. Reads are filtered by query
//! parameters; writes identify the admin, gym, and product in the submitted
//! form (or, for deletes, in the query string) and are only carried out once
//! the ownership chain holds.

use crate::{ApiApplication, error::ErrorBody};
use aide::{
    axum::{ApiRouter, routing::get_with},
    transform::TransformOperation,
};
use axum::Json;
use schemars::JsonSchema;
use serde::Serialize;

mod crud;
use crud::*;

mod query;
use query::*;

/// A confirmation returned by successful writes.
#[derive(Serialize, JsonSchema)]
pub(crate) struct Message {
    /// What happened
    message: String,
}

impl Message {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// Creates a router with product-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route_with(
        "/",
        get_with(query_products::<T>, query_products_docs)
            .post_with(create_product::<T>, create_product_docs)
            .put_with(update_product::<T>, update_product_docs)
            .delete_with(delete_product::<T>, delete_product_docs),
        |route| route.tag("products"),
    )
}

fn query_products_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Query products")
        .description(
            r#"
            Every supplied identifier must exist, checked in the order gym,
            admin, product. Then the most specific filter wins: a `product_id`
            returns that single product; `admin` with `gym_id` returns the
            admin's products at a gym they administer; `gym_id` alone returns
            the gym's products; anything else returns every product.
            "#,
        )
        .response_with::<404, Json<ErrorBody>, _>(|res| {
            res.description("A supplied identifier does not resolve")
        })
}

fn create_product_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Add a product")
        .description(
            r#"
            Add a product to a gym on behalf of the admin administering it.
            `admin` and `gym_id` are required alongside the product fields.
            "#,
        )
        .response_with::<201, Json<Message>, _>(|res| res.description("Product added"))
        .response_with::<400, Json<ErrorBody>, _>(|res| {
            res.description("Missing identifiers or invalid fields")
        })
        .response_with::<404, Json<ErrorBody>, _>(|res| {
            res.description("The ownership chain does not hold")
        })
}

fn update_product_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Update a product")
        .description(
            r#"
            Partially update a product. `admin`, `gym_id`, and `product_id` are
            required; of the remaining fields, only those supplied change.
            "#,
        )
        .response_with::<400, Json<ErrorBody>, _>(|res| {
            res.description("Missing identifiers or invalid fields")
        })
        .response_with::<404, Json<ErrorBody>, _>(|res| {
            res.description("The ownership chain does not hold")
        })
}

fn delete_product_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("Remove a product")
        .response_with::<204, (), _>(|res| res.description("Product removed"))
        .response_with::<400, Json<ErrorBody>, _>(|res| {
            res.description("Missing identifiers")
        })
        .response_with::<404, Json<ErrorBody>, _>(|res| {
            res.description("The ownership chain does not hold")
        })
}
