#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the gym crates.
//! [gym_core]: https://docs.rs/gym_core/latest/gym_core/index.html
//! [gym_sqlite]: https://docs.rs/gym_sqlite/latest/gym_sqlite/index.html
#![doc = include_str!("../README.md")]

mod credentials;
mod form;
mod ownership;
mod params;

mod gym_routes;
mod mentor_routes;
mod product_routes;
mod user_routes;

use aide::{
    axum::{ApiRouter, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json};
use gym_core::ports::{Application, Repository};
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use std::{fmt::Display, str::FromStr, sync::Arc};

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

pub mod error;
pub use error::ApiError;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Construct a full API router with the given state and config.
///
/// The generated OpenAPI document is returned alongside the router.
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> (axum::Router, Arc<OpenApi>) {
    let mut api = OpenApi::default();
    let router = ApiRouter::new()
        .api_route("/health", get(health_check))
        .nest("/products", product_routes::router())
        .nest("/users", user_routes::router())
        .nest("/gyms", gym_routes::router())
        .nest("/mentors", mentor_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs);

    // Arc is very important here or you will face massive memory and performance issues
    let api = Arc::new(api);
    let router = router
        .layer(Extension(api.clone()))
        .layer(config.cors_layer())
        .with_state(state);

    (router, api)
}

/// Starts the HTTP server with the provided configuration
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let (service, _) = router(app, config);
    axum::serve(listener, service).await
}

/// The requirements on identifiers exposed over HTTP: they are parsed from
/// query strings and form fields, and rendered into JSON and logs.
pub trait Identifier:
    Clone
    + Display
    + FromStr
    + Serialize
    + DeserializeOwned
    + JsonSchema
    + Send
    + Sync
    + 'static
{
}

impl<T> Identifier for T where
    T: Clone
        + Display
        + FromStr
        + Serialize
        + DeserializeOwned
        + JsonSchema
        + Send
        + Sync
        + 'static
{
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies it all upfront and
/// in one place. If a function takes a generic `T: ApiApplication`, then
/// everything one might reasonably want to do should work.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Repository: Clone
                        + Send
                        + Sync
                        + 'static
                        + Repository<
            DateTime: Clone + Display + Serialize + JsonSchema + Send + Sync,
            UserId: Identifier,
            GymId: Identifier,
            MentorId: Identifier,
            ProductId: Identifier,
        >,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Repository: Clone
                            + Send
                            + Sync
                            + 'static
                            + Repository<
                DateTime: Clone + Display + Serialize + JsonSchema + Send + Sync,
                UserId: Identifier,
                GymId: Identifier,
                MentorId: Identifier,
                ProductId: Identifier,
            >,
        >
{
}
