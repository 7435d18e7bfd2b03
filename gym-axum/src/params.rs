//! Extraction of path and query-string parameters.
//!
//! Axum's own extractors reject malformed parameters with a plain-text body;
//! these wrappers report the same failures as [`ApiError`] instead.

use crate::error::ApiError;
use aide::{
    generate::GenContext,
    openapi::Operation,
    operation::OperationInput,
};
use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// Query-string parameters. A repeated key keeps its last value.
pub(crate) struct QueryParams<Q>(pub Q);

impl<Q: DeserializeOwned, S: Send + Sync> FromRequestParts<S> for QueryParams<Q> {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|err| ApiError::Unexpected(err.body_text()))?;
        parse_pairs(pairs).map(Self)
    }
}

fn parse_pairs<Q: DeserializeOwned>(pairs: Vec<(String, String)>) -> Result<Q, ApiError> {
    let params = pairs
        .into_iter()
        .map(|(key, value)| (key, serde_json::Value::String(value)))
        .collect::<serde_json::Map<_, _>>();
    serde_json::from_value(serde_json::Value::Object(params))
        .map_err(|err| ApiError::Unexpected(err.to_string()))
}

impl<Q: JsonSchema> OperationInput for QueryParams<Q> {
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        <Query<Q> as OperationInput>::operation_input(ctx, operation);
    }
}

/// Path parameters.
pub(crate) struct PathParams<P>(pub P);

impl<P: DeserializeOwned + Send, S: Send + Sync> FromRequestParts<S> for PathParams<P> {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<P>::from_request_parts(parts, state)
            .await
            .map_err(|err| ApiError::Unexpected(err.body_text()))?;
        Ok(Self(params))
    }
}

impl<P: JsonSchema> OperationInput for PathParams<P> {
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        <Path<P> as OperationInput>::operation_input(ctx, operation);
    }
}
