//! Extraction of submitted form fields.
//!
//! Product, user, gym, and mentor submissions arrive as url-encoded forms,
//! multipart forms, or JSON objects. [`FormFields`] reduces all three to a
//! [`FormData`] so that validation only has one shape to deal with.

use crate::error::ApiError;
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use gym_core::models::FormData;

/// The flattened fields of a request body.
///
/// For multipart file uploads only the file name is kept; the contents are
/// read and discarded.
pub(crate) struct FormFields(pub FormData);

impl<S: Send + Sync> FromRequest<S> for FormFields {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|err| ApiError::Unexpected(err.body_text()))?;
            read_multipart(multipart).await.map(Self)
        } else if content_type.starts_with("application/json") {
            let Json(object) = Json::<serde_json::Map<String, serde_json::Value>>::from_request(
                req, state,
            )
            .await
            .map_err(|err| ApiError::Unexpected(err.body_text()))?;
            Ok(Self(object.into_iter().map(json_field).collect()))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let axum::Form(pairs) = axum::Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|err| ApiError::Unexpected(err.body_text()))?;
            Ok(Self(pairs.into_iter().collect()))
        } else {
            // A body-less request simply has no fields
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|err| ApiError::Unexpected(err.body_text()))?;
            if body.is_empty() {
                Ok(Self(FormData::default()))
            } else {
                Err(ApiError::Unexpected(format!(
                    "Unsupported media type \"{content_type}\" in request."
                )))
            }
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<FormData, ApiError> {
    let mut form = FormData::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::Unexpected(err.body_text()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match field.file_name().map(str::to_owned) {
            Some(file_name) => {
                field
                    .bytes()
                    .await
                    .map_err(|err| ApiError::Unexpected(err.body_text()))?;
                form.insert(name, file_name);
            }
            None => {
                let value = field
                    .text()
                    .await
                    .map_err(|err| ApiError::Unexpected(err.body_text()))?;
                form.insert(name, value);
            }
        }
    }
    Ok(form)
}

// JSON scalars become their textual form; null reads as a blank field.
fn json_field((key, value): (String, serde_json::Value)) -> (String, String) {
    let value = match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    };
    (key, value)
}

impl aide::operation::OperationInput for FormFields {}
