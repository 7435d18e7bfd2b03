//! REST API endpoints for users.
//!
//! Admins are ordinary users registered with `is_staff`; every privileged
//! endpoint elsewhere resolves its `admin` parameter against these records.

use crate::{
    ApiApplication, credentials::hash_password, error::ApiError, form::FormFields,
    ownership::parse_id, params::PathParams,
};
use aide::axum::{
    ApiRouter,
    routing::{get, post},
};
use axum::{Json, extract::State, http::StatusCode};
use gym_core::{
    models::{FieldErrors, Registration, UserRecord},
    ports::{UserFailure, UserRepository as _},
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Path parameter for user-specific endpoints.
#[derive(Deserialize, JsonSchema)]
#[schemars(inline)]
struct Id {
    /// The unique identifier of the user
    user_id: String,
}

/// Creates a router with user-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with("/", post(register_user::<T>), |route| route.tag("users"))
        .api_route_with("/{user_id}", get(read_user::<T>), |route| {
            route.tag("users")
        })
}

/// Register a new user.
///
/// # Returns
///
/// - `201 Created`: the stored user, without its password
/// - `400 Bad Request`: invalid fields, including a username already in use
async fn register_user<T: ApiApplication>(
    State(app): State<T>,
    FormFields(form): FormFields,
) -> Result<(StatusCode, Json<UserRecord<T::Repository>>), ApiError> {
    let Registration { user, password } = Registration::from_form(&form)?;
    let password_hash = hash_password(password).await?;

    let user_id = app.generate_user_id(&user);
    let record = app
        .database()
        .create_user(user_id, user, password_hash, app.now())
        .await
        .map_err(ApiError::storage)?
        .map_err(|failure| {
            let field = match failure {
                UserFailure::UsernameTaken => "username",
            };
            let mut errors = FieldErrors::default();
            errors.push(field, failure.to_string());
            ApiError::Invalid(errors)
        })?;
    tracing::info!(user_id = %record.id, is_staff = record.data.is_staff, "user registered");

    Ok((StatusCode::CREATED, Json(record)))
}

/// Retrieve a user.
///
/// # Returns
///
/// - `200 OK`: the user
/// - `404 Not Found`: no such user
async fn read_user<T: ApiApplication>(
    State(app): State<T>,
    PathParams(Id { user_id }): PathParams<Id>,
) -> Result<Json<UserRecord<T::Repository>>, ApiError> {
    let user = app
        .database()
        .get_user(parse_id(&user_id)?)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound("User ID not found"))?;
    Ok(Json(user))
}
