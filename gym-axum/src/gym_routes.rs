//! REST API endpoints for gyms.

use crate::{
    ApiApplication,
    error::ApiError,
    form::FormFields,
    ownership::{GYM_NOT_FOUND, administered_gym, optional_id, parse_id, require_admin},
    params::{PathParams, QueryParams},
};
use aide::axum::{ApiRouter, routing::get};
use axum::{Json, extract::State, http::StatusCode};
use gym_core::{
    models::{GymData, GymRecord},
    ports::GymRepository as _,
};
use schemars::JsonSchema;
use serde::Deserialize;

const ADMIN_REQUIRED: &str = "Admin ID is required";

/// Path parameter for gym-specific endpoints.
#[derive(Deserialize, JsonSchema)]
#[schemars(inline)]
struct Id {
    /// The unique identifier of the gym
    gym_id: String,
}

/// The admin a request acts for or filters by.
#[derive(Deserialize, JsonSchema)]
struct AdminQuery {
    /// The unique identifier of a staff user
    admin: Option<String>,
}

/// Creates a router with gym-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get(list_gyms::<T>).post(create_gym::<T>),
            |route| route.tag("gyms"),
        )
        .api_route_with(
            "/{gym_id}",
            get(read_gym::<T>).delete(delete_gym::<T>),
            |route| route.tag("gyms"),
        )
}

/// List gyms, optionally only those administered by `admin`.
async fn list_gyms<T: ApiApplication>(
    State(app): State<T>,
    QueryParams(AdminQuery { admin }): QueryParams<AdminQuery>,
) -> Result<Json<Vec<GymRecord<T::Repository>>>, ApiError> {
    let db = app.database();
    let admin_id: Option<<T::Repository as gym_core::ports::Repository>::UserId> =
        optional_id(admin.as_deref())?;
    if let Some(admin_id) = &admin_id {
        require_admin(db, admin_id.clone()).await?;
    }
    let gyms = db.list_gyms(admin_id).await.map_err(ApiError::storage)?;
    Ok(Json(gyms))
}

/// Register a gym administered by the submitting admin.
///
/// # Returns
///
/// - `201 Created`: the stored gym
/// - `400 Bad Request`: `admin` missing or invalid fields
/// - `404 Not Found`: unknown or non-staff admin
async fn create_gym<T: ApiApplication>(
    State(app): State<T>,
    FormFields(form): FormFields,
) -> Result<(StatusCode, Json<GymRecord<T::Repository>>), ApiError> {
    let db = app.database();
    let admin = form
        .non_empty("admin")
        .ok_or(ApiError::MissingParameter(ADMIN_REQUIRED))?;
    let admin = require_admin(db, parse_id(admin)?).await?;

    let data = GymData::from_form(&form)?;
    let gym_id = app.generate_gym_id(&data);
    let gym = db
        .create_gym(gym_id, Some(admin.id), data)
        .await
        .map_err(ApiError::storage)?;
    tracing::info!(gym_id = %gym.id, "gym registered");

    Ok((StatusCode::CREATED, Json(gym)))
}

/// Retrieve a gym.
async fn read_gym<T: ApiApplication>(
    State(app): State<T>,
    PathParams(Id { gym_id }): PathParams<Id>,
) -> Result<Json<GymRecord<T::Repository>>, ApiError> {
    let gym = app
        .database()
        .get_gym(parse_id(&gym_id)?)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound(GYM_NOT_FOUND))?;
    Ok(Json(gym))
}

/// Remove a gym together with its mentors and products.
///
/// Only the administering admin may do so.
async fn delete_gym<T: ApiApplication>(
    State(app): State<T>,
    PathParams(Id { gym_id }): PathParams<Id>,
    QueryParams(AdminQuery { admin }): QueryParams<AdminQuery>,
) -> Result<StatusCode, ApiError> {
    let db = app.database();
    let gym_id = parse_id(&gym_id)?;
    let admin_id =
        optional_id(admin.as_deref())?.ok_or(ApiError::MissingParameter(ADMIN_REQUIRED))?;

    let gym = administered_gym(db, admin_id, gym_id).await?;
    if !db.delete_gym(gym.id.clone()).await.map_err(ApiError::storage)? {
        return Err(ApiError::NotFound(GYM_NOT_FOUND));
    }
    tracing::info!(gym_id = %gym.id, "gym removed");

    Ok(StatusCode::NO_CONTENT)
}
