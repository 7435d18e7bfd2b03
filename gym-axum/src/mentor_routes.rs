//! REST API endpoints for mentors.

use crate::{
    ApiApplication,
    credentials::hash_password,
    error::ApiError,
    form::FormFields,
    ownership::{optional_id, parse_id, require_gym},
    params::{PathParams, QueryParams},
};
use aide::axum::{ApiRouter, routing::get};
use axum::{Json, extract::State, http::StatusCode};
use gym_core::{
    models::{MentorRecord, MentorRegistration},
    ports::MentorRepository as _,
};
use schemars::JsonSchema;
use serde::Deserialize;

const MENTOR_NOT_FOUND: &str = "Mentor ID not found";

/// Path parameter for mentor-specific endpoints.
#[derive(Deserialize, JsonSchema)]
#[schemars(inline)]
struct Id {
    /// The unique identifier of the mentor
    mentor_id: String,
}

/// Optional gym filter for listing mentors.
#[derive(Deserialize, JsonSchema)]
struct GymQuery {
    /// Restrict to the mentors of this gym
    gym_id: Option<String>,
}

/// Creates a router with mentor-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get(list_mentors::<T>).post(create_mentor::<T>),
            |route| route.tag("mentors"),
        )
        .api_route_with(
            "/{mentor_id}",
            get(read_mentor::<T>).delete(delete_mentor::<T>),
            |route| route.tag("mentors"),
        )
}

async fn list_mentors<T: ApiApplication>(
    State(app): State<T>,
    QueryParams(GymQuery { gym_id }): QueryParams<GymQuery>,
) -> Result<Json<Vec<MentorRecord<T::Repository>>>, ApiError> {
    let db = app.database();
    let gym_id = match optional_id(gym_id.as_deref())? {
        Some(gym_id) => Some(require_gym(db, gym_id).await?.id),
        None => None,
    };
    let mentors = db.list_mentors(gym_id).await.map_err(ApiError::storage)?;
    Ok(Json(mentors))
}

/// Register a mentor, optionally at a gym.
///
/// # Returns
///
/// - `201 Created`: the stored mentor, without its password
/// - `400 Bad Request`: invalid fields
/// - `404 Not Found`: unknown gym
async fn create_mentor<T: ApiApplication>(
    State(app): State<T>,
    FormFields(form): FormFields,
) -> Result<(StatusCode, Json<MentorRecord<T::Repository>>), ApiError> {
    let db = app.database();
    let gym_id = match optional_id(form.get("gym_id"))? {
        Some(gym_id) => Some(require_gym(db, gym_id).await?.id),
        None => None,
    };

    let MentorRegistration { mentor, password } = MentorRegistration::from_form(&form)?;
    let password_hash = hash_password(password).await?;

    let mentor_id = app.generate_mentor_id(&mentor);
    let mentor = db
        .create_mentor(mentor_id, gym_id, mentor, password_hash)
        .await
        .map_err(ApiError::storage)?;
    tracing::info!(mentor_id = %mentor.id, "mentor registered");

    Ok((StatusCode::CREATED, Json(mentor)))
}

async fn read_mentor<T: ApiApplication>(
    State(app): State<T>,
    PathParams(Id { mentor_id }): PathParams<Id>,
) -> Result<Json<MentorRecord<T::Repository>>, ApiError> {
    let mentor = app
        .database()
        .get_mentor(parse_id(&mentor_id)?)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound(MENTOR_NOT_FOUND))?;
    Ok(Json(mentor))
}

async fn delete_mentor<T: ApiApplication>(
    State(app): State<T>,
    PathParams(Id { mentor_id }): PathParams<Id>,
) -> Result<StatusCode, ApiError> {
    let mentor_id = parse_id(&mentor_id)?;
    let deleted = app
        .database()
        .delete_mentor(mentor_id)
        .await
        .map_err(ApiError::storage)?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(MENTOR_NOT_FOUND))
    }
}
