use super::Message;
use crate::{
    ApiApplication,
    error::ApiError,
    form::FormFields,
    ownership::{PRODUCT_NOT_OWNED, administered_gym, owned_product, parse_id},
    params::QueryParams,
};
use axum::{Json, extract::State, http::StatusCode};
use gym_core::{
    models::{FormData, ProductData, ProductPatch, non_blank},
    ports::{ProductRepository as _, Repository},
};
use schemars::JsonSchema;
use serde::Deserialize;

const CREATE_IDS_REQUIRED: &str = "Admin ID and Gym ID are required";
const UPDATE_IDS_REQUIRED: &str = "Admin ID, Gym ID, and Product ID are required";

type Ids<R> = (
    <R as Repository>::UserId,
    <R as Repository>::GymId,
    <R as Repository>::ProductId,
);

/// Parse the admin, gym, and product identifiers, all of which are required.
/// Blank values count as missing.
fn required_ids<T: ApiApplication>(
    admin: Option<&str>,
    gym_id: Option<&str>,
    product_id: Option<&str>,
) -> Result<Ids<T::Repository>, ApiError> {
    let (Some(admin), Some(gym_id), Some(product_id)) =
        (non_blank(admin), non_blank(gym_id), non_blank(product_id))
    else {
        return Err(ApiError::MissingParameter(UPDATE_IDS_REQUIRED));
    };
    Ok((parse_id(admin)?, parse_id(gym_id)?, parse_id(product_id)?))
}

/// Add a product to a gym.
///
/// # Returns
///
/// - `201 Created`: `{"message": "Product added successfully"}`
/// - `400 Bad Request`: `admin` or `gym_id` missing, or invalid product fields
/// - `404 Not Found`: unknown gym, unknown or non-staff admin, or the admin
///   does not administer the gym
pub(crate) async fn create_product<T: ApiApplication>(
    State(app): State<T>,
    FormFields(form): FormFields,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let db = app.database();

    let (Some(admin), Some(gym_id)) = (form.non_empty("admin"), form.non_empty("gym_id")) else {
        return Err(ApiError::MissingParameter(CREATE_IDS_REQUIRED));
    };
    let admin_id = parse_id::<<T::Repository as Repository>::UserId>(admin)?;
    let gym_id = parse_id::<<T::Repository as Repository>::GymId>(gym_id)?;

    administered_gym(db, admin_id.clone(), gym_id.clone()).await?;

    let data = ProductData::from_form(&form)?;
    let product_id = app.generate_product_id(&data);
    let product = db
        .create_product(product_id, gym_id, admin_id, data)
        .await
        .map_err(ApiError::storage)?;
    tracing::info!(product_id = %product.id, gym_id = %product.gym, "product added");

    Ok((
        StatusCode::CREATED,
        Json(Message::new("Product added successfully")),
    ))
}

/// Partially update a product.
///
/// # Returns
///
/// - `200 OK`: `{"message": "Product details updated successfully"}`
/// - `400 Bad Request`: an identifier is missing, or a supplied field is invalid
/// - `404 Not Found`: the ownership chain does not hold
pub(crate) async fn update_product<T: ApiApplication>(
    State(app): State<T>,
    FormFields(form): FormFields,
) -> Result<Json<Message>, ApiError> {
    let db = app.database();

    let (admin_id, gym_id, product_id) = ids_from_form::<T>(&form)?;
    owned_product(db, admin_id, gym_id, product_id.clone()).await?;

    let patch = ProductPatch::from_form(&form)?;
    let product = db
        .update_product(product_id, patch)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound(PRODUCT_NOT_OWNED))?;
    tracing::info!(product_id = %product.id, "product updated");

    Ok(Json(Message::new("Product details updated successfully")))
}

fn ids_from_form<T: ApiApplication>(form: &FormData) -> Result<Ids<T::Repository>, ApiError> {
    required_ids::<T>(form.get("admin"), form.get("gym_id"), form.get("product_id"))
}

/// Identifies the product to delete.
#[derive(Deserialize, JsonSchema)]
pub(crate) struct DeleteQuery {
    /// The admin who created the product
    admin: Option<String>,
    /// The gym the product is sold at
    gym_id: Option<String>,
    /// The product to remove
    product_id: Option<String>,
}

/// Remove a product.
///
/// # Returns
///
/// - `204 No Content`: the product is gone
/// - `400 Bad Request`: an identifier is missing
/// - `404 Not Found`: the ownership chain does not hold
pub(crate) async fn delete_product<T: ApiApplication>(
    State(app): State<T>,
    QueryParams(query): QueryParams<DeleteQuery>,
) -> Result<StatusCode, ApiError> {
    let db = app.database();

    let (admin_id, gym_id, product_id) = required_ids::<T>(
        query.admin.as_deref(),
        query.gym_id.as_deref(),
        query.product_id.as_deref(),
    )?;
    owned_product(db, admin_id, gym_id, product_id.clone()).await?;

    let deleted = db
        .delete_product(product_id.clone())
        .await
        .map_err(ApiError::storage)?;
    if !deleted {
        return Err(ApiError::NotFound(PRODUCT_NOT_OWNED));
    }
    tracing::info!(%product_id, "product removed");

    Ok(StatusCode::NO_CONTENT)
}
