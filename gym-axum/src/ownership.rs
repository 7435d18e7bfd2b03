//! Identifier parsing and the ownership chain every mutation walks.
//!
//! The chain is checked in a fixed order, stopping at the first failure:
//!
//! 1. the gym exists
//! 2. the admin exists and is staff
//! 3. the admin administers the gym
//! 4. the product was created by that admin for that gym
//!
//! A non-staff user is indistinguishable from a missing one.

use crate::error::ApiError;
use gym_core::{
    models::{GymRecord, ProductRecord, UserRecord, non_blank},
    ports::{GymRepository, ProductRepository, UserRepository},
};
use std::str::FromStr;

pub(crate) const GYM_NOT_FOUND: &str = "Gym ID not found";
pub(crate) const ADMIN_NOT_FOUND: &str = "Admin ID not found or not an admin user";
pub(crate) const GYM_NOT_ADMINISTERED: &str = "Gym ID not found for the given admin";
pub(crate) const PRODUCT_NOT_FOUND: &str = "Product ID not found";
pub(crate) const PRODUCT_NOT_OWNED: &str = "Product ID not found for the given admin and gym";

/// Parse a submitted identifier.
pub(crate) fn parse_id<I: FromStr>(raw: &str) -> Result<I, ApiError> {
    let raw = raw.trim();
    raw.parse()
        .map_err(|_| ApiError::Unexpected(format!("\"{raw}\" is not a valid UUID.")))
}

/// Parse an identifier that may be absent; blank counts as absent.
pub(crate) fn optional_id<I: FromStr>(raw: Option<&str>) -> Result<Option<I>, ApiError> {
    non_blank(raw).map(parse_id).transpose()
}

pub(crate) async fn require_gym<R: GymRepository + Sync>(
    db: &R,
    gym_id: R::GymId,
) -> Result<GymRecord<R>, ApiError> {
    db.get_gym(gym_id)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound(GYM_NOT_FOUND))
}

pub(crate) async fn require_admin<R: UserRepository + Sync>(
    db: &R,
    admin_id: R::UserId,
) -> Result<UserRecord<R>, ApiError> {
    db.get_admin(admin_id)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound(ADMIN_NOT_FOUND))
}

/// Steps 1 through 3: the gym, administered by the admin.
pub(crate) async fn administered_gym<R: UserRepository + GymRepository + Sync>(
    db: &R,
    admin_id: R::UserId,
    gym_id: R::GymId,
) -> Result<GymRecord<R>, ApiError> {
    let gym = require_gym(db, gym_id).await?;
    let admin = require_admin(db, admin_id).await?;
    if gym.is_administered_by(&admin.id) {
        Ok(gym)
    } else {
        Err(ApiError::NotFound(GYM_NOT_ADMINISTERED))
    }
}

/// The whole chain, ending at the product.
pub(crate) async fn owned_product<R>(
    db: &R,
    admin_id: R::UserId,
    gym_id: R::GymId,
    product_id: R::ProductId,
) -> Result<ProductRecord<R>, ApiError>
where
    R: UserRepository + GymRepository + ProductRepository + Sync,
{
    let gym = administered_gym(db, admin_id.clone(), gym_id).await?;
    db.get_owned_product(product_id, admin_id, gym.id)
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotFound(PRODUCT_NOT_OWNED))
}
