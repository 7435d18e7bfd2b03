//! Type definitions for the SQLite implementation.
//!
//! This module contains both public types used throughout the crate and internal
//! types used for database row mapping. The public types include strongly-typed
//! IDs and a datetime representation that ensure type safety across the system.

use gym_core::models::{
    GymData, GymRecord, MentorData, MentorRecord, ProductData, ProductRecord, UserData, UserRecord,
};

use crate::Db;

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::{GymId, MentorId, ProductId, UserId};

#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub date_joined: DateTime,
}

impl From<UserRow> for UserRecord<Db> {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: row.id,
            data: UserData {
                username: row.username,
                email: row.email,
                first_name: row.first_name,
                last_name: row.last_name,
                is_staff: row.is_staff,
            },
            date_joined: row.date_joined,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct GymRow {
    pub id: GymId,
    pub admin_id: Option<UserId>,
    pub name: String,
    pub address: String,
    pub description: String,
    pub phone_number: String,
}

impl From<GymRow> for GymRecord<Db> {
    fn from(row: GymRow) -> Self {
        GymRecord {
            id: row.id,
            admin: row.admin_id,
            data: GymData {
                name: row.name,
                address: row.address,
                description: row.description,
                phone_number: row.phone_number,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct MentorRow {
    pub id: MentorId,
    pub gym_id: Option<GymId>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub expertise: String,
    pub email: String,
    pub phone_number: String,
}

impl From<MentorRow> for MentorRecord<Db> {
    fn from(row: MentorRow) -> Self {
        MentorRecord {
            id: row.id,
            gym: row.gym_id,
            data: MentorData {
                username: row.username,
                first_name: row.first_name,
                last_name: row.last_name,
                expertise: row.expertise,
                email: row.email,
                phone_number: row.phone_number,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ProductRow {
    pub id: ProductId,
    pub gym_id: GymId,
    pub admin_id: UserId,
    pub name: String,
    pub kind: String,
    pub description: String,
    pub image: String,
    pub reviews: String,
    pub stock: i64,
    pub price: String,
    pub stripe_price_id: Option<String>,
    pub stripe_product_id: Option<String>,
}

// The price column is decimal text and the stock column is checked to be
// non-negative, but neither is guaranteed by SQLite's types alone.
impl TryFrom<ProductRow> for ProductRecord<Db> {
    type Error = sqlx::Error;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = row
            .price
            .parse()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let stock = u32::try_from(row.stock).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(ProductRecord {
            id: row.id,
            data: ProductData {
                name: row.name,
                kind: row.kind,
                desc: row.description,
                image: row.image,
                reviews: row.reviews,
                stock,
                price,
                stripe_price_id: row.stripe_price_id,
                stripe_product_id: row.stripe_product_id,
            },
            gym: row.gym_id,
            admin: row.admin_id,
        })
    }
}
