//! Repository trait implementations for the SQLite database.
//!
//! This module contains the implementations of all repository traits defined in
//! `gym-core` for the SQLite database backend.

use crate::{
    Db,
    types::{DateTime, GymId, MentorId, ProductId, UserId},
};
use gym_core::ports::Repository;

mod gym;
mod mentor;
mod product;
mod user;

impl Repository for Db {
    type Error = sqlx::Error;
    type DateTime = DateTime;
    type UserId = UserId;
    type GymId = GymId;
    type MentorId = MentorId;
    type ProductId = ProductId;
}
