//! The concrete application wired into the server.

use gym_core::{
    models::{GymData, MentorData, ProductData, UserData},
    ports::Application,
};
use gym_sqlite::{
    Db,
    types::{DateTime, GymId, MentorId, ProductId, UserId},
};
use uuid::Uuid;

/// The demo application: SQLite storage and random (v4) identifiers.
#[derive(Clone)]
pub struct DemoApp {
    /// Database connection for persistent storage
    pub db: Db,
}

impl Application for DemoApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_user_id(&self, _data: &UserData) -> UserId {
        Uuid::new_v4().into()
    }

    fn generate_gym_id(&self, _data: &GymData) -> GymId {
        Uuid::new_v4().into()
    }

    fn generate_mentor_id(&self, _data: &MentorData) -> MentorId {
        Uuid::new_v4().into()
    }

    fn generate_product_id(&self, _data: &ProductData) -> ProductId {
        Uuid::new_v4().into()
    }
}
