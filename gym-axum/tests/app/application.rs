use gym_core::{
    models::{GymData, MentorData, ProductData, UserData},
    ports::Application,
};
use gym_sqlite::{
    Db,
    types::{DateTime, GymId, MentorId, ProductId, UserId},
};

#[derive(Clone)]
pub struct TestApp(pub Db);

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_user_id(&self, _data: &UserData) -> UserId {
        uuid::Uuid::new_v4().into()
    }

    fn generate_gym_id(&self, _data: &GymData) -> GymId {
        uuid::Uuid::new_v4().into()
    }

    fn generate_mentor_id(&self, _data: &MentorData) -> MentorId {
        uuid::Uuid::new_v4().into()
    }

    fn generate_product_id(&self, _data: &ProductData) -> ProductId {
        uuid::Uuid::new_v4().into()
    }
}
