use gym_core::{
    models::{GymData, MentorData, ProductData, UserData},
    ports::Application,
};
use gym_sqlite::{
    Db,
    config::SqliteConfig,
    types::{DateTime, GymId, MentorId, ProductId, UserId},
};

pub struct TestApp(pub Db);

impl TestApp {
    pub async fn in_memory() -> anyhow::Result<Self> {
        Ok(Self(Db::open(&SqliteConfig::default()).await?))
    }
}

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

pub fn user(username: &str, is_staff: bool) -> UserData {
    UserData {
        username: username.to_owned(),
        email: format!("{username}@gym.io"),
        first_name: String::new(),
        last_name: String::new(),
        is_staff,
    }
}

pub fn gym(name: &str) -> GymData {
    GymData {
        name: name.to_owned(),
        address: "1 Main St".to_owned(),
        description: String::new(),
        phone_number: String::new(),
    }
}

pub fn mentor(username: &str) -> MentorData {
    MentorData {
        username: username.to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        expertise: "strength".to_owned(),
        email: format!("{username}@gym.io"),
        phone_number: "555-0100".to_owned(),
    }
}

pub fn product(name: &str) -> ProductData {
    ProductData {
        name: name.to_owned(),
        kind: "supplement".to_owned(),
        desc: "Protein powder".to_owned(),
        image: "whey.png".to_owned(),
        reviews: "Great".to_owned(),
        stock: 10,
        price: "19.99".parse().expect("valid decimal"),
        stripe_price_id: None,
        stripe_product_id: None,
    }
}

/// An admin, the gym they administer, and the ids needed to add products to it.
pub struct Fixture {
    pub admin: UserId,
    pub gym: GymId,
}

impl TestApp {
    pub async fn admin_with_gym(&self, username: &str) -> anyhow::Result<Fixture> {
        use gym_core::ports::{GymRepository as _, UserRepository as _};

        let data = user(username, true);
        let admin = self.generate_user_id(&data);
        self.database()
            .create_user(admin, data, "hash".to_owned(), self.now())
            .await?
            .map_err(|failure| anyhow::anyhow!("{failure:?}"))?;

        let data = gym(&format!("{username}'s gym"));
        let gym = self.generate_gym_id(&data);
        self.database().create_gym(gym, Some(admin), data).await?;

        Ok(Fixture { admin, gym })
    }
}
