// Thin helpers that drive the API the way a client would, so tests read as
// sequences of requests.

use super::TestApp;
use axum::http::StatusCode;
use axum_test::TestServer;
use gym_axum::{config::AxumConfig, router};
use gym_sqlite::{Db, config::SqliteConfig};
use serde_json::Value;

pub async fn server() -> anyhow::Result<TestServer> {
    let db = Db::open(&SqliteConfig::default()).await?;
    let (router, _) = router(TestApp(db), AxumConfig::default());
    TestServer::new(router)
}

pub fn random_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Register a user and return its id.
pub async fn register(server: &TestServer, username: &str, is_staff: bool) -> String {
    let is_staff = is_staff.to_string();
    let email = format!("{username}@gym.io");
    let response = server
        .post("/users")
        .form(&[
            ("username", username),
            ("email", email.as_str()),
            ("password", "correct horse"),
            ("is_staff", is_staff.as_str()),
        ])
        .await;
    response.assert_status(StatusCode::CREATED);
    id_of(&response.json())
}

/// Register a gym administered by `admin` and return its id.
pub async fn open_gym(server: &TestServer, admin: &str) -> String {
    let response = server
        .post("/gyms")
        .form(&[("admin", admin), ("name", "Iron Temple"), ("address", "1 Main St")])
        .await;
    response.assert_status(StatusCode::CREATED);
    id_of(&response.json())
}

/// A staff user together with the gym they administer.
pub struct Owner {
    pub admin: String,
    pub gym: String,
}

pub async fn owner(server: &TestServer, username: &str) -> Owner {
    let admin = register(server, username, true).await;
    let gym = open_gym(server, &admin).await;
    Owner { admin, gym }
}

/// The fields of a valid product submission.
pub fn product_fields(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_owned()),
        ("type", "supplement".to_owned()),
        ("desc", "Protein powder".to_owned()),
        ("image", "whey.png".to_owned()),
        ("reviews", "Great".to_owned()),
        ("stock", "10".to_owned()),
        ("price", "19.99".to_owned()),
    ]
}

/// Add a product for `owner` and return its id.
pub async fn add_product(server: &TestServer, owner: &Owner, name: &str) -> String {
    let mut fields = product_fields(name);
    fields.push(("admin", owner.admin.clone()));
    fields.push(("gym_id", owner.gym.clone()));
    server
        .post("/products")
        .form(&fields)
        .await
        .assert_status(StatusCode::CREATED);

    // Products are listed oldest first, so the newest is last
    let listed = server
        .get("/products")
        .add_query_param("gym_id", &owner.gym)
        .await
        .json::<Value>();
    let products = listed.as_array().cloned().unwrap_or_default();
    products.last().map(id_of).unwrap_or_default()
}

pub async fn count_products(server: &TestServer) -> usize {
    server
        .get("/products")
        .await
        .json::<Value>()
        .as_array()
        .map(Vec::len)
        .unwrap_or_default()
}

pub fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap_or_default().to_owned()
}
