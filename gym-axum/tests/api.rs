use axum::http::StatusCode;
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use rstest::*;
use serde_json::{Value, json};

mod app;
use app::*;

#[derive(Debug, Clone, Copy)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Send a product request carrying the given identifiers, placing them in
/// the query string or form body as the method expects.
async fn product_request(
    server: &TestServer,
    method: Method,
    ids: &[(&'static str, String)],
) -> axum_test::TestResponse {
    match method {
        Method::Get => server.get("/products").add_query_params(ids).await,
        Method::Delete => server.delete("/products").add_query_params(ids).await,
        Method::Post => {
            let mut fields = product_fields("Whey");
            fields.extend(ids.iter().cloned());
            server.post("/products").form(&fields).await
        }
        Method::Put => {
            let mut fields = vec![("stock", "3".to_owned())];
            fields.extend(ids.iter().cloned());
            server.put("/products").form(&fields).await
        }
    }
}

#[test_log::test(tokio::test)]
async fn health_check_reports_ok() -> anyhow::Result<()> {
    let server = server().await?;
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({"status": "ok"}));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn openapi_document_lists_products() -> anyhow::Result<()> {
    let server = server().await?;
    let document = server.get("/docs/api.json").await.json::<Value>();
    assert_eq!(document["info"]["title"], "Gym Management API");
    let paths = &document["paths"];
    let products = if paths["/products"].is_object() {
        &paths["/products"]
    } else {
        &paths["/products/"]
    };
    for method in ["get", "post", "put", "delete"] {
        assert!(
            products[method].is_object(),
            "{method} /products is undocumented"
        );
    }
    Ok(())
}

#[rstest]
#[case::get(Method::Get)]
#[case::post(Method::Post)]
#[case::put(Method::Put)]
#[case::delete(Method::Delete)]
#[test_log::test(tokio::test)]
async fn unknown_gym_is_not_found(#[case] method: Method) -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;
    let product = add_product(&server, &owner, "Whey").await;

    let response = product_request(
        &server,
        method,
        &[
            ("gym_id", random_id()),
            ("admin", owner.admin.clone()),
            ("product_id", product),
        ],
    )
    .await;

    response.assert_status_not_found();
    response.assert_json(&json!({"error": "Gym ID not found"}));
    Ok(())
}

#[rstest]
#[case::get(Method::Get)]
#[case::post(Method::Post)]
#[case::put(Method::Put)]
#[case::delete(Method::Delete)]
#[test_log::test(tokio::test)]
async fn non_staff_admin_is_not_found(#[case] method: Method) -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;
    let product = add_product(&server, &owner, "Whey").await;
    let member = register(&server, "member", false).await;

    for admin in [member, random_id()] {
        let response = product_request(
            &server,
            method,
            &[
                ("gym_id", owner.gym.clone()),
                ("admin", admin),
                ("product_id", product.clone()),
            ],
        )
        .await;

        response.assert_status_not_found();
        response.assert_json(&json!({"error": "Admin ID not found or not an admin user"}));
    }
    Ok(())
}

#[rstest]
#[case::post_without_admin(Method::Post, &["gym_id"], "Admin ID and Gym ID are required")]
#[case::post_without_gym(Method::Post, &["admin"], "Admin ID and Gym ID are required")]
#[case::put_without_product(Method::Put, &["admin", "gym_id"], "Admin ID, Gym ID, and Product ID are required")]
#[case::put_without_admin(Method::Put, &["gym_id", "product_id"], "Admin ID, Gym ID, and Product ID are required")]
#[case::delete_without_gym(Method::Delete, &["admin", "product_id"], "Admin ID, Gym ID, and Product ID are required")]
#[case::delete_without_anything(Method::Delete, &[], "Admin ID, Gym ID, and Product ID are required")]
#[test_log::test(tokio::test)]
async fn missing_identifiers_are_rejected_without_writes(
    #[case] method: Method,
    #[case] supplied: &[&str],
    #[case] message: &str,
) -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;
    let product = add_product(&server, &owner, "Whey").await;

    let ids = [
        ("admin", owner.admin.clone()),
        ("gym_id", owner.gym.clone()),
        ("product_id", product.clone()),
    ]
    .into_iter()
    .filter(|(key, _)| supplied.contains(key))
    .collect::<Vec<_>>();

    let response = product_request(&server, method, &ids).await;
    response.assert_status_bad_request();
    response.assert_json(&json!({"error": message}));

    assert_eq!(count_products(&server).await, 1);
    let stored = server
        .get("/products")
        .add_query_param("product_id", &product)
        .await
        .json::<Value>();
    assert_eq!(stored["stock"], 10);
    Ok(())
}

#[rstest]
#[case::post(Method::Post, "Admin ID and Gym ID are required")]
#[case::put(Method::Put, "Admin ID, Gym ID, and Product ID are required")]
#[case::delete(Method::Delete, "Admin ID, Gym ID, and Product ID are required")]
#[test_log::test(tokio::test)]
async fn blank_identifiers_count_as_missing(
    #[case] method: Method,
    #[case] message: &str,
) -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;
    let product = add_product(&server, &owner, "Whey").await;

    let response = product_request(
        &server,
        method,
        &[
            ("admin", "  ".to_owned()),
            ("gym_id", owner.gym.clone()),
            ("product_id", product),
        ],
    )
    .await;
    response.assert_status_bad_request();
    response.assert_json(&json!({"error": message}));
    assert_eq!(count_products(&server).await, 1);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn created_products_are_listed_by_gym() -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;

    let mut fields = product_fields("Whey");
    fields.push(("admin", owner.admin.clone()));
    fields.push(("gym_id", owner.gym.clone()));
    let response = server.post("/products").form(&fields).await;
    response.assert_status(StatusCode::CREATED);
    response.assert_json(&json!({"message": "Product added successfully"}));

    let listed = server
        .get("/products")
        .add_query_param("gym_id", &owner.gym)
        .await;
    listed.assert_status_ok();
    let listed = listed.json::<Value>();
    let products = listed.as_array().cloned().unwrap_or_default();
    assert_eq!(products.len(), 1);

    let product = &products[0];
    assert_eq!(product["name"], "Whey");
    assert_eq!(product["type"], "supplement");
    assert_eq!(product["desc"], "Protein powder");
    assert_eq!(product["stock"], 10);
    assert_eq!(product["price"], "19.99");
    assert_eq!(product["gym"], owner.gym.as_str());
    assert_eq!(product["admin"], owner.admin.as_str());
    assert_eq!(product["stripe_price_id"], Value::Null);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn queries_follow_the_most_specific_filter() -> anyhow::Result<()> {
    let server = server().await?;
    let north = owner(&server, "north").await;
    let south = owner(&server, "south").await;
    let whey = add_product(&server, &north, "Whey").await;
    add_product(&server, &north, "Creatine").await;
    add_product(&server, &south, "Towel").await;

    let names = |value: Value| -> Vec<String> {
        value
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|product| product["name"].as_str().map(str::to_owned))
            .collect()
    };

    // Everything
    let all = server.get("/products").await.json::<Value>();
    assert_eq!(names(all), ["Whey", "Creatine", "Towel"]);

    // An admin without a gym still selects everything
    let all = server
        .get("/products")
        .add_query_param("admin", &south.admin)
        .await
        .json::<Value>();
    assert_eq!(names(all).len(), 3);

    let scoped = server
        .get("/products")
        .add_query_param("gym_id", &north.gym)
        .add_query_param("admin", &north.admin)
        .await
        .json::<Value>();
    assert_eq!(names(scoped), ["Whey", "Creatine"]);

    let foreign = server
        .get("/products")
        .add_query_param("gym_id", &north.gym)
        .add_query_param("admin", &south.admin)
        .await;
    foreign.assert_status_not_found();
    foreign.assert_json(&json!({"error": "Gym ID not found for the given admin"}));

    // A product id wins over every other filter and yields a single object
    let single = server
        .get("/products")
        .add_query_param("gym_id", &south.gym)
        .add_query_param("product_id", &whey)
        .await
        .json::<Value>();
    assert_eq!(single["name"], "Whey");

    // Blank values are ignored
    let blank = server
        .get("/products")
        .add_query_param("gym_id", "")
        .await
        .json::<Value>();
    assert_eq!(names(blank).len(), 3);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn partial_update_changes_only_supplied_fields() -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;
    let product = add_product(&server, &owner, "Whey").await;

    let response = server
        .put("/products")
        .form(&[
            ("admin", owner.admin.as_str()),
            ("gym_id", owner.gym.as_str()),
            ("product_id", product.as_str()),
            ("stock", "3"),
        ])
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({"message": "Product details updated successfully"}));

    let stored = server
        .get("/products")
        .add_query_param("product_id", &product)
        .await
        .json::<Value>();
    assert_eq!(stored["stock"], 3);
    assert_eq!(stored["name"], "Whey");
    assert_eq!(stored["price"], "19.99");
    Ok(())
}

#[test_log::test(tokio::test)]
async fn products_of_other_owners_cannot_be_changed() -> anyhow::Result<()> {
    let server = server().await?;
    let north = owner(&server, "north").await;
    let south = owner(&server, "south").await;
    let towel = add_product(&server, &south, "Towel").await;

    // North's chain holds, but the product belongs to south
    let response = server
        .put("/products")
        .form(&[
            ("admin", north.admin.as_str()),
            ("gym_id", north.gym.as_str()),
            ("product_id", towel.as_str()),
            ("stock", "0"),
        ])
        .await;
    response.assert_status_not_found();
    response.assert_json(&json!({"error": "Product ID not found for the given admin and gym"}));

    // North's admin against south's gym breaks the chain earlier
    let response = server
        .delete("/products")
        .add_query_param("admin", &north.admin)
        .add_query_param("gym_id", &south.gym)
        .add_query_param("product_id", &towel)
        .await;
    response.assert_status_not_found();
    response.assert_json(&json!({"error": "Gym ID not found for the given admin"}));

    assert_eq!(count_products(&server).await, 1);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn deleted_products_are_gone() -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;
    let product = add_product(&server, &owner, "Whey").await;

    let response = server
        .delete("/products")
        .add_query_param("admin", &owner.admin)
        .add_query_param("gym_id", &owner.gym)
        .add_query_param("product_id", &product)
        .await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.as_bytes().is_empty());

    let response = server
        .get("/products")
        .add_query_param("product_id", &product)
        .await;
    response.assert_status_not_found();
    response.assert_json(&json!({"error": "Product ID not found"}));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn invalid_fields_are_reported_per_field() -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;

    let response = server
        .post("/products")
        .form(&[
            ("admin", owner.admin.as_str()),
            ("gym_id", owner.gym.as_str()),
            ("name", "Whey"),
            ("stock", "-1"),
            ("price", "1.999"),
        ])
        .await;
    response.assert_status_bad_request();
    let body = response.json::<Value>();
    assert_eq!(body["error"], "Invalid submission");
    assert_eq!(
        body["fields"]["stock"],
        json!(["Ensure this value is greater than or equal to 0."])
    );
    assert_eq!(
        body["fields"]["price"],
        json!(["Ensure that there are no more than 2 decimal places."])
    );
    assert_eq!(body["fields"]["type"], json!(["This field is required."]));
    assert!(body["fields"].get("name").is_none());

    assert_eq!(count_products(&server).await, 0);
    Ok(())
}

#[rstest]
#[case::gym("gym_id")]
#[case::admin("admin")]
#[case::product("product_id")]
#[test_log::test(tokio::test)]
async fn malformed_identifiers_are_bad_requests(#[case] key: &str) -> anyhow::Result<()> {
    let server = server().await?;
    let response = server
        .get("/products")
        .add_query_param(key, "not-a-uuid")
        .await;
    response.assert_status_bad_request();
    response.assert_json(&json!({"error": "\"not-a-uuid\" is not a valid UUID."}));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn repeated_query_keys_keep_the_last_value() -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;
    add_product(&server, &owner, "Whey").await;

    let listed = server
        .get("/products")
        .add_query_param("gym_id", random_id())
        .add_query_param("gym_id", &owner.gym)
        .await;
    listed.assert_status_ok();
    assert_eq!(listed.json::<Value>().as_array().map(Vec::len), Some(1));

    let response = server
        .get("/products")
        .add_query_param("gym_id", &owner.gym)
        .add_query_param("gym_id", random_id())
        .await;
    response.assert_status_not_found();
    response.assert_json(&json!({"error": "Gym ID not found"}));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn multipart_uploads_keep_the_file_name() -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;

    let mut form = MultipartForm::new()
        .add_text("admin", owner.admin.clone())
        .add_text("gym_id", owner.gym.clone())
        .add_part(
            "image",
            Part::bytes(vec![0x89, 0x50, 0x4e, 0x47])
                .file_name("shaker.png")
                .mime_type("image/png"),
        );
    for (key, value) in product_fields("Shaker") {
        if key != "image" {
            form = form.add_text(key, value);
        }
    }

    server
        .post("/products")
        .multipart(form)
        .await
        .assert_status(StatusCode::CREATED);

    let products = server
        .get("/products")
        .add_query_param("gym_id", &owner.gym)
        .await
        .json::<Value>();
    assert_eq!(products[0]["image"], "shaker.png");
    Ok(())
}

#[test_log::test(tokio::test)]
async fn json_bodies_are_accepted() -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;
    let product = add_product(&server, &owner, "Whey").await;

    let response = server
        .put("/products")
        .json(&json!({
            "admin": owner.admin,
            "gym_id": owner.gym,
            "product_id": product,
            "price": 24.5,
            "stripe_price_id": "price_123",
        }))
        .await;
    response.assert_status_ok();

    let stored = server
        .get("/products")
        .add_query_param("product_id", &product)
        .await
        .json::<Value>();
    assert_eq!(stored["price"], "24.5");
    assert_eq!(stored["stripe_price_id"], "price_123");
    assert_eq!(stored["stock"], 10);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn deleting_a_gym_removes_its_mentors_and_products() -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;
    let product = add_product(&server, &owner, "Whey").await;

    let response = server
        .post("/mentors")
        .form(&[
            ("gym_id", owner.gym.as_str()),
            ("username", "coach"),
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("expertise", "strength"),
            ("email", "coach@gym.io"),
            ("password", "secret"),
            ("phone_number", "555-0100"),
        ])
        .await;
    response.assert_status(StatusCode::CREATED);
    let mentor = id_of(&response.json());
    assert!(response.json::<Value>().get("password").is_none());

    // Only the administering admin may remove the gym
    let response = server
        .delete(&format!("/gyms/{}", owner.gym))
        .await;
    response.assert_status_bad_request();
    response.assert_json(&json!({"error": "Admin ID is required"}));

    let response = server
        .delete(&format!("/gyms/{}", owner.gym))
        .add_query_param("admin", &owner.admin)
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    server
        .get(&format!("/gyms/{}", owner.gym))
        .await
        .assert_status_not_found();
    server
        .get(&format!("/mentors/{mentor}"))
        .await
        .assert_status_not_found();
    server
        .get("/products")
        .add_query_param("product_id", &product)
        .await
        .assert_status_not_found();
    assert_eq!(count_products(&server).await, 0);
    Ok(())
}

#[test_log::test(tokio::test)]
async fn usernames_are_unique() -> anyhow::Result<()> {
    let server = server().await?;
    let user = register(&server, "coach", false).await;

    let response = server.get(&format!("/users/{user}")).await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["username"], "coach");
    assert_eq!(body["is_staff"], false);
    assert!(body.get("password").is_none());

    let response = server
        .post("/users")
        .form(&[
            ("username", "coach"),
            ("email", "other@gym.io"),
            ("password", "correct horse"),
        ])
        .await;
    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["fields"]["username"],
        json!(["A user with that username already exists."])
    );

    let response = server.get(&format!("/users/{}", random_id())).await;
    response.assert_status_not_found();
    response.assert_json(&json!({"error": "User ID not found"}));
    Ok(())
}

#[test_log::test(tokio::test)]
async fn gyms_require_a_staff_admin() -> anyhow::Result<()> {
    let server = server().await?;
    let member = register(&server, "member", false).await;

    let response = server
        .post("/gyms")
        .form(&[("name", "Iron Temple"), ("address", "1 Main St")])
        .await;
    response.assert_status_bad_request();
    response.assert_json(&json!({"error": "Admin ID is required"}));

    let response = server
        .post("/gyms")
        .form(&[
            ("admin", member.as_str()),
            ("name", "Iron Temple"),
            ("address", "1 Main St"),
        ])
        .await;
    response.assert_status_not_found();

    let owner = owner(&server, "boss").await;
    let gyms = server
        .get("/gyms")
        .add_query_param("admin", &owner.admin)
        .await
        .json::<Value>();
    assert_eq!(gyms.as_array().map(Vec::len), Some(1));
    assert_eq!(gyms[0]["admin"], owner.admin.as_str());
    Ok(())
}

#[test_log::test(tokio::test)]
async fn mentors_are_listed_by_gym() -> anyhow::Result<()> {
    let server = server().await?;
    let owner = owner(&server, "boss").await;

    let response = server
        .get("/mentors")
        .add_query_param("gym_id", random_id())
        .await;
    response.assert_status_not_found();
    response.assert_json(&json!({"error": "Gym ID not found"}));

    let response = server
        .post("/mentors")
        .form(&[("gym_id", owner.gym.as_str()), ("username", "coach")])
        .await;
    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["fields"]["expertise"],
        json!(["This field is required."])
    );

    let mentors = server
        .get("/mentors")
        .add_query_param("gym_id", &owner.gym)
        .await
        .json::<Value>();
    assert_eq!(mentors, json!([]));
    Ok(())
}
