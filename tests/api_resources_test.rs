use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use coffee_app::db;
use coffee_app::infrastructure::AppState;
use coffee_app::server;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test app backed by a fresh in-memory database
async fn setup_test_app() -> Router {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    server::build_router(AppState::new(db), &[])
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().uri(uri).method(method);
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn customer_payload(email: &str) -> Value {
    json!({
        "username": "ada",
        "name": "Ada",
        "lastname": "Lovelace",
        "date_birth": "1990-12-10",
        "email": email,
        "gender": "female"
    })
}

fn product_payload(store: Option<i64>, categories: Value) -> Value {
    json!({
        "name": "Ethiopia Yirgacheffe",
        "info": "Floral",
        "store_product": store,
        "category": categories,
        "stock": true,
        "exp_date": "2030-01-01T00:00:00Z",
        "product_size": 250,
        "product_weight": 250
    })
}

async fn create_store(app: &Router) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/stores",
        Some(json!({
            "store_name": "Downtown",
            "store_phone": "555-0100",
            "store_address": "12 Bean Street",
            "open_time": "08:30"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

async fn create_category(app: &Router, name: &str) -> i64 {
    let (status, body) = send(app, "POST", "/api/categories", Some(json!({ "category": name }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;
    let (status, body) = send(&app, "GET", "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "coffee-app");
}

#[tokio::test]
async fn test_customer_crud() {
    let app = setup_test_app().await;

    let (status, created) = send(&app, "POST", "/api/customers", Some(customer_payload("ada@example.com"))).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["date_birth"], "1990-12-10");
    assert_eq!(created["gender"], "female");
    let id = created["id"].as_i64().unwrap();

    let (status, list) = send(&app, "GET", "/api/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, fetched) = send(&app, "GET", &format!("/api/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let mut replacement = customer_payload("ada@example.com");
    replacement["lastname"] = json!("Byron");
    let (status, updated) = send(&app, "PUT", &format!("/api/customers/{}", id), Some(replacement)).await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["lastname"], "Byron");

    let (status, body) = send(&app, "DELETE", &format!("/api/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "GET", &format!("/api/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not found." }));
}

#[tokio::test]
async fn test_customer_email_is_unique() {
    let app = setup_test_app().await;

    let (status, _) = send(&app, "POST", "/api/customers", Some(customer_payload("ada@example.com"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/customers", Some(customer_payload("ada@example.com"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "email": ["customer with this email already exists."] })
    );

    // Saving a customer with its own email is not a conflict
    let (status, body) = send(
        &app,
        "PATCH",
        "/api/customers/1",
        Some(json!({ "email": "ada@example.com", "name": "Augusta" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["name"], "Augusta");
}

#[tokio::test]
async fn test_validation_errors_are_keyed_by_field() {
    let app = setup_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/customers",
        Some(json!({ "name": "", "email": "nope", "gender": "other", "date_birth": "10/12/1990" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["name"], json!(["This field may not be blank."]));
    assert_eq!(body["lastname"], json!(["This field is required."]));
    assert_eq!(body["email"], json!(["Enter a valid email address."]));
    assert_eq!(body["gender"], json!(["\"other\" is not a valid choice."]));
    assert!(body["date_birth"][0].as_str().unwrap().starts_with("Date has wrong format"));
}

#[tokio::test]
async fn test_malformed_and_non_object_bodies() {
    let app = setup_test_app().await;

    let req = Request::builder()
        .uri("/api/stores")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"store_name\": "))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "POST", "/api/stores", Some(json!(["not", "a", "dict"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "non_field_errors": ["Invalid data. Expected a dictionary, but got list."] })
    );
}

#[tokio::test]
async fn test_ratings_range() {
    let app = setup_test_app().await;

    let (status, body) = send(&app, "POST", "/api/ratings", Some(json!({ "product_rating": 6 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["product_rating"],
        json!(["Ensure this value is less than or equal to 5."])
    );

    let (status, body) = send(&app, "POST", "/api/ratings", Some(json!({ "store_rating": -1 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["store_rating"],
        json!(["Ensure this value is greater than or equal to 0."])
    );

    // Every rating is optional
    let (status, body) = send(&app, "POST", "/api/ratings", Some(json!({ "package_rating": 5 }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["product_id"], Value::Null);
    assert_eq!(body["product_rating"], Value::Null);
    assert_eq!(body["package_rating"], 5);
}

#[tokio::test]
async fn test_store_times_are_normalized() {
    let app = setup_test_app().await;
    let id = create_store(&app).await;

    let (status, body) = send(&app, "GET", &format!("/api/stores/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["open_time"], "08:30:00");
    assert_eq!(body["close_time"], Value::Null);
}

#[tokio::test]
async fn test_product_categories_many_to_many() {
    let app = setup_test_app().await;
    let store = create_store(&app).await;
    let espresso = create_category(&app, "Espresso").await;
    let filter = create_category(&app, "Filter").await;

    let (status, product) = send(
        &app,
        "POST",
        "/api/products",
        Some(product_payload(Some(store), json!([filter, espresso, filter]))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{product}");
    assert_eq!(product["category"], json!([espresso, filter]));
    assert_eq!(product["store_product"], store);
    let id = product["id"].as_i64().unwrap();

    // PATCH replaces the category set and keeps every other field
    let (status, patched) = send(
        &app,
        "PATCH",
        &format!("/api/products/{}", id),
        Some(json!({ "category": [filter] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{patched}");
    assert_eq!(patched["category"], json!([filter]));
    assert_eq!(patched["name"], "Ethiopia Yirgacheffe");

    let (_, list) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(list[0]["category"], json!([filter]));

    // Deleting a category drops it from the product
    let (status, _) = send(&app, "DELETE", &format!("/api/categories/{}", filter), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, product) = send(&app, "GET", &format!("/api/products/{}", id), None).await;
    assert_eq!(product["category"], json!([]));
}

#[tokio::test]
async fn test_unknown_related_ids_are_rejected() {
    let app = setup_test_app().await;

    let (status, body) = send(&app, "POST", "/api/products", Some(product_payload(Some(42), json!([7])))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["store_product"],
        json!(["Invalid pk \"42\" - object does not exist."])
    );
    assert_eq!(
        body["category"],
        json!(["Invalid pk \"7\" - object does not exist."])
    );

    let (status, body) = send(&app, "POST", "/api/products", Some(product_payload(None, json!("1")))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["category"],
        json!(["Expected a list of items but got type \"str\"."])
    );
}

#[tokio::test]
async fn test_trade_date_is_stamped_and_read_only() {
    let app = setup_test_app().await;
    let store = create_store(&app).await;
    let (_, product) = send(&app, "POST", "/api/products", Some(product_payload(Some(store), json!([])))).await;

    let (status, trade) = send(
        &app,
        "POST",
        "/api/trades",
        Some(json!({
            "product": product["id"],
            "amount": 2,
            "price": "12.50",
            "location": "Counter",
            "date": "2000-01-01T00:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{trade}");
    assert_eq!(trade["price"], 12.5);
    assert_eq!(trade["discount_id"], json!([]));
    let stamped = trade["date"].as_str().unwrap().to_string();
    assert!(!stamped.starts_with("2000"), "{stamped}");

    let id = trade["id"].as_i64().unwrap();
    let (status, patched) = send(
        &app,
        "PATCH",
        &format!("/api/trades/{}", id),
        Some(json!({ "amount": 3, "date": "2001-01-01T00:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{patched}");
    assert_eq!(patched["amount"], 3);
    assert_eq!(patched["date"], stamped.as_str());
    assert_eq!(patched["location"], "Counter");
}

#[tokio::test]
async fn test_package_keeps_wire_names() {
    let app = setup_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/packages",
        Some(json!({
            "package_type": "Valve bag",
            "package_desc": "Resealable",
            "package_volumn": 250,
            "package_avarage_weight": "15g"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["package_volumn"], 250);
    assert_eq!(body["package_avarage_weight"], "15g");
    assert_eq!(body["package_price"], Value::Null);
    assert_eq!(body["image"], Value::Null);
}

#[tokio::test]
async fn test_delivery_requires_customer() {
    let app = setup_test_app().await;
    let payload = json!({
        "date": "2024-05-01",
        "during": "2024-05-01T10:00:00+02:00"
    });

    let (status, body) = send(&app, "POST", "/api/deliveries", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["user_id"], json!(["This field is required."]));

    let (_, customer) = send(&app, "POST", "/api/customers", Some(customer_payload("ada@example.com"))).await;
    let mut payload = payload;
    payload["user_id"] = customer["id"].clone();

    let (status, delivery) = send(&app, "POST", "/api/deliveries", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "{delivery}");
    assert_eq!(delivery["during"], "2024-05-01T08:00:00Z");
    assert_eq!(delivery["product_id"], json!([]));
    assert_eq!(delivery["package_id"], json!([]));
}

#[tokio::test]
async fn test_missing_rows_return_not_found() {
    let app = setup_test_app().await;

    let (status, body) = send(&app, "PUT", "/api/stores/999", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not found." }));

    let (status, _) = send(&app, "PATCH", "/api/reviews/999", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/discounts/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_integer_ids_return_not_found() {
    let app = setup_test_app().await;
    create_store(&app).await;

    for uri in ["/api/stores/abc", "/api/stores/99999999999", "/api/stores/1.5"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "detail": "Not found." }));
    }

    let (status, body) = send(&app, "PUT", "/api/stores/abc", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not found." }));

    let (status, _) = send(&app, "DELETE", "/api/customers/-", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The store created above is untouched
    let (status, _) = send(&app, "GET", "/api/stores/1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_deleting_store_cascades() {
    let app = setup_test_app().await;
    let store = create_store(&app).await;

    let (_, product) = send(&app, "POST", "/api/products", Some(product_payload(Some(store), json!([])))).await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/reviews",
        Some(json!({ "comments": "Lovely", "store_id": store, "product_id": product["id"] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "DELETE", &format!("/api/stores/{}", store), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, products) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(products, json!([]));
    let (_, reviews) = send(&app, "GET", "/api/reviews", None).await;
    assert_eq!(reviews, json!([]));
}

#[tokio::test]
async fn test_lists_are_ordered_by_id() {
    let app = setup_test_app().await;
    for name in ["Espresso", "Filter", "Decaf"] {
        create_category(&app, name).await;
    }

    let (status, list) = send(&app, "GET", "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(list[2]["category"], "Decaf");
}
