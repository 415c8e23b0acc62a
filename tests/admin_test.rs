use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use coffee_app::auth::{create_jwt, decode_jwt, hash_password, verify_password};
use coffee_app::infrastructure::AppState;
use coffee_app::{db, seed, server};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::util::ServiceExt; // for `oneshot`

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
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
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

// Staff account plus the demo catalogue; returns the app and a valid token
async fn setup_admin_app() -> (Router, String) {
    let db = setup_test_db().await;
    seed::ensure_admin_user(&db, "barista", "espresso")
        .await
        .expect("Failed to create staff user");
    seed::seed_demo_data(&db).await.expect("Failed to seed");

    let app = server::build_router(AppState::new(db), &[]);
    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/login",
        None,
        Some(json!({ "username": "barista", "password": "espresso" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let token = body["token"].as_str().unwrap().to_string();
    (app, token)
}

#[tokio::test]
async fn test_password_hashing() {
    let hash = hash_password("espresso").expect("Failed to hash password");

    assert_ne!(hash, "espresso");
    assert!(verify_password("espresso", &hash).unwrap());
    assert!(!verify_password("decaf", &hash).unwrap());
}

#[tokio::test]
async fn test_jwt_creation_and_verification() {
    let token = create_jwt("barista", "admin").expect("Failed to create JWT");
    let claims = decode_jwt(&token).expect("Failed to verify JWT");
    assert_eq!(claims.sub, "barista");
    assert_eq!(claims.role, "admin");
}

#[tokio::test]
async fn test_admin_requires_token() {
    let db = setup_test_db().await;
    let app = server::build_router(AppState::new(db), &[]);

    let (status, _) = send(&app, "GET", "/api/admin", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/admin/customers", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "DELETE", "/api/admin/customers/1", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let db = setup_test_db().await;
    seed::ensure_admin_user(&db, "barista", "espresso").await.unwrap();
    // Running it again leaves the first account in place
    seed::ensure_admin_user(&db, "barista", "other").await.unwrap();
    let app = server::build_router(AppState::new(db), &[]);

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/login",
        None,
        Some(json!({ "username": "barista", "password": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/login",
        None,
        Some(json!({ "username": "nobody", "password": "espresso" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_index_lists_every_model() {
    let (app, token) = setup_admin_app().await;

    let (status, body) = send(&app, "GET", "/api/admin", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let models = body.as_array().unwrap();
    assert_eq!(models.len(), 14);

    let count_of = |resource: &str| {
        models
            .iter()
            .find(|m| m["resource"] == resource)
            .map(|m| m["count"].as_u64().unwrap())
    };
    assert_eq!(count_of("customers"), Some(1));
    assert_eq!(count_of("products"), Some(3));
    assert_eq!(count_of("stores"), Some(2));
    assert_eq!(count_of("deliveries"), Some(1));
    assert_eq!(count_of("action-types"), Some(0));
}

#[tokio::test]
async fn test_admin_changelist_uses_labels() {
    let (app, token) = setup_admin_app().await;

    let (status, body) = send(&app, "GET", "/api/admin/customers", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], "Customer");
    assert_eq!(body["objects"], json!([{ "id": 1, "label": "ada" }]));
    assert_eq!(body["fields"][4]["name"], "email");
    assert_eq!(body["fields"][4]["unique"], true);

    let (_, body) = send(&app, "GET", "/api/admin/products", Some(&token), None).await;
    assert_eq!(body["objects"][0]["label"], "Ethiopia Yirgacheffe,Floral, citrus");

    let (_, body) = send(&app, "GET", "/api/admin/ratings", Some(&token), None).await;
    assert_eq!(body["objects"][0]["label"], "5 4");

    let (_, body) = send(&app, "GET", "/api/admin/delivery-types", Some(&token), None).await;
    assert_eq!(body["objects"][0]["label"], "DeliveryType object (1)");

    let (status, _) = send(&app, "GET", "/api/admin/espresso-machines", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_change_view_and_delete() {
    let (app, token) = setup_admin_app().await;

    let (status, body) = send(&app, "GET", "/api/admin/stores/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "Downtown Roastery");
    assert_eq!(body["record"]["open_time"], "07:00:00");

    let (status, _) = send(&app, "DELETE", "/api/admin/stores/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/api/admin/stores/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Products of the deleted store went with it
    let (_, body) = send(&app, "GET", "/api/admin/products", Some(&token), None).await;
    assert_eq!(body["objects"], json!([]));
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = setup_test_db().await;
    seed::seed_demo_data(&db).await.unwrap();
    seed::seed_demo_data(&db).await.unwrap();

    let app = server::build_router(AppState::new(db), &[]);
    let token = create_jwt("barista", "admin").unwrap();
    let (_, body) = send(&app, "GET", "/api/admin/categories", Some(&token), None).await;
    assert_eq!(body["objects"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_login_with_incomplete_body_is_unauthorized() {
    let db = setup_test_db().await;
    seed::ensure_admin_user(&db, "barista", "espresso").await.unwrap();
    let app = server::build_router(AppState::new(db), &[]);

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/login",
        None,
        Some(json!({ "username": "barista" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid credentials");

    let (status, _) = send(&app, "POST", "/api/admin/login", None, Some(json!([]))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_rejects_non_integer_ids() {
    let (app, token) = setup_admin_app().await;

    for uri in ["/api/admin/stores/abc", "/api/admin/stores/99999999999"] {
        let (status, body) = send(&app, "GET", uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "detail": "Not found." }));
    }

    let (status, _) = send(&app, "DELETE", "/api/admin/stores/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_discount_label_joins_product_and_store() {
    let (app, token) = setup_admin_app().await;

    let (status, body) = send(&app, "GET", "/api/admin/discounts", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["objects"][0]["label"],
        "Ethiopia Yirgacheffe,Floral, citrusDowntown Roastery"
    );

    let (_, body) = send(&app, "GET", "/api/admin/discounts/1", Some(&token), None).await;
    assert_eq!(
        body["label"],
        "Ethiopia Yirgacheffe,Floral, citrusDowntown Roastery"
    );

    // Without a product the missing half reads "None"
    let (status, _) = send(
        &app,
        "PATCH",
        "/api/discounts/1",
        None,
        Some(json!({ "products_id": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", "/api/admin/discounts/1", Some(&token), None).await;
    assert_eq!(body["label"], "NoneDowntown Roastery");
}
