//! Drives the http surface end to end against a private in-memory database.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use database::{DatabaseConnectionInfo, SqliteDatabase};
use serde_json::{json, Value};
use tower::ServiceExt;
use web::{router, WebState};

async fn test_state() -> WebState {
    let database = SqliteDatabase::connect(DatabaseConnectionInfo::in_memory())
        .await
        .unwrap();
    WebState::new(database)
}

fn device_data() -> Value {
    json!({
        "device_uuid": "DEVX000001",
        "localisation": {
            "latitude": 35.6582,
            "longitude": 139.8752
        },
        "deployment_date": "2024-03-14",
        "owner": "owner@example.com"
    })
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let req = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(body) => req
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn device_lifecycle() {
    let router = router(test_state().await);

    let (status, body) = send(&router, "POST", "/devices/", Some(device_data())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, device_data());

    let (status, body) = send(&router, "GET", "/devices/DEVX000001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, device_data());

    let mut updated = device_data();
    updated["owner"] = json!("updated_owner@example.com");
    let (status, body) = send(&router, "PUT", "/devices/", Some(updated.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, updated);

    let (status, body) = send(&router, "GET", "/devices/DEVX000001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["owner"], json!("updated_owner@example.com"));
    assert_eq!(body["device_uuid"], json!("DEVX000001"));

    let (status, body) = send(&router, "DELETE", "/devices/DEVX000001", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Device successfully deleted" }));

    let (status, body) = send(&router, "DELETE", "/devices/DEVX000001", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Device not found" }));
}

#[tokio::test]
async fn duplicate_create_conflicts() {
    let router = router(test_state().await);
    send(&router, "POST", "/devices/", Some(device_data())).await;

    let mut duplicate = device_data();
    duplicate["owner"] = json!("intruder@example.com");
    duplicate["localisation"] = json!({ "latitude": 1.0, "longitude": 2.0 });
    let (status, body) = send(&router, "POST", "/devices/", Some(duplicate)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "message": "Device already exists" }));

    let (_, body) = send(&router, "GET", "/devices/DEVX000001", None).await;
    assert_eq!(body, device_data());
}

#[tokio::test]
async fn read_unknown_device() {
    let router = router(test_state().await);

    let (status, body) = send(&router, "GET", "/devices/DEVX000002", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Device not found" }));
}

#[tokio::test]
async fn update_unknown_device() {
    let router = router(test_state().await);

    let mut unknown = device_data();
    unknown["device_uuid"] = json!("DEVX000002");
    let (status, body) = send(&router, "PUT", "/devices/", Some(unknown)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Device not found" }));
}

#[tokio::test]
async fn update_reuses_existing_coordinate() {
    let state = test_state().await;
    let router = router(state.clone());

    send(&router, "POST", "/devices/", Some(device_data())).await;
    let mut other = device_data();
    other["device_uuid"] = json!("DEVY000001");
    other["localisation"] = json!({ "latitude": -33.8568, "longitude": 151.2153 });
    send(&router, "POST", "/devices/", Some(other)).await;
    assert_eq!(state.device_client.count_coordinates().await.unwrap(), 2);

    let mut moved = device_data();
    moved["localisation"] = json!({ "latitude": -33.8568, "longitude": 151.2153 });
    moved["deployment_date"] = json!("2025-06-01");
    let (status, body) = send(&router, "PUT", "/devices/", Some(moved.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, moved);
    assert_eq!(state.device_client.count_coordinates().await.unwrap(), 2);

    let (_, body) = send(&router, "GET", "/devices/DEVX000001", None).await;
    assert_eq!(body, moved);
}

#[tokio::test]
async fn routes_without_trailing_slash() {
    let router = router(test_state().await);

    let (status, _) = send(&router, "POST", "/devices", Some(device_data())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&router, "PUT", "/devices", Some(device_data())).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_path_uuid_is_a_validation_error() {
    let router = router(test_state().await);

    for uri in ["/devices/DEVX00001", "/devices/devx000001", "/devices/ABCD123456"] {
        let (status, body) = send(&router, "GET", uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert_eq!(body["message"], json!("Validation error"));

        let (status, _) = send(&router, "DELETE", uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
}

#[tokio::test]
async fn invalid_bodies_are_rejected_before_the_store() {
    let state = test_state().await;
    let router = router(state.clone());

    let mut latitude = device_data();
    latitude["localisation"]["latitude"] = json!(91.0);
    let (status, body) = send(&router, "POST", "/devices/", Some(latitude)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detailedInformation"]
        .as_str()
        .unwrap()
        .starts_with("Latitude must be between -90 and 90 degrees"));

    let mut longitude = device_data();
    longitude["localisation"]["longitude"] = json!(-180.5);
    let (status, _) = send(&router, "PUT", "/devices/", Some(longitude)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut owner = device_data();
    owner["owner"] = json!("not an email");
    let (status, _) = send(&router, "POST", "/devices/", Some(owner)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut uuid = device_data();
    uuid["device_uuid"] = json!("DEVX0001");
    let (status, body) = send(&router, "POST", "/devices/", Some(uuid)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], json!("Validation error"));

    let (status, _) = send(
        &router,
        "POST",
        "/devices/",
        Some(json!({ "device_uuid": "DEVX000002", "owner": "owner@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(state.device_client.count_coordinates().await.unwrap(), 0);
}

#[tokio::test]
async fn ping_schema_and_unknown_routes() {
    let router = router(test_state().await);

    let (status, body) = send(&router, "GET", "/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "pong!" }));

    let (status, body) = send(&router, "GET", "/devices/schema", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["properties"]["device_uuid"].is_object());

    let (status, body) = send(&router, "GET", "/sensors/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["requestedUri"], json!("/sensors/1"));
    assert_eq!(body["httpMethod"], json!("GET"));
}
