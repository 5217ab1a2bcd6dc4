use confstore_kernel::{ConfigStore, Record};
use confstore_node::server::{build_router, shared, SharedStore};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt; // for oneshot

fn app_with(store: ConfigStore) -> (Router, SharedStore) {
    let state = shared(store);
    (build_router(state.clone(), Duration::from_secs(5)), state)
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_seeded() {
    let (app, _) = app_with(ConfigStore::seeded().unwrap());

    let response = app.oneshot(request("GET", "/configs", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(response).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["datacenter-1", "datacenter-2", "burger-nutrition"]);
}

#[tokio::test]
async fn test_get_found_and_missing() {
    let (app, _) = app_with(ConfigStore::seeded().unwrap());

    let response = app.clone().oneshot(request("GET", "/configs/datacenter-2", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let rec = body_json(response).await;
    assert_eq!(rec["metadata"]["limits"]["cpu"]["value"], "260m");

    let response = app.oneshot(request("GET", "/configs/nope", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let err = body_json(response).await;
    assert!(err["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_create_and_conflict() {
    let (app, state) = app_with(ConfigStore::new());
    let body = json!({"name": "dc-1", "metadata": {"limits": {"cpu": {"value": "250m"}}}});

    let response = app.clone().oneshot(request("POST", "/configs", Some(body.clone()))).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await, body);

    let response = app.oneshot(request("POST", "/configs", Some(body))).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    assert_eq!(state.read().await.len(), 1);
}

#[tokio::test]
async fn test_create_validation() {
    let (app, state) = app_with(ConfigStore::new());

    let response = app
        .clone()
        .oneshot(request("POST", "/configs", Some(json!({"name": "dc-1"}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Config name or metadata not specified"
    );

    let bad = Request::builder()
        .method("POST")
        .uri("/configs")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(bad).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Unable to unmarshal json");

    assert!(state.read().await.is_empty());
}

#[tokio::test]
async fn test_put_replaces_wholesale() {
    let (app, state) = app_with(ConfigStore::seeded().unwrap());

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/configs/datacenter-1",
            Some(json!({"metadata": {"region": "eu"}})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let store = state.read().await;
    let rec = store.get("datacenter-1").unwrap();
    assert_eq!(rec, &Record::from_json("datacenter-1", json!({"region": "eu"})));
    drop(store);

    let response = app
        .oneshot(request("PUT", "/configs/ghost", Some(json!({"metadata": {}}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_name_mismatch() {
    let (app, _) = app_with(ConfigStore::seeded().unwrap());

    let response = app
        .oneshot(request(
            "PUT",
            "/configs/datacenter-1",
            Some(json!({"name": "datacenter-2", "metadata": {}})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "URI name and config name are different"
    );
}

#[tokio::test]
async fn test_patch_merges() {
    let (app, _) = app_with(ConfigStore::seeded().unwrap());

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            "/configs/datacenter-1",
            Some(json!({"metadata": {"limits": {"cpu": {"value": "500m"}}, "owner": "ops"}})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let rec = body_json(response).await;
    assert_eq!(rec["metadata"]["limits"]["cpu"]["value"], "500m");
    assert_eq!(rec["metadata"]["limits"]["cpu"]["enabled"], "true");
    assert_eq!(rec["metadata"]["monitoring"]["enabled"], "true");
    assert_eq!(rec["metadata"]["owner"], "ops");

    let response = app
        .oneshot(request("PATCH", "/configs/ghost", Some(json!({"metadata": {"a": 1}}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_requires_metadata() {
    let (app, _) = app_with(ConfigStore::seeded().unwrap());

    let response = app
        .oneshot(request("PATCH", "/configs/datacenter-1", Some(json!({"name": "datacenter-1"}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Config metadata not specified");
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (app, state) = app_with(ConfigStore::seeded().unwrap());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(request("DELETE", "/configs/datacenter-1", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let store = state.read().await;
    assert_eq!(store.len(), 2);
    assert!(!store.contains("datacenter-1"));
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app_with(ConfigStore::new());

    let response = app.oneshot(request("GET", "/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"message": "ok"}));
}

#[tokio::test]
async fn test_stalled_request_times_out() {
    let state = shared(ConfigStore::new());
    let app = build_router(state.clone(), Duration::from_millis(50));

    // Body that never finishes arriving.
    let stalled = futures::stream::pending::<Result<axum::body::Bytes, std::io::Error>>();
    let req = Request::builder()
        .method("POST")
        .uri("/configs")
        .header("content-type", "application/json")
        .body(Body::from_stream(stalled))
        .unwrap();

    let response = tokio::time::timeout(Duration::from_secs(5), app.oneshot(req))
        .await
        .expect("timeout layer did not answer")
        .unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert!(state.read().await.is_empty());
}

#[tokio::test]
async fn test_metrics_route_serves_text() {
    let (app, _) = app_with(ConfigStore::new());

    let response = app.oneshot(request("GET", "/metrics", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));

    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    assert!(!bytes.is_empty());
}
