use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use quotebook_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

// ─────────────────────────────────────────────────────────────────────────────
// Mock remote endpoint
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct MockRemote {
    posts: Mutex<Vec<Value>>,
    pushed: Mutex<Vec<Value>>,
    fail: AtomicBool,
}

async fn list_posts(State(remote): State<Arc<MockRemote>>) -> Response {
    if remote.fail.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "unavailable").into_response();
    }
    Json(remote.posts.lock().unwrap().clone()).into_response()
}

async fn create_post(State(remote): State<Arc<MockRemote>>, Json(body): Json<Value>) -> Response {
    if remote.fail.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "unavailable").into_response();
    }
    remote.pushed.lock().unwrap().push(body);
    (StatusCode::CREATED, Json(json!({ "id": 101 }))).into_response()
}

async fn spawn_mock_remote(posts: Vec<Value>) -> (String, Arc<MockRemote>) {
    let remote = Arc::new(MockRemote {
        posts: Mutex::new(posts),
        ..Default::default()
    });
    let router = Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .with_state(remote.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}", addr), remote)
}

fn post(user_id: i64, id: i64, title: &str) -> Value {
    json!({ "userId": user_id, "id": id, "title": title, "body": "lorem ipsum" })
}

// ─────────────────────────────────────────────────────────────────────────────
// Harness
// ─────────────────────────────────────────────────────────────────────────────

struct TestApp {
    router: Router,
    remote: Arc<MockRemote>,
    _tmp: TempDir,
}

async fn build_test_app(posts: Vec<Value>) -> TestApp {
    let (remote_url, remote) = spawn_mock_remote(posts).await;
    let tmp = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(10),
        remote_url,
        remote_timeout: Duration::from_secs(5),
        sync_interval: None,
    };
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config).unwrap(),
        remote,
        _tmp: tmp,
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn raw_post(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

fn texts(quotes: &Value) -> Vec<String> {
    quotes
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["text"].as_str().unwrap().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn healthz_responds() {
    let app = build_test_app(vec![]).await;
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn fresh_store_is_seeded_with_defaults() {
    let app = build_test_app(vec![]).await;

    let (status, quotes) = app.get("/api/v1/quotes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quotes.as_array().unwrap().len(), 5);

    let (_, categories) = app.get("/api/v1/quotes/categories").await;
    assert_eq!(
        categories,
        json!(["Inspiration", "Life", "Happiness", "Motivation"])
    );

    let (_, preference) = app.get("/api/v1/preferences/category").await;
    assert_eq!(preference, json!({ "category": "all" }));
}

#[tokio::test]
async fn add_quote_validates_and_appends() {
    let app = build_test_app(vec![]).await;

    let (status, created) = app
        .send(
            Method::POST,
            "/api/v1/quotes",
            Some(json!({ "text": "Be here now", "category": "Mindfulness" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["source"], "local");

    let (status, error) = app
        .send(
            Method::POST,
            "/api/v1/quotes",
            Some(json!({ "text": "   ", "category": "Mindfulness" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], 400);

    let (_, quotes) = app.get("/api/v1/quotes").await;
    let texts = texts(&quotes);
    assert_eq!(texts.len(), 6);
    assert_eq!(texts.last().map(String::as_str), Some("Be here now"));

    let (_, session) = app.get("/api/v1/session").await;
    assert_eq!(session["lastViewedQuote"]["text"], "Be here now");
    assert!(session["lastUpdated"].is_string());
}

#[tokio::test]
async fn random_quote_honours_category_and_preference() {
    let app = build_test_app(vec![]).await;

    let (_, body) = app.get("/api/v1/quotes/random?category=Nope").await;
    assert_eq!(body, json!({ "quote": null }));

    let (status, _) = app
        .send(
            Method::PUT,
            "/api/v1/preferences/category",
            Some(json!({ "category": "Life" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    for _ in 0..10 {
        let (_, body) = app.get("/api/v1/quotes/random").await;
        assert_eq!(body["quote"]["category"], "Life");
    }

    let (_, session) = app.get("/api/v1/session").await;
    assert_eq!(session["lastViewedQuote"]["category"], "Life");
}

#[tokio::test]
async fn export_and_import_round_trip() {
    let app = build_test_app(vec![]).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/quotes/export")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"quotes.json\""
    );
    let exported = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let exported = String::from_utf8(exported.to_vec()).unwrap();

    let (status, body) = app.raw_post("/api/v1/quotes/import", &exported).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "imported": 5 }));

    let (_, quotes) = app.get("/api/v1/quotes").await;
    assert_eq!(quotes.as_array().unwrap().len(), 10);
    assert!(quotes
        .as_array()
        .unwrap()
        .iter()
        .skip(5)
        .all(|q| q["source"] == "local"));

    let (status, body) = app
        .raw_post("/api/v1/quotes/import", r#"{"text":"x","category":"y"}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn sync_merges_remote_and_pushes_pending() {
    let posts = (1..=6).map(|i| post(i, i, &format!("remote {}", i))).collect();
    let app = build_test_app(posts).await;
    app.send(
        Method::POST,
        "/api/v1/quotes",
        Some(json!({ "text": "Mine", "category": "Life" })),
    )
    .await;

    let (status, outcome) = app.send(Method::POST, "/api/v1/sync", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        outcome,
        json!({ "status": "updated", "fetched": 5, "pushed": 6, "total": 11 })
    );

    let pushed = app.remote.pushed.lock().unwrap().clone();
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0]["quotes"].as_array().unwrap().len(), 6);
    assert!(pushed[0]["timestamp"].is_string());

    let (_, quotes) = app.get("/api/v1/quotes").await;
    let texts = texts(&quotes);
    assert_eq!(texts[0], "remote 1");
    assert_eq!(texts[4], "remote 5");
    assert_eq!(texts.last().map(String::as_str), Some("Mine"));
    assert_eq!(quotes[0]["category"], "Server-1");
    assert_eq!(quotes[0]["source"], "server");

    let (_, status) = app.get("/api/v1/sync/status").await;
    assert_eq!(status["phase"], "idle");
    assert_eq!(status["pendingChanges"], false);
    assert!(status["lastSyncTime"].is_string());
    assert_eq!(status["lastOutcome"]["status"], "updated");

    let (_, outcome) = app.send(Method::POST, "/api/v1/sync", None).await;
    assert_eq!(
        outcome,
        json!({ "status": "unchanged", "fetched": 5, "pushed": 0 })
    );
}

#[tokio::test]
async fn remote_failure_is_bad_gateway_and_leaves_store_untouched() {
    let app = build_test_app(vec![post(1, 1, "remote")]).await;
    app.remote.fail.store(true, Ordering::SeqCst);
    let (_, before) = app.get("/api/v1/quotes").await;

    let (status, body) = app.send(Method::POST, "/api/v1/sync", None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 502);

    let (_, after) = app.get("/api/v1/quotes").await;
    assert_eq!(before, after);

    let (_, status) = app.get("/api/v1/sync/status").await;
    assert_eq!(status["lastOutcome"]["status"], "failed");
    assert!(status["lastError"].is_string());
    assert!(status["lastSyncTime"].is_null());
}
