use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tower::ServiceExt;
use users_api::{app_router, AppError, AppState, User, UserInput, UserStore};

/// Counts every call and fails all of them.
#[derive(Clone, Default)]
struct FailingStore {
    calls: Arc<AtomicUsize>,
}

impl FailingStore {
    fn fail(&self) -> AppError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        AppError::Db(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl UserStore for FailingStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        Err(self.fail())
    }
    async fn get(&self, _id: i32) -> Result<Option<User>, AppError> {
        Err(self.fail())
    }
    async fn create(&self, _input: &UserInput) -> Result<User, AppError> {
        Err(self.fail())
    }
    async fn update(&self, _id: i32, _input: &UserInput) -> Result<u64, AppError> {
        Err(self.fail())
    }
    async fn delete(&self, _id: i32) -> Result<u64, AppError> {
        Err(self.fail())
    }
    async fn ping(&self) -> Result<(), AppError> {
        Err(self.fail())
    }
}

fn failing_app() -> (Router, Arc<AtomicUsize>) {
    let store = FailingStore::default();
    let calls = store.calls.clone();
    (app_router(AppState::new(store), "/api/go", 64), calls)
}

fn assert_cors(headers: &axum::http::HeaderMap) {
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
        "Content-Type, Authorization"
    );
}

#[tokio::test]
async fn preflight_short_circuits_without_touching_storage() {
    let (app, calls) = failing_app();
    for path in ["/api/go/users", "/api/go/users/1", "/anything/at/all"] {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri(path)
                    .header("access-control-request-method", "DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_cors(resp.headers());
        assert!(resp.headers().get(header::CONTENT_TYPE).is_none());
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn storage_failure_is_500_and_keeps_serving() {
    let (app, calls) = failing_app();
    for _ in 0..2 {
        let resp = app
            .clone()
            .oneshot(Request::builder().uri("/api/go/users").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(resp.headers());
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(v["error"]["code"], "database_error");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn delete_failure_is_500_not_404() {
    let (app, _) = failing_app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/go/users/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn every_response_is_json_with_cors() {
    let app = app_router(AppState::new(users_api::MemoryUserStore::new()), "/api/go", 1024);
    for path in ["/api/go/users", "/api/go/users/9", "/health", "/version"] {
        let resp = app
            .clone()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_cors(resp.headers());
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
    }
}

#[tokio::test]
async fn readiness_reflects_store() {
    let ok = app_router(AppState::new(users_api::MemoryUserStore::new()), "/api/go", 1024);
    let resp = ok
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (failing, _) = failing_app();
    let resp = failing
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["database"], "unavailable");
}

#[tokio::test]
async fn oversized_body_is_413() {
    let (app, calls) = failing_app();
    let payload = format!(r#"{{"name":"{}","email":"a@x.com"}}"#, "a".repeat(256));
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/go/users")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::CONTENT_LENGTH, payload.len())
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["error"]["code"], "payload_too_large");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn oversized_body_without_length_header_gets_same_envelope() {
    let (app, calls) = failing_app();
    let payload = format!(r#"{{"name":"{}","email":"a@x.com"}}"#, "a".repeat(256));
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/go/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["error"]["code"], "payload_too_large");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_utf8_id_is_400_envelope() {
    let (app, calls) = failing_app();
    let resp = app
        .oneshot(Request::builder().uri("/api/go/users/%FF").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_cors(resp.headers());
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["error"]["code"], "bad_request");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
