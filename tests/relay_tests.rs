//! Relay Tests: router against a local mock of the dispatch API
//!
//! These tests verify:
//! 1. A 204 upstream maps to 200 "Subscribed"
//! 2. Upstream rejections surface as 500 "GitHub error: <body>"
//! 3. Missing or malformed bodies are refused before any upstream call
//! 4. The dispatch carries bearer auth, the vnd.github Accept header and the event payload

use axum::body::{to_bytes, Body};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::routing::post;
use axum::Router;
use folio::relay::DispatchEvent;
use folio::relay::config::{vars, DEFAULT_PORT};
use folio::{create_router, create_router_with_name, Dispatcher, RelayConfig};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const TOKEN: &str = "test-token";

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner())
}

/// What the mock upstream saw
#[derive(Debug, Clone)]
struct Recorded {
    owner: String,
    repo: String,
    authorization: Option<String>,
    accept: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct Upstream {
    status: StatusCode,
    reply: &'static str,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

async fn record(
    State(up): State<Upstream>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, &'static str) {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    up.seen.lock().unwrap().push(Recorded {
        owner,
        repo,
        authorization: header("authorization"),
        accept: header("accept"),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    (up.status, up.reply)
}

/// Spawn a mock dispatch API on an ephemeral port
async fn spawn_upstream(status: StatusCode, reply: &'static str) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/repos/:owner/:repo/dispatches", post(record))
        .with_state(Upstream { status, reply, seen: seen.clone() });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), seen)
}

fn relay(api_base: &str) -> Router {
    let config = RelayConfig::new(TOKEN)
        .with_owner("octo")
        .with_repo("site")
        .with_api_base(api_base);
    create_router(Dispatcher::new(config).unwrap())
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

/// Test: accepted dispatch is reported as subscribed
#[tokio::test]
async fn subscribe_success() {
    let (base, seen) = spawn_upstream(StatusCode::NO_CONTENT, "").await;

    let (status, body) = send(relay(&base), post_json(r#"{"email":"ada@example.com"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Subscribed");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let call = &seen[0];
    assert_eq!(call.owner, "octo");
    assert_eq!(call.repo, "site");
    assert_eq!(call.authorization.as_deref(), Some("Bearer test-token"));
    assert_eq!(call.accept.as_deref(), Some("application/vnd.github+json"));
    assert_eq!(call.body, json!({
        "event_type": "collect_email",
        "client_payload": {"email": "ada@example.com"}
    }));
}

/// Test: upstream rejection text is passed through
#[tokio::test]
async fn upstream_rejection() {
    let (base, seen) = spawn_upstream(StatusCode::UNPROCESSABLE_ENTITY, "Validation Failed").await;

    let (status, body) = send(relay(&base), post_json(r#"{"email":"ada@example.com"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "GitHub error: Validation Failed");
    assert_eq!(seen.lock().unwrap().len(), 1);
}

/// Test: a 200 from upstream is still not a success; only 204 counts
#[tokio::test]
async fn only_no_content_counts_as_success() {
    let (base, _) = spawn_upstream(StatusCode::OK, "ok?").await;

    let (status, body) = send(relay(&base), post_json(r#"{"email":"ada@example.com"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "GitHub error: ok?");
}

/// Test: missing, empty or non-string email is a client error and never dispatched
#[tokio::test]
async fn missing_email_is_bad_request() {
    let (base, seen) = spawn_upstream(StatusCode::NO_CONTENT, "").await;

    for body in [r#"{}"#, r#"{"email":""}"#, r#"{"email":null}"#, r#"{"email":7}"#, r#"{"name":"x"}"#] {
        let (status, text) = send(relay(&base), post_json(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(text, "Bad Request");
    }
    assert!(seen.lock().unwrap().is_empty());
}

/// Test: unparseable JSON or a null body is a server error
#[tokio::test]
async fn malformed_body_is_server_error() {
    let (base, seen) = spawn_upstream(StatusCode::NO_CONTENT, "").await;

    for body in ["{not json", "null"] {
        let (status, text) = send(relay(&base), post_json(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body {}", body);
        assert_eq!(text, "Server error");
    }
    assert!(seen.lock().unwrap().is_empty());
}

/// Test: valid JSON that is not an object carries no email
#[tokio::test]
async fn non_object_body_is_bad_request() {
    let (base, seen) = spawn_upstream(StatusCode::NO_CONTENT, "").await;

    for body in [r#""just text""#, "[]", "5", "true", r#"["ada@example.com"]"#] {
        let (status, text) = send(relay(&base), post_json(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(text, "Bad Request");
    }
    assert!(seen.lock().unwrap().is_empty());
}

/// Test: unreachable upstream is a server error
#[tokio::test]
async fn unreachable_upstream_is_server_error() {
    // Bind then drop to get a port nobody is listening on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, text) = send(relay(&format!("http://{}", addr)), post_json(r#"{"email":"a@b.io"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(text, "Server error");
}

/// Test: any method other than POST on the root is refused
#[tokio::test]
async fn non_post_is_method_not_allowed() {
    let (base, seen) = spawn_upstream(StatusCode::NO_CONTENT, "").await;

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let req = Request::builder().method(method.clone()).uri("/").body(Body::empty()).unwrap();
        let (status, text) = send(relay(&base), req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{}", method);
        assert_eq!(text, "Method Not Allowed");
    }
    assert!(seen.lock().unwrap().is_empty());
}

/// Test: health reports the service name
#[tokio::test]
async fn health_check() {
    let config = RelayConfig::new(TOKEN);
    let router = create_router_with_name(Dispatcher::new(config).unwrap(), "relay-under-test");

    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, text) = send(router, req).await;
    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, json!({"status": "ok", "service": "relay-under-test"}));
}

/// Test: cross-origin preflight from the static site is allowed
#[tokio::test]
async fn cors_preflight_allowed() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/")
        .header("origin", "https://riteshsingh84.github.io")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();
    let resp = relay("http://127.0.0.1:9").oneshot(req).await.unwrap();
    assert!(resp.status().is_success());
    assert_eq!(resp.headers().get("access-control-allow-origin").unwrap(), "*");
}

/// Test: the dispatcher can be driven directly, as the CLI does
#[tokio::test]
async fn direct_dispatch() {
    let (base, seen) = spawn_upstream(StatusCode::NO_CONTENT, "").await;
    let dispatcher = Dispatcher::new(RelayConfig::new(TOKEN).with_api_base(format!("{}/", base))).unwrap();

    dispatcher.dispatch("grace@example.com").await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].repo, folio::relay::config::DEFAULT_REPO);
    let event: DispatchEvent = serde_json::from_value(seen[0].body.clone()).unwrap();
    assert_eq!(event, DispatchEvent::new("collect_email", "grace@example.com"));
}

/// Test: configuration is read from the environment
#[test]
fn config_from_env() {
    let _guard = lock_env();
    std::env::set_var(vars::TOKEN, "env-token");
    std::env::set_var(vars::OWNER, "env-owner");
    std::env::set_var(vars::REPO, "env-repo");
    std::env::set_var(vars::PORT, "not-a-port");
    std::env::remove_var(vars::API_BASE);

    let config = RelayConfig::from_env();
    assert_eq!(config.token, "env-token");
    assert_eq!(config.owner, "env-owner");
    assert_eq!(config.repo, "env-repo");
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.dispatch_url(), "https://api.github.com/repos/env-owner/env-repo/dispatches");

    std::env::set_var(vars::PORT, "9100");
    assert_eq!(RelayConfig::from_env().port, 9100);

    for var in [vars::TOKEN, vars::OWNER, vars::REPO, vars::PORT] {
        std::env::remove_var(var);
    }
}
