//! HTTP routes for the sign-up relay

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, routing::{get, post}, Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::relay::{Dispatcher, RelayError, SubscribeRequest};

#[derive(Clone)]
pub struct RelayState { pub dispatcher: Arc<Dispatcher>, pub app_name: String }

impl RelayState {
    pub fn new(dispatcher: Dispatcher, app_name: impl Into<String>) -> Self {
        Self { dispatcher: Arc::new(dispatcher), app_name: app_name.into() }
    }
}

pub fn create_router(dispatcher: Dispatcher) -> Router { create_router_with_name(dispatcher, "folio-relay") }

pub fn create_router_with_name(dispatcher: Dispatcher, app_name: &str) -> Router {
    Router::new()
        .route("/", post(subscribe).fallback(method_not_allowed))
        .route("/health", get(health))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(RelayState::new(dispatcher, app_name))
}

async fn health(State(s): State<RelayState>) -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok", "service": s.app_name}))
}

async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

async fn subscribe(State(s): State<RelayState>, body: Bytes) -> (StatusCode, String) {
    let result = match SubscribeRequest::parse(&body) {
        Ok(req) => match req.email() {
            Ok(email) => s.dispatcher.dispatch(email).await,
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => (StatusCode::OK, "Subscribed".into()),
        Err(e) => error_response(e),
    }
}

fn error_response(err: RelayError) -> (StatusCode, String) {
    match err {
        RelayError::MissingEmail => (StatusCode::BAD_REQUEST, "Bad Request".into()),
        RelayError::Upstream(text) => (StatusCode::INTERNAL_SERVER_ERROR, format!("GitHub error: {}", text)),
        RelayError::Malformed(e) => {
            tracing::debug!(error = %e, "rejecting malformed body");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".into())
        }
        RelayError::Transport(e) => {
            tracing::error!(error = %e, "dispatch transport failure");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error".into())
        }
    }
}
