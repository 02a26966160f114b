//! Shared setup for the integration suites: test configuration, a router
//! factory and an in-process stand-in for the email provider.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use http_body_util::BodyExt;
use mandados::config::{Config, EmailConfig, ObservabilityConfig, ServerConfig};
use serde_json::Value;
use tower::ServiceExt;

pub fn test_config(api_key: &str, provider_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        email: EmailConfig {
            api_key: api_key.to_string(),
            api_base_url: provider_url.to_string(),
            from_address: "Mandados <web@mandados.cr>".to_string(),
            to_address: "pedidos@mandados.cr".to_string(),
        },
        observability: ObservabilityConfig::default(),
    }
}

pub fn test_app(api_key: &str, provider_url: &str) -> Router {
    mandados::create_app(test_config(api_key, provider_url))
}

/// The application bound on a local listener, so tests can drive it with a
/// real HTTP client instead of `oneshot`.
pub struct AppServer {
    pub url: String,
}

pub async fn spawn_app(api_key: &str, provider_url: &str) -> AppServer {
    let app = test_app(api_key, provider_url);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind app");
    let addr = listener.local_addr().expect("app addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("app serve");
    });

    AppServer {
        url: format!("http://{addr}"),
    }
}

#[derive(Clone)]
struct ProviderState {
    requests: Arc<Mutex<Vec<Value>>>,
    status: StatusCode,
    body: &'static str,
}

async fn provider_emails(
    State(state): State<ProviderState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state
        .requests
        .lock()
        .expect("provider request log poisoned")
        .push(body);
    (state.status, state.body.to_owned())
}

/// An in-process email provider capturing every request it receives, so
/// tests can assert on dispatched notifications, including that none
/// happened.
pub struct FakeProvider {
    pub url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl FakeProvider {
    pub fn requests(&self) -> Vec<Value> {
        self.requests
            .lock()
            .expect("provider request log poisoned")
            .clone()
    }
}

pub async fn spawn_provider(status: StatusCode, body: &'static str) -> FakeProvider {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = ProviderState {
        requests: requests.clone(),
        status,
        body,
    };
    let app = Router::new()
        .route("/emails", post(provider_emails))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake provider");
    let addr = listener.local_addr().expect("fake provider addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake provider serve");
    });

    FakeProvider {
        url: format!("http://{addr}"),
        requests,
    }
}

pub async fn spawn_accepting_provider() -> FakeProvider {
    spawn_provider(StatusCode::OK, r#"{"id":"msg_1"}"#).await
}

/// POSTs a JSON body to /api/contact and returns status plus parsed body.
pub async fn post_contact(router: &Router, body: &Value) -> (StatusCode, Value) {
    post_contact_raw(router, body.to_string()).await
}

pub async fn post_contact_raw(router: &Router, body: String) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/contact")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn valid_submission() -> Value {
    serde_json::json!({
        "name": "John Doe",
        "email": "john@example.com",
        "phone": "+50612345678",
        "message": "Test message",
        "honeypot": "",
    })
}
