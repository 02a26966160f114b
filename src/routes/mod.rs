use askama::Template;
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

mod assets;
pub mod contact;
mod health;
mod index;

use crate::email::EmailClient;

#[derive(Clone)]
pub struct AppState {
    pub email: EmailClient,
}

#[derive(Template)]
#[template(path = "pages/not_found.html")]
struct NotFoundTemplate;

async fn fallback() -> impl IntoResponse {
    match NotFoundTemplate.render() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render 404 page");
            (StatusCode::NOT_FOUND, "No encontrado").into_response()
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index::page))
        .route("/health", get(health::health))
        .route("/api/contact", post(contact::submit))
        .route("/static/{*path}", get(assets::serve))
        .fallback(fallback)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
