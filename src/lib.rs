pub mod config;
pub mod email;
pub mod error;
pub mod observability;
pub mod routes;

pub use routes::AppState;

/// Create the app router from a loaded configuration.
///
/// Also the entry point for integration tests, which build a router without
/// binding a listener.
pub fn create_app(config: config::Config) -> axum::Router {
    let email = email::EmailClient::new(&config.email);
    routes::router(AppState { email })
}
