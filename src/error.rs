use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Failures of the HTML page routes. The contact relay has its own JSON
/// error type in [`crate::routes::contact`].
#[derive(Error, Debug)]
pub enum AppError {
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

#[derive(Template)]
#[template(path = "pages/error.html")]
struct ErrorPageTemplate {
    status_code: u16,
    message: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Template(err) = &self;
        tracing::error!(error = %err, "failed to render page");

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let template = ErrorPageTemplate {
            status_code: status.as_u16(),
            message: "Ocurrió un error. Intentá nuevamente más tarde.",
        };

        match template.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(render_err) => {
                tracing::error!(error = %render_err, "failed to render error page");
                (status, "Ocurrió un error.").into_response()
            }
        }
    }
}
