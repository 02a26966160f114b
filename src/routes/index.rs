use askama::Template;
use axum::response::{Html, IntoResponse};

use crate::error::AppError;

#[derive(Template)]
#[template(path = "pages/index.html")]
struct IndexTemplate;

/// GET / - landing page: hero, services, pricing and the contact form.
pub async fn page() -> Result<impl IntoResponse, AppError> {
    Ok(Html(IndexTemplate.render()?))
}
