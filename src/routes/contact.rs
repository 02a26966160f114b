use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mandados_contact::{FieldErrors, SubmissionPayload, validate};
use serde_json::{Value, json};
use thiserror::Error;

use crate::email::EmailError;
use crate::routes::AppState;

/// Rejections of the relay endpoint, rendered as the JSON error envelopes
/// the form client understands. Spam is not in here: a filled honeypot gets
/// the success shape.
#[derive(Error, Debug)]
pub enum ContactError {
    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("email provider credential missing")]
    NotConfigured,

    #[error("email provider rejected the message: {detail}")]
    Send { detail: String },

    #[error("internal error")]
    Server,
}

impl From<EmailError> for ContactError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::NotConfigured => ContactError::NotConfigured,
            EmailError::Provider { detail, .. } => ContactError::Send { detail },
            EmailError::Transport(err) => {
                tracing::error!(error = %err, "email provider unreachable");
                ContactError::Server
            }
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ContactError::Validation(field_errors) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "validation", "fieldErrors": field_errors}),
            ),
            ContactError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "not-configured",
                    "message": "El servicio de correo no está configurado.",
                }),
            ),
            ContactError::Send { detail } => (
                StatusCode::BAD_GATEWAY,
                json!({"error": "send", "message": detail}),
            ),
            ContactError::Server => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "server", "message": "Ocurrió un error en el servidor."}),
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// POST /api/contact - the submission relay.
///
/// Order matters: the honeypot is checked before validation and before any
/// outbound call, and answers with the exact success shape so spam is
/// indistinguishable from acceptance.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionPayload>, JsonRejection>,
) -> Result<Json<Value>, ContactError> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "unparseable contact payload");
        ContactError::Validation(FieldErrors::new())
    })?;

    let payload = payload.trimmed();

    if payload.is_spam() {
        tracing::info!("honeypot filled, silently dropping submission");
        return Ok(Json(json!({"success": true})));
    }

    let submission = validate(&payload).map_err(ContactError::Validation)?;

    if !state.email.is_configured() {
        tracing::error!("contact submission rejected: email provider not configured");
        return Err(ContactError::NotConfigured);
    }

    state.email.send_contact_notification(&submission).await?;

    Ok(Json(json!({"success": true})))
}
