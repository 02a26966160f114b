use mandados_contact::Submission;
use mandados_contact::html::{escape_html, escape_html_with_breaks};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::config::EmailConfig;

#[derive(Error, Debug)]
pub enum EmailError {
    /// The provider credential is absent; nothing was attempted.
    #[error("email provider credential is not configured")]
    NotConfigured,

    /// The provider answered with a non-success status.
    #[error("email provider rejected the request ({status}): {detail}")]
    Provider { status: u16, detail: String },

    /// The request to the provider never completed.
    #[error("email provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    html: String,
    reply_to: &'a str,
}

/// Client for the transactional email provider's HTTPS API.
///
/// Dispatches contact notifications to the configured operator address with
/// the submitter set as reply-to, authenticated with a bearer credential.
/// Single attempt, no retry.
#[derive(Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    api_base_url: String,
    api_key: String,
    from_address: String,
    to_address: String,
}

impl EmailClient {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_owned(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            to_address: config.to_address.clone(),
        }
    }

    /// Whether a provider credential is present. Checked before any relay
    /// work so an unconfigured deployment fails fast without network calls.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub async fn send_contact_notification(
        &self,
        submission: &Submission,
    ) -> Result<(), EmailError> {
        if !self.is_configured() {
            return Err(EmailError::NotConfigured);
        }

        let subject = format!("Nuevo mensaje de contacto de {}", submission.name);
        let body = SendEmailRequest {
            from: &self.from_address,
            to: [&self.to_address],
            subject,
            html: notification_html(submission),
            reply_to: &submission.email,
        };

        let response = self
            .http
            .post(format!("{}/emails", self.api_base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), detail = %detail, "email provider rejected contact notification");
            return Err(EmailError::Provider {
                status: status.as_u16(),
                detail,
            });
        }

        info!(reply_to = %submission.email, "contact notification dispatched");
        Ok(())
    }
}

/// The fixed notification template. All user-controlled text is escaped;
/// line breaks in the message survive as `<br/>`.
fn notification_html(submission: &Submission) -> String {
    format!(
        concat!(
            "<h2>Nuevo mensaje desde mandados.cr</h2>",
            "<p><strong>Nombre:</strong> {name}</p>",
            "<p><strong>Correo:</strong> {email}</p>",
            "<p><strong>Teléfono:</strong> {phone}</p>",
            "<p><strong>Mensaje:</strong></p>",
            "<p>{message}</p>",
        ),
        name = escape_html(&submission.name),
        email = escape_html(&submission.email),
        phone = escape_html(&submission.phone),
        message = escape_html_with_breaks(&submission.message),
    )
}
