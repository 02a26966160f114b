use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::form::SubmitOutcome;
use crate::submission::{FieldErrors, SubmissionPayload};

/// How a form controller reaches the relay. Implemented by [`SubmitClient`]
/// for real deployments and by in-process fakes in tests.
#[async_trait]
pub trait Submit {
    async fn submit(&self, payload: &SubmissionPayload) -> SubmitOutcome;
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "fieldErrors")]
    field_errors: Option<FieldErrors>,
}

/// Submits to the relay endpoint over HTTP. One attempt, no retry; any
/// failure surfaces immediately as a [`SubmitOutcome`].
#[derive(Clone)]
pub struct SubmitClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SubmitClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_default();
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Submit for SubmitClient {
    async fn submit(&self, payload: &SubmissionPayload) -> SubmitOutcome {
        let response = match self.http.post(&self.endpoint).json(payload).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "contact submission never completed");
                return SubmitOutcome::TransportError;
            }
        };

        let status = response.status();
        let body: Option<ErrorBody> = response.json().await.ok();

        if status.is_success() {
            return SubmitOutcome::Accepted;
        }

        if let Some(body) = body {
            if body.error.as_deref() == Some("validation") {
                if let Some(field_errors) = body.field_errors {
                    return SubmitOutcome::RejectedValidation(field_errors);
                }
            }
            return SubmitOutcome::Failed(body.message);
        }

        SubmitOutcome::Failed(None)
    }
}
