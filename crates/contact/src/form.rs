use std::collections::BTreeSet;
use std::time::Duration;

use strum::Display;

use crate::submission::{Field, FieldErrors, SubmissionPayload, validate};

/// How long a success banner stays up before the form returns to idle.
pub const SUCCESS_RESET_DELAY: Duration = Duration::from_secs(6);

pub const MSG_SENT: &str = "Mensaje enviado. Te responderemos pronto.";
pub const MSG_FIX_ERRORS: &str = "Corrige los errores en el formulario.";
pub const MSG_GENERIC_ERROR: &str = "Ocurrió un error. Intentá nuevamente.";
pub const MSG_NETWORK_ERROR: &str = "Ocurrió un error de red. Intentá nuevamente.";

/// Submission status, driving feedback and control availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// What the relay answered, as seen by the controller. Produced by
/// [`crate::Submit`] implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 200: accepted (or silently absorbed as spam; the controller cannot
    /// tell, which is the point).
    Accepted,
    /// 400 with a structured field-error map from the server.
    RejectedValidation(FieldErrors),
    /// Any other HTTP failure, optionally carrying a server message.
    Failed(Option<String>),
    /// The request never completed.
    TransportError,
}

/// A side effect the embedding event loop must carry out. The controller
/// never spawns tasks or touches the network itself, so the same state
/// machine runs under tokio, in WASM, or in a test without any runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    /// Send this payload to the relay, then feed the result back through
    /// [`ContactForm::resolve`].
    Submit(SubmissionPayload),
    /// Schedule [`ContactForm::reset_elapsed`] with this token after
    /// `delay`. A token that no longer matches is stale and must be ignored,
    /// which is how an armed timer gets cancelled by a newer submission.
    ArmReset { token: u64, delay: Duration },
}

/// The contact form controller: field buffers, touched/attempted tracking,
/// the merged error-visibility policy and the
/// idle → loading → success/error lifecycle.
#[derive(Debug, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    phone: String,
    message: String,
    honeypot: String,
    status: FormStatus,
    status_message: Option<String>,
    errors: FieldErrors,
    touched: BTreeSet<Field>,
    attempted: bool,
    reset_token: u64,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: self.message.clone(),
            honeypot: self.honeypot.clone(),
        }
    }

    /// Validator output for the current buffers, recomputed on every call so
    /// it can never go stale against the fields.
    fn live_errors(&self) -> FieldErrors {
        validate(&self.payload().trimmed())
            .err()
            .unwrap_or_default()
    }

    /// Whether the current field values would be accepted.
    pub fn is_valid(&self) -> bool {
        validate(&self.payload().trimmed()).is_ok()
    }

    /// The submit control is unavailable while a request is in flight or
    /// while the form would be rejected.
    pub fn submit_disabled(&self) -> bool {
        self.status == FormStatus::Loading || !self.is_valid()
    }

    fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Message => self.message = value,
        }
        // editing clears the stored error optimistically; the next blur or
        // submit re-evaluates
        self.errors.remove(&field);
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.set_field(Field::Name, value.into());
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.set_field(Field::Email, value.into());
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.set_field(Field::Phone, value.into());
    }

    pub fn set_message(&mut self, value: impl Into<String>) {
        self.set_field(Field::Message, value.into());
    }

    pub fn set_honeypot(&mut self, value: impl Into<String>) {
        self.honeypot = value.into();
    }

    /// Marks the field touched and stores or removes its error from a fresh
    /// validator run.
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
        match self.live_errors().remove(&field) {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    /// The error to show for a field, if any: a stored error always shows;
    /// otherwise the live validator error shows only once the field was
    /// blurred or a submission was attempted. Untouched fields on a pristine
    /// form stay silent.
    pub fn displayed_error(&self, field: Field) -> Option<String> {
        if let Some(stored) = self.errors.get(&field) {
            return Some(stored.clone());
        }
        if self.touched.contains(&field) || self.attempted {
            return self.live_errors().remove(&field);
        }
        None
    }

    /// Attempts a submission. Returns the submit effect when the form is
    /// valid; otherwise surfaces every field error and returns nothing.
    pub fn submit(&mut self) -> Option<FormEffect> {
        self.attempted = true;

        let live = self.live_errors();
        if !live.is_empty() {
            self.errors = live;
            self.status = FormStatus::Error;
            self.status_message = Some(MSG_FIX_ERRORS.to_owned());
            return None;
        }

        // a new submission invalidates any armed reset timer
        self.reset_token += 1;
        self.status = FormStatus::Loading;
        self.status_message = None;
        self.errors.clear();

        Some(FormEffect::Submit(self.payload().trimmed()))
    }

    /// Applies the relay's answer to a submission started by [`submit`].
    ///
    /// [`submit`]: ContactForm::submit
    pub fn resolve(&mut self, outcome: SubmitOutcome) -> Option<FormEffect> {
        match outcome {
            SubmitOutcome::Accepted => {
                self.status = FormStatus::Success;
                self.status_message = Some(MSG_SENT.to_owned());
                self.name.clear();
                self.email.clear();
                self.phone.clear();
                self.message.clear();
                self.honeypot.clear();
                self.errors.clear();
                self.touched.clear();
                self.attempted = false;
                self.reset_token += 1;
                Some(FormEffect::ArmReset {
                    token: self.reset_token,
                    delay: SUCCESS_RESET_DELAY,
                })
            }
            SubmitOutcome::RejectedValidation(field_errors) => {
                self.errors = field_errors;
                self.status = FormStatus::Error;
                self.status_message = Some(MSG_FIX_ERRORS.to_owned());
                None
            }
            SubmitOutcome::Failed(message) => {
                self.status = FormStatus::Error;
                self.status_message =
                    Some(message.unwrap_or_else(|| MSG_GENERIC_ERROR.to_owned()));
                None
            }
            SubmitOutcome::TransportError => {
                self.status = FormStatus::Error;
                self.status_message = Some(MSG_NETWORK_ERROR.to_owned());
                None
            }
        }
    }

    /// Fires an armed reset timer. Stale tokens and non-success states are
    /// ignored, so a timer from a superseded submission can never clobber
    /// current state.
    pub fn reset_elapsed(&mut self, token: u64) {
        if token == self.reset_token && self.status == FormStatus::Success {
            self.status = FormStatus::Idle;
            self.status_message = None;
        }
    }

    /// Discards everything, including any armed timer.
    pub fn reset(&mut self) {
        let token = self.reset_token + 1;
        *self = Self {
            reset_token: token,
            ..Self::default()
        };
    }
}
