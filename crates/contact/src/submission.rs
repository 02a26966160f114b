use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub const NAME_MAX_CHARS: usize = 100;
pub const MESSAGE_MAX_CHARS: usize = 2000;

// local@domain.tld, no whitespace, at least one dot in the domain
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

// E.164-shaped: leading +, country code, 7 to 15 digits total
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9][0-9]{6,14}$").expect("phone regex"));

/// A field of the contact form, used as the key of [`FieldErrors`].
///
/// Serializes to the lowercase field name so an error map travels over the
/// wire as `{"name": "...", "email": "..."}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString, AsRefStr, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

/// One human-readable message per failing field. First failing rule wins;
/// there is no per-field aggregation.
pub type FieldErrors = BTreeMap<Field, String>;

/// The raw wire shape of a submission, honeypot included.
///
/// Every field defaults to empty so an absent JSON key validates the same
/// way as an empty input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub honeypot: String,
}

impl SubmissionPayload {
    /// Returns the payload with surrounding whitespace removed from every
    /// field. Trimming is a precondition of [`validate`], not something the
    /// validator applies itself; it is idempotent.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            message: self.message.trim().to_owned(),
            honeypot: self.honeypot.trim().to_owned(),
        }
    }

    /// A non-blank honeypot flags the submission as spam. Legitimate users
    /// never see the field, so only bots fill it.
    pub fn is_spam(&self) -> bool {
        !self.honeypot.trim().is_empty()
    }
}

/// An accepted, normalized submission. The honeypot is dropped here: a spam
/// payload never becomes a `Submission`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

fn check_name(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("Nombre es requerido")
    } else if name.chars().count() > NAME_MAX_CHARS {
        Some("Nombre demasiado largo")
    } else {
        None
    }
}

fn check_email(email: &str) -> Option<&'static str> {
    if !EMAIL_RE.is_match(email) {
        Some("Correo inválido")
    } else {
        None
    }
}

fn check_phone(phone: &str) -> Option<&'static str> {
    if phone.is_empty() {
        Some("Teléfono es requerido")
    } else if !PHONE_RE.is_match(phone) {
        Some("Teléfono inválido")
    } else {
        None
    }
}

fn check_message(message: &str) -> Option<&'static str> {
    if message.is_empty() {
        Some("Mensaje requerido")
    } else if message.chars().count() > MESSAGE_MAX_CHARS {
        Some("Mensaje demasiado largo")
    } else {
        None
    }
}

/// Validates an already-trimmed payload against the shared rule set.
///
/// Pure and deterministic: identical inputs yield identical results. Callers
/// normalize with [`SubmissionPayload::trimmed`] first.
pub fn validate(payload: &SubmissionPayload) -> Result<Submission, FieldErrors> {
    let mut errors = FieldErrors::new();

    let checks = [
        (Field::Name, check_name(&payload.name)),
        (Field::Email, check_email(&payload.email)),
        (Field::Phone, check_phone(&payload.phone)),
        (Field::Message, check_message(&payload.message)),
    ];

    for (field, failure) in checks {
        if let Some(message) = failure {
            errors.insert(field, message.to_owned());
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Submission {
        name: payload.name.clone(),
        email: payload.email.clone(),
        phone: payload.phone.clone(),
        message: payload.message.clone(),
    })
}
