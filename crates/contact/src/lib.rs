//! Shared contact-form domain: the submission payload and its validation
//! rules, the form controller state machine, and the HTTP submit client.
//!
//! Both trust boundaries consume this crate: the interactive form
//! controller for live feedback and the server relay for enforcement.
//! One rule set means the acceptance criteria cannot drift apart.

mod client;
mod form;
pub mod html;
mod submission;

pub use client::{Submit, SubmitClient};
pub use form::{
    ContactForm, FormEffect, FormStatus, MSG_FIX_ERRORS, MSG_GENERIC_ERROR, MSG_NETWORK_ERROR,
    MSG_SENT, SUCCESS_RESET_DELAY, SubmitOutcome,
};
pub use submission::{Field, FieldErrors, Submission, SubmissionPayload, validate};
