//! Contact form validation.
//!
//! A submission is checked as a whole: every failing field contributes one
//! error, in a fixed order, and the caller presents them together in a
//! single alert. There is no per-field feedback and no partial validation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const NAME_REQUIRED: &str = "Name is required.";
pub const EMAIL_REQUIRED: &str = "A valid email is required.";
pub const MESSAGE_REQUIRED: &str = "Message cannot be empty.";

// Intentionally permissive: any non-whitespace local part, '@', a domain
// containing at least one dot. Tightening this rejects real addresses.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

/// Validate the three contact fields.
///
/// Values are trimmed before checking. Errors accumulate in the fixed
/// order name, email, message; an empty vector means the submission may
/// proceed.
pub fn validate(name: &str, email: &str, message: &str) -> Vec<String> {
    let name = name.trim();
    let email = email.trim();
    let message = message.trim();

    let mut errors = Vec::new();

    if name.is_empty() {
        errors.push(NAME_REQUIRED.to_string());
    }

    if email.is_empty() || !EMAIL_PATTERN.is_match(email) {
        errors.push(EMAIL_REQUIRED.to_string());
    }

    if message.is_empty() {
        errors.push(MESSAGE_REQUIRED.to_string());
    }

    errors
}

/// A contact form submission. Fields are stored trimmed.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Submission {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    /// Run the full validation over this submission.
    pub fn validate(&self) -> Vec<String> {
        validate(&self.name, &self.email, &self.message)
    }

    /// Compose the outgoing message text for an accepted submission.
    pub fn compose(&self, recipient: &str) -> String {
        format!(
            "To: {}\nSubject: New contact form submission from {}\n\nFrom: {} <{}>\n\nMessage:\n{}\n",
            recipient, self.name, self.name, self.email, self.message
        )
    }
}
