use serde_json::Value;
use thiserror::Error;

pub const MIN_MESSAGE_CHARS: usize = 5;
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Wire name of the hidden form field that only bots fill in.
pub const HONEYPOT_FIELD: &str = "company";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingField,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("Message too short")]
    MessageTooShort,
    #[error("Message too long")]
    MessageTooLong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Human,
    Bot,
}

/// A single contact-form submission, extracted from a parsed request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub honeypot: String,
}

impl Submission {
    /// Extracts and trims the known fields. Absent fields become empty strings and
    /// a body that is not a JSON object yields an all-empty submission.
    #[must_use]
    pub fn from_json(body: &Value) -> Self {
        Self {
            name: field(body, "name"),
            email: field(body, "email"),
            subject: field(body, "subject"),
            message: field(body, "message"),
            honeypot: field(body, HONEYPOT_FIELD),
        }
    }

    #[must_use]
    pub fn classify(&self) -> Classification {
        if self.honeypot.is_empty() { Classification::Human } else { Classification::Bot }
    }

    /// Checks that a human submission is fit for dispatch.
    ///
    /// # Errors
    /// Returns the first rule violated, checked in order: required fields, email shape,
    /// then message length bounds (inclusive, counted in characters).
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(ValidationError::MissingField);
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }

        let len = self.message.chars().count();
        if len < MIN_MESSAGE_CHARS {
            return Err(ValidationError::MessageTooShort);
        }
        if len > MAX_MESSAGE_CHARS {
            return Err(ValidationError::MessageTooLong);
        }
        Ok(())
    }

    /// Presence check used by the site route, which applies no shape rules.
    ///
    /// Judged on the raw body: a field counts when its value is truthy, so a
    /// whitespace-only string is present while `0`, `false` and `""` are not.
    #[must_use]
    pub fn has_required_fields(body: &Value) -> bool {
        ["name", "email", "message"].iter().all(|key| body.get(key).is_some_and(is_truthy))
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn field(body: &Value, key: &str) -> String {
    match body.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}
