//! Contact submission types.

use nutype::nutype;
use serde::{de, Deserialize, Deserializer, Serialize};

/// A contact form submission as received from the client.
///
/// Constructed from untrusted input; only [`crate::contact::validator::validate`]
/// turns it into a [`Submission`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmissionDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[nutype(
    validate(len_char_min = 2, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize)
)]
pub struct ContactName(String);

#[nutype(
    validate(len_char_min = 5, len_char_max = 200),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize)
)]
pub struct ContactSubject(String);

#[nutype(
    validate(len_char_min = 10, len_char_max = 5000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize)
)]
pub struct ContactMessage(String);

/// A submission that passed every validation rule.
///
/// Fields are private so a `Submission` can only be obtained through the validator.
/// The email is kept exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    name: ContactName,
    email: String,
    subject: ContactSubject,
    message: ContactMessage,
}

impl Submission {
    pub(crate) fn new(
        name: ContactName,
        email: String,
        subject: ContactSubject,
        message: ContactMessage,
    ) -> Self {
        Self {
            name,
            email,
            subject,
            message,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message preview for log output, cut at `max_chars` characters.
    pub fn message_preview(&self, max_chars: usize) -> String {
        if self.message.chars().count() <= max_chars {
            return self.message().to_string();
        }
        let mut preview: String = self.message.chars().take(max_chars).collect();
        preview.push_str("...");
        preview
    }
}

/// A row stored by the durable gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoredContact {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: String,
    #[serde(default)]
    pub read: bool,
}

impl StoredContact {
    /// Whether the stored fields are exactly the submitted ones.
    pub fn matches(&self, submission: &Submission) -> bool {
        self.name == submission.name()
            && self.email == submission.email()
            && self.subject == submission.subject()
            && self.message == submission.message()
    }
}

// Row ids may be uuid strings or integer keys depending on the table.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("invalid id: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::validator::validate;

    fn submission(message: &str) -> Submission {
        validate(SubmissionDraft {
            name: "Jo".into(),
            email: "jo@x.com".into(),
            subject: "Hello there".into(),
            message: message.into(),
        })
        .unwrap()
    }

    #[test]
    fn short_message_preview_is_unchanged() {
        assert_eq!(submission("short one!").message_preview(100), "short one!");
    }

    #[test]
    fn long_message_preview_is_truncated_on_char_boundary() {
        let preview = submission(&"é".repeat(150)).message_preview(100);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn stored_contact_accepts_numeric_id() {
        let stored: StoredContact = serde_json::from_str(
            r#"{"id":42,"name":"Jo","email":"jo@x.com","subject":"Hello there",
                "message":"This is a test message.","created_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(stored.id, "42");
        assert!(!stored.read);
    }

    #[test]
    fn stored_contact_matches_identical_fields() {
        let s = submission("This is a test message.");
        let stored = StoredContact {
            id: "1".into(),
            name: "Jo".into(),
            email: "jo@x.com".into(),
            subject: "Hello there".into(),
            message: "This is a test message.".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            read: false,
        };
        assert!(stored.matches(&s));

        let altered = StoredContact { message: "This is a test".into(), ..stored };
        assert!(!altered.matches(&s));
    }
}
