//! Contact submission validation.
//!
//! Every rule is checked; a failing submission reports all violated rules so
//! the caller can display them at once. Lengths count characters, not bytes.

use email_address::{EmailAddress, Options};
use std::fmt;

use crate::contact::submission::{
    ContactMessage, ContactMessageError, ContactName, ContactNameError, ContactSubject,
    ContactSubjectError, Submission, SubmissionDraft,
};

const INVALID_EMAIL: &str = "Please enter a valid email address";

/// Rule violations for a rejected submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    /// All messages joined for display.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a draft, returning the accepted submission or every violation.
pub fn validate(draft: SubmissionDraft) -> Result<Submission, ValidationErrors> {
    let SubmissionDraft {
        name,
        email,
        subject,
        message,
    } = draft;
    let mut errors = Vec::new();

    let name = collect(&mut errors, ContactName::try_new(name), |e| match e {
        ContactNameError::LenCharMinViolated => "Name must be at least 2 characters",
        ContactNameError::LenCharMaxViolated => "Name must be less than 100 characters",
    });
    let email = collect(
        &mut errors,
        is_valid_email(&email).then_some(email).ok_or(()),
        |()| INVALID_EMAIL,
    );
    let subject = collect(&mut errors, ContactSubject::try_new(subject), |e| match e {
        ContactSubjectError::LenCharMinViolated => "Subject must be at least 5 characters",
        ContactSubjectError::LenCharMaxViolated => "Subject must be less than 200 characters",
    });
    let message = collect(&mut errors, ContactMessage::try_new(message), |e| match e {
        ContactMessageError::LenCharMinViolated => "Message must be at least 10 characters",
        ContactMessageError::LenCharMaxViolated => "Message must be less than 5000 characters",
    });

    match (name, email, subject, message) {
        (Some(name), Some(email), Some(subject), Some(message)) => {
            Ok(Submission::new(name, email, subject, message))
        }
        _ => Err(ValidationErrors(errors)),
    }
}

fn collect<T, E>(
    errors: &mut Vec<String>,
    result: Result<T, E>,
    describe: impl FnOnce(E) -> &'static str,
) -> Option<T> {
    result.map_err(|e| errors.push(describe(e).to_string())).ok()
}

/// `local@label.tld`: no display name, no domain literal, no quoted local part.
fn is_valid_email(email: &str) -> bool {
    let options = Options::default()
        .without_display_text()
        .without_domain_literal()
        .with_required_tld();
    EmailAddress::parse_with_options(email, options)
        .is_ok_and(|address| !address.local_part().starts_with('"'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, email: &str, subject: &str, message: &str) -> SubmissionDraft {
        SubmissionDraft {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    fn valid() -> SubmissionDraft {
        draft("Jo", "jo@x.com", "Hello there", "This is a test message.")
    }

    #[test]
    fn accepts_valid_submission_unchanged() {
        let submission = validate(valid()).unwrap();
        assert_eq!(submission.name(), "Jo");
        assert_eq!(submission.email(), "jo@x.com");
        assert_eq!(submission.subject(), "Hello there");
        assert_eq!(submission.message(), "This is a test message.");
    }

    #[test]
    fn rejects_short_name() {
        let err = validate(SubmissionDraft { name: "J".into(), ..valid() }).unwrap_err();
        assert_eq!(err.joined(), "Name must be at least 2 characters");
    }

    #[test]
    fn rejects_long_name() {
        let err = validate(SubmissionDraft { name: "a".repeat(101), ..valid() }).unwrap_err();
        assert_eq!(err.messages(), ["Name must be less than 100 characters"]);
    }

    #[test]
    fn name_bounds_are_inclusive() {
        assert!(validate(SubmissionDraft { name: "a".repeat(100), ..valid() }).is_ok());
        assert!(validate(SubmissionDraft { name: "ab".into(), ..valid() }).is_ok());
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 100 two-byte characters
        let name = "ü".repeat(100);
        assert!(validate(SubmissionDraft { name, ..valid() }).is_ok());
    }

    #[test]
    fn rejects_invalid_emails() {
        for email in [
            "",
            "plainaddress",
            "@x.com",
            "jo@",
            "jo x@x.com",
            "jo@@x.com",
            "Jo <jo@x.com>",
            "jo@localhost",
            "jo@x",
            "jo@[127.0.0.1]",
            "\"jo smith\"@x.com",
        ] {
            let err = validate(SubmissionDraft { email: email.into(), ..valid() }).unwrap_err();
            assert_eq!(
                err.messages(),
                ["Please enter a valid email address"],
                "email {email:?} should be rejected"
            );
        }
    }

    #[test]
    fn subject_and_message_bounds() {
        let err = validate(SubmissionDraft { subject: "Hey".into(), ..valid() }).unwrap_err();
        assert_eq!(err.joined(), "Subject must be at least 5 characters");

        let err = validate(SubmissionDraft { subject: "s".repeat(201), ..valid() }).unwrap_err();
        assert_eq!(err.joined(), "Subject must be less than 200 characters");

        let err = validate(SubmissionDraft { message: "too short".into(), ..valid() }).unwrap_err();
        assert_eq!(err.joined(), "Message must be at least 10 characters");

        let err = validate(SubmissionDraft { message: "m".repeat(5001), ..valid() }).unwrap_err();
        assert_eq!(err.joined(), "Message must be less than 5000 characters");

        assert!(validate(SubmissionDraft { message: "m".repeat(5000), ..valid() }).is_ok());
    }

    #[test]
    fn accepts_common_address_shapes() {
        for email in ["jo@x.com", "jo.smith+tag@mail.example.co.uk", "j_o-1@sub.x.io"] {
            assert!(
                validate(SubmissionDraft { email: email.into(), ..valid() }).is_ok(),
                "email {email:?} should be accepted"
            );
        }
    }

    #[test]
    fn accepted_email_is_stored_verbatim() {
        let submission = validate(SubmissionDraft { email: "Jo.Smith@X.com".into(), ..valid() }).unwrap();
        assert_eq!(submission.email(), "Jo.Smith@X.com");
    }

    #[test]
    fn reports_every_violation_in_field_order() {
        let err = validate(draft("J", "nope", "Hi", "short")).unwrap_err();
        assert_eq!(
            err.joined(),
            "Name must be at least 2 characters, Please enter a valid email address, \
             Subject must be at least 5 characters, Message must be at least 10 characters"
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let bad = draft("J", "jo@x.com", "Hello there", "This is a test message.");
        assert_eq!(validate(bad.clone()), validate(bad));
        assert_eq!(validate(valid()), validate(valid()));
    }
}
