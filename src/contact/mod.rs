//! Contact form domain.
//!
//! # Data Flow
//! ```text
//! raw JSON body
//!     → submission.rs (SubmissionDraft, untrusted)
//!     → validator.rs (field rules, all errors reported)
//!     → handler.rs (rate limit, persistence, Outcome)
//! ```

pub mod handler;
pub mod submission;
pub mod validator;

pub use handler::{Outcome, SubmissionHandler};
pub use submission::{StoredContact, Submission, SubmissionDraft};
pub use validator::{validate, ValidationErrors};
