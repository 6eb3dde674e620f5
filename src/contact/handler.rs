//! Contact submission pipeline.
//!
//! # Data Flow
//! ```text
//! Received
//!     → RateChecked  (RateLimiter::check_and_record)
//!     → Parsed       (JSON body → SubmissionDraft)
//!     → Validated    (validator::validate)
//!     → Persisted | Skipped (PersistenceGateway::store)
//!     → Responded    (Outcome)
//! ```
//!
//! Each stage either advances or ends the request with a terminal [`Outcome`].
//! Nothing is retried.

use std::time::{Duration, Instant};

use crate::contact::submission::{StoredContact, SubmissionDraft};
use crate::contact::validator::validate;
use crate::observability::metrics;
use crate::persistence::{PersistenceError, PersistenceGateway, StoreReceipt};
use crate::security::RateLimiter;

pub const MSG_SENT: &str = "Message sent successfully!";
pub const MSG_RECEIVED_LOG_ONLY: &str = "Message received (development mode)";
pub const MSG_RATE_LIMITED: &str = "Too many requests. Please try again later.";
pub const MSG_BAD_REQUEST: &str = "Invalid request body";
pub const MSG_PERSISTENCE_FAILED: &str = "Failed to save message. Please try again.";

/// Terminal result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Accepted; `data` is present only when the submission was stored.
    Accepted {
        message: &'static str,
        data: Option<StoredContact>,
    },
    RateLimited,
    BadRequest,
    /// Joined rule violations.
    ValidationFailed(String),
    PersistenceFailed,
}

impl Outcome {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Accepted { .. } => "accepted",
            Outcome::RateLimited => "rate_limited",
            Outcome::BadRequest => "bad_request",
            Outcome::ValidationFailed(_) => "validation_failed",
            Outcome::PersistenceFailed => "persistence_failed",
        }
    }
}

/// Orchestrates rate limiting, validation and persistence.
pub struct SubmissionHandler<G> {
    limiter: RateLimiter,
    gateway: G,
    persistence_timeout: Duration,
}

impl<G: PersistenceGateway> SubmissionHandler<G> {
    pub fn new(limiter: RateLimiter, gateway: G, persistence_timeout: Duration) -> Self {
        Self {
            limiter,
            gateway,
            persistence_timeout,
        }
    }

    /// Run one raw request body from `origin` through the pipeline.
    pub async fn handle(&self, raw_body: &[u8], origin: &str) -> Outcome {
        let outcome = self.run(raw_body, origin).await;
        metrics::record_submission(outcome.label());
        outcome
    }

    async fn run(&self, raw_body: &[u8], origin: &str) -> Outcome {
        if !self.limiter.check_and_record(origin) {
            tracing::warn!(origin = %origin, "Contact rate limit exceeded");
            metrics::record_rate_limited();
            return Outcome::RateLimited;
        }

        let draft: SubmissionDraft = match serde_json::from_slice(raw_body) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::debug!(origin = %origin, error = %e, "Malformed contact payload");
                return Outcome::BadRequest;
            }
        };

        let submission = match validate(draft) {
            Ok(submission) => submission,
            Err(errors) => {
                tracing::debug!(origin = %origin, errors = %errors, "Contact submission rejected");
                return Outcome::ValidationFailed(errors.joined());
            }
        };

        let start = Instant::now();
        let result = tokio::time::timeout(self.persistence_timeout, self.gateway.store(&submission))
            .await
            .unwrap_or_else(|_| Err(PersistenceError::Timeout(self.persistence_timeout.as_secs())));
        if self.gateway.is_durable() {
            metrics::record_persistence_duration(start);
        }

        match result {
            Ok(StoreReceipt::Stored(stored)) => {
                tracing::info!(origin = %origin, id = %stored.id, "Contact submission stored");
                Outcome::Accepted {
                    message: MSG_SENT,
                    data: Some(stored),
                }
            }
            Ok(StoreReceipt::Skipped) => Outcome::Accepted {
                message: MSG_RECEIVED_LOG_ONLY,
                data: None,
            },
            Err(e) => {
                tracing::error!(origin = %origin, error = %e, "Failed to persist contact submission");
                Outcome::PersistenceFailed
            }
        }
    }
}
