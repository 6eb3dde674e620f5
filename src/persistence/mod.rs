//! Persistence gateways for accepted submissions.
//!
//! # Data Flow
//! ```text
//! validated Submission
//!     → PersistenceGateway::store
//!         → rest.rs (hosted row-store insert)   => StoreReceipt::Stored
//!         → null.rs (log-only mode)             => StoreReceipt::Skipped
//! ```
//!
//! # Design Decisions
//! - The gateway is chosen once at startup from configuration
//! - Backend error detail stays in `PersistenceError` and the logs

use std::future::Future;
use thiserror::Error;

use crate::contact::submission::{StoredContact, Submission};

pub mod null;
pub mod rest;

pub use null::NullGateway;
pub use rest::RestGateway;

/// Result of handing a submission to a gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreReceipt {
    /// Durably stored; carries the row as returned by the backend.
    Stored(StoredContact),
    /// Not stored because no durable backend is configured.
    Skipped,
}

/// Errors from the durable backend.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("invalid persistence url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request to persistence backend failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("persistence backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode persistence response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("persistence backend returned no rows")]
    EmptyResponse,

    #[error("persistence backend timed out after {0} seconds")]
    Timeout(u64),
}

/// Destination for accepted submissions.
#[cfg_attr(test, mockall::automock)]
pub trait PersistenceGateway: Send + Sync + 'static {
    /// Store one submission as a single atomic insert.
    fn store(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = Result<StoreReceipt, PersistenceError>> + Send;

    /// Whether accepted submissions survive the process.
    fn is_durable(&self) -> bool;
}
