//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming submission:
//!     → origin.rs (resolve client origin)
//!     → rate_limit.rs (check per-origin window)
//!     → Pass to validation
//!
//! Outgoing response:
//!     → headers.rs (hardening headers)
//! ```

pub mod headers;
pub mod origin;
pub mod rate_limit;

pub use origin::{resolve_origin, UNKNOWN_ORIGIN};
pub use rate_limit::{Clock, RateLimiter, SystemClock};
