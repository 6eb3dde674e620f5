//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, peer address)
//!     → contact.rs (route dispatch)
//!     → contact::SubmissionHandler
//!     → response.rs (Outcome → status + JSON)
//!     → Send to client
//! ```

pub mod contact;
pub mod request;
pub mod response;
pub mod server;

pub use request::{PeerAddr, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
