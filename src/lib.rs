//! Contact form back end for a portfolio site.

pub mod config;
pub mod contact;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod persistence;
pub mod security;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
