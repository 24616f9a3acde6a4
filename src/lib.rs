//! Turnstile Gate - challenge-verification middleware for axum.
//!
//! Gates configured HTTP routes behind Cloudflare Turnstile verification:
//! requests matching a protected-route rule must carry a challenge token
//! (in a header or a form field, per rule) that the external verification
//! endpoint accepts before the request reaches its handler. Everything else
//! passes through untouched.
//!
//! # Usage
//!
//! ```ignore
//! let gate = TurnstileGate::new(&config)?;
//! let app = Router::new()
//!     .route("/api/submit", post(submit))
//!     .layer(middleware::from_fn_with_state(gate, turnstile_middleware));
//! ```
//!
//! The gate fails closed: the only path that forwards a request is an
//! explicit `success=true` outcome from the verification endpoint.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::{Config, RouteConfig};
pub use error::{AppError, ConfigError};
pub use middleware::turnstile::{TurnstileGate, turnstile_middleware};
