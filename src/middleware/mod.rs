//! HTTP middleware components.
//!
//! Middleware are functions that run before route handlers.
//! They can:
//! - Gate protected routes behind challenge verification
//! - Duplicate request state for destructive reads
//! - Short-circuit requests (reject unverified)

/// Token extraction policies
pub mod extract;
/// Request duplication for body-consuming extraction
pub mod replicate;
/// Turnstile gate middleware
pub mod turnstile;
