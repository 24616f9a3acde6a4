//! HTTP request handlers (route handlers).
//!
//! The gate itself has almost no routes of its own: the middleware fronts
//! whatever router the host application builds. The handlers here are the
//! binary's own surface.

/// Demonstration route guarded by the gate
pub mod demo;
/// Liveness probe
pub mod health;
