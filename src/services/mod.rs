//! Outbound service clients.
//!
//! Services contain the logic that talks to external systems, separated
//! from the middleware's per-request sequencing.

pub mod verifier;
