//! Data models for route protection and verification outcomes.

/// Compiled protected-route rules
pub mod route;
/// Verification provider wire types
pub mod verification;
