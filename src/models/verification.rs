//! Wire type for the verification provider's response.

use serde::Deserialize;

/// Structured outcome of a token verification, deserialized from the
/// provider's JSON response body.
///
/// `success: false` is a normal outcome at this layer, not an error; the
/// dispatcher decides how to present the provider-supplied error codes.
/// Only `success` is required on the wire — the provider omits the other
/// fields in some failure responses.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationOutcome {
    /// Whether the challenge token was accepted.
    pub success: bool,

    /// Provider error codes explaining a rejection (e.g.
    /// `invalid-input-response`).
    #[serde(rename = "error-codes", default)]
    pub error_codes: Vec<String>,

    /// ISO 8601 timestamp of the challenge, as reported by the provider.
    #[serde(default)]
    pub challenge_ts: String,

    /// Hostname of the site the challenge was solved on.
    #[serde(default)]
    pub hostname: String,
}
