//! Demonstration endpoint for the service binary.
//!
//! Protect it by listing its route in `PROTECTED_ROUTES`; the gate then
//! requires a valid challenge token before this handler ever runs.

use axum::Json;
use serde::Serialize;

/// Submission acknowledgement.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub status: String,
}

/// Accept a submission that survived the gate.
pub async fn submit() -> Json<SubmitResponse> {
    Json(SubmitResponse {
        status: "accepted".to_string(),
    })
}
