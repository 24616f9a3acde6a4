//! Client for the external token-verification endpoint.

use std::time::Duration;

use url::Url;

use crate::error::{AppError, ConfigError};
use crate::models::verification::VerificationOutcome;

/// Verification client holding the shared secret, the endpoint, and a
/// reusable HTTP client with a bounded timeout.
///
/// Built once at gate construction; safe for concurrent use across
/// requests.
#[derive(Debug)]
pub struct Verifier {
    client: reqwest::Client,
    endpoint: Url,
    secret: String,
}

impl Verifier {
    /// Build a verification client.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptySecret`] if `secret` is empty
    /// - [`ConfigError::Endpoint`] if `endpoint` is not a valid URL
    /// - [`ConfigError::Client`] if the HTTP client cannot be built
    pub fn new(secret: &str, endpoint: &str, timeout: Duration) -> Result<Self, ConfigError> {
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let endpoint = Url::parse(endpoint)?;

        // Bounded timeout so a hung provider cannot stall the request task
        // indefinitely. Single attempt, no retry.
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            secret: secret.to_string(),
        })
    }

    /// Verify a token against the provider.
    ///
    /// Sends a form-encoded `POST` carrying `secret` and `response`, reads
    /// the full response body, and parses it into a
    /// [`VerificationOutcome`]. The provider's HTTP status is not
    /// inspected; only the body shape decides the result.
    ///
    /// A parsed outcome with `success=false` is **not** an error here — the
    /// caller decides how to present the provider's error codes.
    ///
    /// # Errors
    ///
    /// - [`AppError::VerifyTransport`] if the request cannot be sent
    /// - [`AppError::VerifyRead`] if the response body cannot be read
    /// - [`AppError::VerifyDecode`] if the body is not the expected shape
    pub async fn verify(&self, token: &str) -> Result<VerificationOutcome, AppError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "failed to reach verification endpoint");
                AppError::VerifyTransport(err)
            })?;

        let body = response.text().await.map_err(AppError::VerifyRead)?;

        serde_json::from_str(&body).map_err(AppError::VerifyDecode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_rejected() {
        let err = Verifier::new("", "https://example.com/siteverify", Duration::from_secs(1))
            .unwrap_err();

        assert!(matches!(err, ConfigError::EmptySecret));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = Verifier::new("secret", "not a url", Duration::from_secs(1)).unwrap_err();

        assert!(matches!(err, ConfigError::Endpoint(_)));
    }
}
