//! Token extraction from a matched request.
//!
//! Header-based extraction reads the live request's headers directly; it
//! never touches the body. Form-based extraction decodes a [`RequestCopy`]
//! body, never the original request, which stays re-readable for the
//! forward step.

use axum::http::HeaderMap;
use url::form_urlencoded;

use crate::error::AppError;
use crate::middleware::replicate::RequestCopy;

/// Raw header value under `key`, or an empty string if the header is absent
/// or not valid UTF-8.
///
/// No local validation happens here: an empty token is still sent to the
/// provider, which rejects it with its own error codes.
pub fn header_token(headers: &HeaderMap, key: &str) -> String {
    headers
        .get(key)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// First form-encoded value under `key` in the copied body.
///
/// # Errors
///
/// - [`AppError::MalformedForm`] if the body is not valid UTF-8
/// - [`AppError::MissingToken`] if the key is absent or its value is empty
pub fn form_token(copy: &RequestCopy, key: &str) -> Result<String, AppError> {
    let body = std::str::from_utf8(&copy.body).map_err(|_| AppError::MalformedForm)?;

    let token = form_urlencoded::parse(body.as_bytes())
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();

    if token.is_empty() {
        return Err(AppError::MissingToken);
    }

    Ok(token)
}
