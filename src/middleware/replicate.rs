//! Request duplication for destructive body reads.
//!
//! Form-based token extraction has to consume a body stream. The body of an
//! inbound request is singly-consumable, and the gate must forward the
//! original request untouched on success, so extraction never runs against
//! the original: it runs against a [`RequestCopy`] produced here, while the
//! original request gets its body restored from the same bytes.

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::Request,
    http::{HeaderMap, Method, Uri},
};

use crate::error::AppError;

/// A fully materialized, independent duplicate of an inbound request.
///
/// Owned exclusively by the extraction step and discarded after use. It
/// never replaces the original request on the forwarding path.
#[derive(Debug, Clone)]
pub struct RequestCopy {
    pub method: Method,

    pub uri: Uri,

    /// All header values copied verbatim, multi-valued headers preserved.
    pub headers: HeaderMap,

    pub body: Bytes,
}

/// Duplicate a request, leaving the original fully intact.
///
/// Reads the whole body into memory, rebuilds the original request around a
/// fresh unconsumed buffer of the same bytes, and returns it alongside a
/// [`RequestCopy`] with identical method, URI, and headers. The body is
/// materialized in full, so practical request size is bounded by available
/// memory.
///
/// # Errors
///
/// A body read failure is an infrastructure error
/// ([`AppError::CopyRequest`], HTTP 500), not a client error.
pub async fn snapshot(request: Request) -> Result<(Request, RequestCopy), AppError> {
    let (parts, body) = request.into_parts();

    let method = parts.method.clone();
    let uri = parts.uri.clone();
    let headers = parts.headers.clone();

    let bytes = to_bytes(body, usize::MAX).await.map_err(AppError::CopyRequest)?;

    let copy = RequestCopy {
        method,
        uri,
        headers,
        body: bytes.clone(),
    };

    // Restore the original request's body for the eventual forward step.
    let restored = Request::from_parts(parts, Body::from(bytes));

    Ok((restored, copy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::{COOKIE, HeaderValue};

    #[tokio::test]
    async fn copy_carries_method_uri_headers_and_body() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/login?next=%2Fhome")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("cf-turnstile-response=tok"))
            .unwrap();

        let (_, copy) = snapshot(request).await.unwrap();

        assert_eq!(copy.method, Method::POST);
        assert_eq!(copy.uri.path(), "/api/login");
        assert_eq!(
            copy.headers.get("content-type").unwrap(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(&copy.body[..], b"cf-turnstile-response=tok");
    }

    #[tokio::test]
    async fn original_body_is_restored_and_readable() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/login")
            .body(Body::from("a=1&b=2"))
            .unwrap();

        let (restored, _) = snapshot(request).await.unwrap();

        let bytes = to_bytes(restored.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"a=1&b=2");
    }

    #[tokio::test]
    async fn multi_valued_headers_are_preserved() {
        let mut request = Request::builder()
            .method(Method::POST)
            .uri("/api/login")
            .body(Body::empty())
            .unwrap();
        request
            .headers_mut()
            .append(COOKIE, HeaderValue::from_static("a=1"));
        request
            .headers_mut()
            .append(COOKIE, HeaderValue::from_static("b=2"));

        let (restored, copy) = snapshot(request).await.unwrap();

        let copied: Vec<_> = copy.headers.get_all(COOKIE).iter().collect();
        assert_eq!(copied, vec!["a=1", "b=2"]);

        let original: Vec<_> = restored.headers().get_all(COOKIE).iter().collect();
        assert_eq!(original, vec!["a=1", "b=2"]);
    }
}
