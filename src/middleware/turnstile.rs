//! Turnstile gate middleware.
//!
//! This middleware intercepts every request to:
//! 1. Match it against the configured protected-route rules
//! 2. Extract a verification token per the matched rule's policy
//! 3. Verify the token against the external verification endpoint
//! 4. Forward the original request only on an explicit success outcome
//!
//! Requests matching no rule pass through untouched and the verification
//! endpoint is never contacted.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::config::Config;
use crate::error::{AppError, ConfigError};
use crate::middleware::{extract, replicate};
use crate::models::route::{ProtectedRoute, TokenSource};
use crate::services::verifier::Verifier;

/// Shared gate state: the compiled rule set and the verification client.
///
/// Built once at startup and cloned cheaply into every request; everything
/// inside is immutable, so concurrent reads need no synchronization.
#[derive(Clone, Debug)]
pub struct TurnstileGate {
    inner: Arc<GateInner>,
}

#[derive(Debug)]
struct GateInner {
    routes: Vec<ProtectedRoute>,
    verifier: Verifier,
}

impl TurnstileGate {
    /// Construct the gate from configuration.
    ///
    /// Compiles every route rule and builds the verification client.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError`] if the secret is empty, the verification
    /// endpoint is not a valid URL, or the HTTP client cannot be built.
    /// These are fatal: a gate that cannot verify must not be installed.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let verifier = Verifier::new(
            &config.turnstile_secret,
            &config.verify_url,
            std::time::Duration::from_secs(config.verify_timeout_secs),
        )?;

        let routes = config
            .protected_routes
            .iter()
            .map(ProtectedRoute::from_config)
            .collect();

        Ok(Self {
            inner: Arc::new(GateInner { routes, verifier }),
        })
    }

    /// First configured rule matching the request, in declared order.
    ///
    /// Overlapping rules are resolved by declaration order alone; there is
    /// no specificity scoring.
    fn matched_route(&self, method: &Method, path: &str) -> Option<&ProtectedRoute> {
        self.inner.routes.iter().find(|route| route.matches(method, path))
    }
}

/// Turnstile verification middleware function.
///
/// # Flow
///
/// 1. Find the first rule matching (method, path); none → pass through
/// 2. Extract the token: header rules read the live headers, form rules
///    decode a duplicated body so the original request stays intact
/// 3. POST the token to the verification endpoint
/// 4. On `success=true`, forward the **original** request (not the copy);
///    on any other outcome respond with a structured error and never
///    invoke the next handler
///
/// # Arguments
///
/// * `State(gate)` - Shared gate state injected by Axum
/// * `request` - Incoming HTTP request (rebuilt in place when its body is duplicated)
/// * `next` - Next middleware/handler in the chain
///
/// # Returns
///
/// - `Ok(Response)` from the next handler on pass-through or verified requests
/// - `Err(AppError)` otherwise (400 for client faults, 500 for infrastructure)
pub async fn turnstile_middleware(
    State(gate): State<TurnstileGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Step 1: Match against configured rules; unmatched requests are
    // forwarded unchanged without contacting the verification endpoint.
    let Some(route) = gate.matched_route(request.method(), request.uri().path()) else {
        return Ok(next.run(request).await);
    };

    tracing::debug!(
        method = %request.method(),
        path = request.uri().path(),
        pattern = route.pattern(),
        "request matched protected route"
    );

    // Step 2: Extract the token. Form extraction consumes a body stream, so
    // it runs against a materialized copy while the original request gets
    // its body restored.
    let token = match route.token_source() {
        TokenSource::Header(key) => extract::header_token(request.headers(), key),
        TokenSource::Form(key) => {
            let (restored, copy) = replicate::snapshot(request).await?;
            request = restored;
            extract::form_token(&copy, key)?
        }
    };

    // Step 3: Verify. Transport and decode failures surface as 500; a
    // parsed rejection is a client fault carrying the provider's codes.
    let outcome = gate.inner.verifier.verify(&token).await?;

    if !outcome.success {
        tracing::warn!(
            pattern = route.pattern(),
            error_codes = ?outcome.error_codes,
            "turnstile verification rejected"
        );
        return Err(AppError::VerificationRejected(outcome.error_codes));
    }

    // Step 4: Explicit success is the only path that forwards.
    Ok(next.run(request).await)
}
