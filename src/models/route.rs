//! Compiled protected-route rules and request matching.

use axum::http::Method;

use crate::config::RouteConfig;

/// Form field the token is read from when a rule names neither a header
/// nor a form key.
pub const DEFAULT_FORM_KEY: &str = "cf-turnstile-response";

/// One segment of a compiled path pattern.
///
/// A segment wrapped in braces in the source pattern (`{token}`) is a
/// parameter and matches any non-empty request segment; everything else is
/// a literal compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    Literal(String),
    Parameter,
}

/// Where a rule reads its verification token from.
///
/// Chosen once when the rule is compiled: header-based if the rule names a
/// non-empty header key, otherwise form-based with the configured form key
/// (falling back to [`DEFAULT_FORM_KEY`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Raw header value under this key.
    Header(String),

    /// First form-encoded body value under this key.
    Form(String),
}

/// A protected-route rule, compiled from [`RouteConfig`] at gate
/// construction and immutable afterwards.
///
/// The segment count is fixed here; matching requires exact segment-count
/// equality with the candidate path, so a pattern never matches a prefix or
/// an extension of itself.
#[derive(Debug, Clone)]
pub struct ProtectedRoute {
    method: String,
    segments: Vec<PatternSegment>,
    source: TokenSource,
    pattern: String,
}

impl ProtectedRoute {
    /// Compile a raw configuration rule.
    pub fn from_config(config: &RouteConfig) -> Self {
        let segments = config
            .path
            .trim_matches('/')
            .split('/')
            .map(|part| {
                if part.len() >= 2 && part.starts_with('{') && part.ends_with('}') {
                    PatternSegment::Parameter
                } else {
                    PatternSegment::Literal(part.to_string())
                }
            })
            .collect();

        // Header extraction wins when a non-empty header key is present.
        let source = match &config.header_key {
            Some(key) if !key.is_empty() => TokenSource::Header(key.clone()),
            _ => {
                let key = config
                    .form_key
                    .as_deref()
                    .filter(|key| !key.is_empty())
                    .unwrap_or(DEFAULT_FORM_KEY);
                TokenSource::Form(key.to_string())
            }
        };

        Self {
            method: config.method.clone(),
            segments,
            source,
            pattern: config.path.clone(),
        }
    }

    /// Whether this rule applies to a request with the given method and path.
    ///
    /// Method comparison is case-insensitive. The path is trimmed of leading
    /// and trailing slashes and split on `/`; it matches only if the segment
    /// counts are equal and every literal segment compares equal
    /// case-insensitively. Parameter segments accept any non-empty value.
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        if !self.method.eq_ignore_ascii_case(method.as_str()) {
            return false;
        }

        let parts: Vec<&str> = path.trim_matches('/').split('/').collect();
        if parts.len() != self.segments.len() {
            return false;
        }

        self.segments
            .iter()
            .zip(parts)
            .all(|(segment, part)| match segment {
                PatternSegment::Literal(literal) => literal.eq_ignore_ascii_case(part),
                PatternSegment::Parameter => !part.is_empty(),
            })
    }

    /// Extraction policy for this rule.
    pub fn token_source(&self) -> &TokenSource {
        &self.source
    }

    /// The source pattern, for logging.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
