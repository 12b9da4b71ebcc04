use ptaf_core::TenantId;
use reqwest::StatusCode;
use thiserror::Error;

const BODY_EXCERPT_CHARS: usize = 200;

/// Random per-process value bound into every token request.
#[derive(Clone, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Fingerprint").field(&self.0).finish()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token request rejected: {status} {}", excerpt(.body))]
    Rejected { status: StatusCode, body: String },
    #[error("token endpoint unreachable: {0}")]
    Unreachable(String),
    #[error("no refresh token; authenticate first")]
    NoRefreshToken,
    #[error("malformed token response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("authentication failed after {attempts} attempt(s)")]
    AuthFailed {
        attempts: u32,
        #[source]
        source: Option<AuthError>,
    },
    #[error("server unreachable: {0}")]
    Unreachable(String),
    #[error("request rejected: {status} {}", excerpt(.body))]
    Rejected { status: StatusCode, body: String },
    #[error("malformed response body: {0}")]
    MalformedResponse(String),
}

impl RequestError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("failed to switch to tenant {tenant}")]
    Rejected {
        tenant: TenantId,
        #[source]
        source: AuthError,
    },
}

pub(crate) fn excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

pub(crate) fn describe_transport_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_32_hex_chars() {
        let fingerprint = Fingerprint::generate();
        assert_eq!(fingerprint.as_str().len(), 32);
        assert!(fingerprint
            .as_str()
            .chars()
            .all(|ch| ch.is_ascii_hexdigit()));
        assert_ne!(fingerprint, Fingerprint::generate());
    }

    #[test]
    fn excerpt_truncates_long_bodies() {
        let body = "x".repeat(500);
        let short = excerpt(&body);
        assert_eq!(short.len(), BODY_EXCERPT_CHARS + 3);
        assert!(short.ends_with("..."));
        assert_eq!(excerpt("  small  "), "small");
    }

    #[test]
    fn rejected_error_mentions_status_and_body() {
        let err = RequestError::Rejected {
            status: StatusCode::FORBIDDEN,
            body: "{\"detail\":\"nope\"}".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("nope"));
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    }
}
