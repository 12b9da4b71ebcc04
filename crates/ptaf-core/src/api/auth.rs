use serde::{Deserialize, Serialize};

/// Body of `POST /auth/refresh_tokens`.
#[derive(Debug, Serialize)]
pub struct RefreshTokensRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub fingerprint: &'a str,
}

/// Body of `POST /auth/access_tokens`; mints a token pair scoped to `tenant_id`.
#[derive(Debug, Serialize)]
pub struct AccessTokensRequest<'a> {
    pub refresh_token: &'a str,
    pub tenant_id: &'a str,
    pub fingerprint: &'a str,
}

#[derive(Clone, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}
