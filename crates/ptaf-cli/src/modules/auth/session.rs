use std::time::Instant;

use ptaf_core::{
    AccessTokensRequest, RefreshTokensRequest, TenantId, TokenPair, ACCESS_TOKENS_PATH,
    REFRESH_TOKENS_PATH,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::types::{describe_transport_error, AuthError, Fingerprint, RequestError};
use crate::modules::system::Credentials;

const JSON: &str = "application/json";

/// Tokens and tenant slot. Only [`SessionManager`] reads or writes these.
#[derive(Default)]
struct TokenState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    tenant_id: Option<TenantId>,
}

/// Result of a single HTTP attempt, before the retry policy is applied.
#[derive(Debug)]
enum RequestOutcome {
    Success { status: StatusCode, body: String },
    TransientFailure { status: StatusCode, body: String },
    Failure { status: StatusCode, body: String },
    NetworkFailure(String),
    NoResponse(String),
}

impl RequestOutcome {
    fn classify(status: StatusCode, body: String, tenant_selected: bool) -> Self {
        if status.is_success() {
            RequestOutcome::Success { status, body }
        } else if status == StatusCode::UNAUTHORIZED
            || (status == StatusCode::NOT_FOUND && tenant_selected)
        {
            RequestOutcome::TransientFailure { status, body }
        } else {
            RequestOutcome::Failure { status, body }
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    pub(crate) fn status(&self) -> StatusCode {
        self.status
    }

    pub(crate) fn body(&self) -> &str {
        &self.body
    }

    pub(crate) fn json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        serde_json::from_str(&self.body)
            .map_err(|err| RequestError::MalformedResponse(err.to_string()))
    }
}

/// Owns the credentials, the per-process fingerprint and the token state, and
/// drives every API call through the re-authentication policy.
pub(crate) struct SessionManager {
    client: reqwest::Client,
    credentials: Credentials,
    fingerprint: Fingerprint,
    tokens: TokenState,
    max_retries: u32,
}

impl SessionManager {
    pub(crate) fn new(client: reqwest::Client, credentials: Credentials) -> Self {
        let max_retries = credentials.max_retries();
        Self {
            client,
            credentials,
            fingerprint: Fingerprint::generate(),
            tokens: TokenState::default(),
            max_retries,
        }
    }

    pub(crate) fn current_tenant(&self) -> Option<&TenantId> {
        self.tokens.tenant_id.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    #[cfg(test)]
    pub(crate) fn access_token(&self) -> Option<&str> {
        self.tokens.access_token.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn refresh_token(&self) -> Option<&str> {
        self.tokens.refresh_token.as_deref()
    }

    /// Moves the tenant slot outside the guard; tests use it to set up a scope.
    #[cfg(test)]
    pub(crate) async fn enter_tenant(&mut self, tenant: &TenantId) -> Result<(), AuthError> {
        self.switch_tenant(tenant).await
    }

    #[cfg(test)]
    pub(crate) fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.credentials.api_root(), path)
    }

    /// Exchanges username and password for a fresh token pair. Never retries.
    pub(crate) async fn authenticate(&mut self) -> Result<(), AuthError> {
        let url = self.endpoint(REFRESH_TOKENS_PATH);
        let payload = RefreshTokensRequest {
            username: self.credentials.username(),
            password: self.credentials.password(),
            fingerprint: self.fingerprint.as_str(),
        };
        let pair = self.acquire_tokens(&url, &payload).await?;
        self.tokens.access_token = Some(pair.access_token);
        self.tokens.refresh_token = Some(pair.refresh_token);
        debug!(user = %self.credentials.username(), "authenticated");
        Ok(())
    }

    /// Mints a token pair scoped to `tenant`. The tenant slot and the tokens
    /// change together, and only when the server accepts the switch.
    pub(super) async fn switch_tenant(&mut self, tenant: &TenantId) -> Result<(), AuthError> {
        let refresh_token = self
            .tokens
            .refresh_token
            .as_deref()
            .ok_or(AuthError::NoRefreshToken)?;
        let url = self.endpoint(ACCESS_TOKENS_PATH);
        let payload = AccessTokensRequest {
            refresh_token,
            tenant_id: tenant.as_str(),
            fingerprint: self.fingerprint.as_str(),
        };
        let pair = self.acquire_tokens(&url, &payload).await?;
        self.tokens.access_token = Some(pair.access_token);
        self.tokens.refresh_token = Some(pair.refresh_token);
        self.tokens.tenant_id = Some(tenant.clone());
        debug!(tenant = %tenant, "switched tenant");
        Ok(())
    }

    async fn acquire_tokens<P: Serialize>(
        &self,
        url: &str,
        payload: &P,
    ) -> Result<TokenPair, AuthError> {
        let response = self
            .client
            .post(url)
            .header(ACCEPT, JSON)
            .json(payload)
            .send()
            .await
            .map_err(|err| AuthError::Unreachable(describe_transport_error(&err)))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AuthError::Unreachable(describe_transport_error(&err)))?;
        if status != StatusCode::CREATED {
            return Err(AuthError::Rejected { status, body });
        }
        serde_json::from_str(&body).map_err(|err| AuthError::MalformedResponse(err.to_string()))
    }

    /// Issues `method path` against the API root.
    ///
    /// A 401 re-authenticates (and re-derives the tenant token when a tenant
    /// is selected) and retries, up to `max_retries` times. A 404 while a
    /// tenant is selected is treated as a possibly stale tenant token: the
    /// session re-authenticates, switches back into the tenant and retries
    /// once. A genuinely missing resource is indistinguishable from that case
    /// and costs one extra refresh cycle before the 404 is returned. Transport
    /// failures are never retried here.
    pub(crate) async fn request(
        &mut self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse, RequestError> {
        let url = self.endpoint(path);
        let mut attempts: u32 = 0;
        let mut tenant_recovered = false;
        loop {
            attempts += 1;
            let headers = self.resource_headers(attempts)?;
            let outcome = self.attempt(&method, &url, headers, body, attempts).await;
            let (status, response_body) = match outcome {
                RequestOutcome::Success { status, body } => {
                    return Ok(ApiResponse { status, body });
                }
                RequestOutcome::Failure { status, body } => {
                    return Err(RequestError::Rejected { status, body });
                }
                RequestOutcome::NetworkFailure(reason) | RequestOutcome::NoResponse(reason) => {
                    return Err(RequestError::Unreachable(reason));
                }
                RequestOutcome::TransientFailure { status, body } => (status, body),
            };

            let retries_left = attempts <= self.max_retries;
            if status == StatusCode::UNAUTHORIZED {
                if !retries_left {
                    return Err(RequestError::AuthFailed {
                        attempts,
                        source: None,
                    });
                }
                info!(method = %method, path = %path, attempt = attempts, "unauthorized; re-authenticating");
                self.reauthenticate()
                    .await
                    .map_err(|source| RequestError::AuthFailed {
                        attempts,
                        source: Some(source),
                    })?;
            } else {
                if tenant_recovered || !retries_left {
                    return Err(RequestError::Rejected {
                        status,
                        body: response_body,
                    });
                }
                tenant_recovered = true;
                info!(method = %method, path = %path, "not found inside tenant; refreshing tenant token");
                self.reauthenticate()
                    .await
                    .map_err(|source| RequestError::AuthFailed {
                        attempts,
                        source: Some(source),
                    })?;
            }
        }
    }

    /// Logs in again and, inside a tenant, re-derives the tenant token. If the
    /// re-switch fails the previous tenant-scoped pair is put back, so the
    /// tenant slot never sits next to an unscoped login token.
    async fn reauthenticate(&mut self) -> Result<(), AuthError> {
        let Some(tenant) = self.tokens.tenant_id.clone() else {
            return self.authenticate().await;
        };
        let scoped_access = self.tokens.access_token.clone();
        let scoped_refresh = self.tokens.refresh_token.clone();
        self.authenticate().await?;
        if let Err(err) = self.switch_tenant(&tenant).await {
            warn!(tenant = %tenant, error = %err, "tenant token not renewed; keeping previous tenant tokens");
            self.tokens.access_token = scoped_access;
            self.tokens.refresh_token = scoped_refresh;
            return Err(err);
        }
        Ok(())
    }

    async fn attempt(
        &self,
        method: &Method,
        url: &str,
        headers: HeaderMap,
        body: Option<&serde_json::Value>,
        attempt: u32,
    ) -> RequestOutcome {
        let builder = self.client.request(method.clone(), url).headers(headers);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        debug!(method = %method, url = %url, attempt, "http request");
        let start = Instant::now();
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => return RequestOutcome::NetworkFailure(describe_transport_error(&err)),
        };
        let status = response.status();
        debug!(
            method = %method,
            url = %url,
            status = %status,
            elapsed_ms = start.elapsed().as_millis(),
            "http response"
        );
        match response.text().await {
            Ok(text) => RequestOutcome::classify(status, text, self.tokens.tenant_id.is_some()),
            Err(err) => RequestOutcome::NoResponse(describe_transport_error(&err)),
        }
    }

    fn resource_headers(&self, attempts: u32) -> Result<HeaderMap, RequestError> {
        let token = self.tokens.access_token.as_deref().unwrap_or_default();
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            RequestError::AuthFailed {
                attempts,
                source: Some(AuthError::MalformedResponse(
                    "access token is not a valid header value".to_string(),
                )),
            }
        })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        Ok(headers)
    }
}
