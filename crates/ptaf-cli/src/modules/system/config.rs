use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ptaf_core::{DEFAULT_API_PATH, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS, USER_AGENT};
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read config {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("missing required config field `{0}`")]
    MissingField(&'static str),
    #[error("invalid ptaf_url `{value}`: {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("failed to load CA bundle {}: {reason}", .path.display())]
    CaBundle { path: PathBuf, reason: String },
    #[error("failed to build http client: {0}")]
    Client(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsVerify {
    Disabled,
    VerifyDefault,
    VerifyWithCustomCa(PathBuf),
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    ptaf_url: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    api_path: Option<String>,
    #[serde(default)]
    verify_ssl: bool,
    #[serde(default)]
    ssl_cert_path: Option<PathBuf>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    max_retries: Option<u32>,
}

/// Connection settings and the account credentials. Immutable once loaded.
#[derive(Clone)]
pub struct Credentials {
    base_url: Url,
    api_path: String,
    username: String,
    password: Zeroizing<String>,
    tls: TlsVerify,
    timeout: Duration,
    max_retries: u32,
}

impl Credentials {
    pub fn new(base_url: Url, username: &str, password: &str) -> Self {
        Self {
            base_url,
            api_path: DEFAULT_API_PATH.to_string(),
            username: username.to_string(),
            password: Zeroizing::new(password.to_string()),
            tls: TlsVerify::Disabled,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn tls(&self) -> &TlsVerify {
        &self.tls
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn api_root(&self) -> String {
        format!(
            "{}{}",
            self.base_url().as_str().trim_end_matches('/'),
            self.api_path()
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url.as_str())
            .field("api_path", &self.api_path)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("tls", &self.tls)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

pub(crate) fn load_credentials(path: &Path) -> Result<Credentials, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConfigFile = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let credentials = credentials_from_file(file)?;
    debug!(config = %path.display(), api_root = %credentials.api_root(), "loaded config");
    Ok(credentials)
}

fn credentials_from_file(file: ConfigFile) -> Result<Credentials, ConfigError> {
    let raw_url = required(file.ptaf_url, "ptaf_url")?;
    let base_url = parse_base_url(&raw_url)?;
    let username = required(file.username, "username")?;
    let password = required(file.password, "password")?;

    let tls = match (file.ssl_cert_path, file.verify_ssl) {
        (Some(path), _) => TlsVerify::VerifyWithCustomCa(path),
        (None, true) => TlsVerify::VerifyDefault,
        (None, false) => TlsVerify::Disabled,
    };

    let mut credentials = Credentials::new(base_url, &username, &password);
    credentials.api_path = normalize_api_path(file.api_path.as_deref().unwrap_or(DEFAULT_API_PATH));
    credentials.tls = tls;
    credentials.timeout = Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
    credentials.max_retries = file.max_retries.unwrap_or(DEFAULT_MAX_RETRIES);
    Ok(credentials)
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingField(field))
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|err| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason: err.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl {
            value: value.to_string(),
            reason: "scheme must be http or https".to_string(),
        });
    }
    Ok(url)
}

fn normalize_api_path(value: &str) -> String {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

pub(crate) fn build_client(credentials: &Credentials) -> Result<reqwest::Client, ConfigError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(credentials.timeout());
    match credentials.tls() {
        TlsVerify::Disabled => {
            builder = builder.danger_accept_invalid_certs(true);
        }
        TlsVerify::VerifyDefault => {}
        TlsVerify::VerifyWithCustomCa(path) => {
            let pem = fs::read(path).map_err(|err| ConfigError::CaBundle {
                path: path.clone(),
                reason: err.to_string(),
            })?;
            let certificate =
                reqwest::Certificate::from_pem(&pem).map_err(|err| ConfigError::CaBundle {
                    path: path.clone(),
                    reason: err.to_string(),
                })?;
            builder = builder.add_root_certificate(certificate);
        }
    }
    builder
        .build()
        .map_err(|err| ConfigError::Client(err.to_string()))
}
