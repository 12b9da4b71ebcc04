pub const DEFAULT_API_PATH: &str = "/api/ptaf/v4";
pub const USER_AGENT: &str = concat!("ptaf-cli/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const REFRESH_TOKENS_PATH: &str = "/auth/refresh_tokens";
pub const ACCESS_TOKENS_PATH: &str = "/auth/access_tokens";
pub const TENANTS_PATH: &str = "/auth/account/tenants";
