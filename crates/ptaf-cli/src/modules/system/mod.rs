pub(crate) mod config;
pub(crate) mod http;
pub(crate) mod types;

pub(crate) use config::{build_client, load_credentials, Credentials};
pub(crate) use types::CommandContext;
