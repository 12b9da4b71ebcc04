mod actions;
mod http;

pub(crate) use actions::{handle_tenants, print_tenant_table};
pub(crate) use http::{fetch_tenants, resolve_tenant};
