use ptaf_core::{ListResponse, Tenant, TENANTS_PATH};
use reqwest::Method;

use crate::modules::auth::{RequestError, SessionManager};

pub(crate) async fn fetch_tenants(
    session: &mut SessionManager,
) -> Result<Vec<Tenant>, RequestError> {
    let response = session.request(Method::GET, TENANTS_PATH, None).await?;
    Ok(response.json::<ListResponse<Tenant>>()?.into_items())
}

/// Finds a tenant by exact id or case-insensitive name.
pub(crate) async fn resolve_tenant(
    session: &mut SessionManager,
    needle: &str,
) -> anyhow::Result<Tenant> {
    let tenants = fetch_tenants(session).await?;
    tenants
        .into_iter()
        .find(|tenant| tenant.matches(needle))
        .ok_or_else(|| anyhow::anyhow!("tenant not found: {needle}"))
}
