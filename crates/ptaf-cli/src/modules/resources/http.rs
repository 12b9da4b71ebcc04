use ptaf_core::{ListResponse, ResourceKind};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::modules::auth::{RequestError, SessionManager};
use crate::modules::system::http::{response_value, segment};

pub(crate) async fn list_resources(
    session: &mut SessionManager,
    kind: ResourceKind,
) -> Result<Vec<Value>, RequestError> {
    let response = session.request(Method::GET, kind.path(), None).await?;
    Ok(response.json::<ListResponse<Value>>()?.into_items())
}

pub(crate) async fn create_resource(
    session: &mut SessionManager,
    kind: ResourceKind,
    body: &Value,
) -> Result<Value, RequestError> {
    let response = session.request(Method::POST, kind.path(), Some(body)).await?;
    Ok(response_value(&response))
}

pub(crate) async fn delete_resource(
    session: &mut SessionManager,
    kind: ResourceKind,
    id: &str,
) -> Result<(), RequestError> {
    let response = session
        .request(Method::DELETE, &kind.item_path(&segment(id)), None)
        .await?;
    debug!(kind = %kind, id, status = %response.status(), "deleted resource");
    Ok(())
}
