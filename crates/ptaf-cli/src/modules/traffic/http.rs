use ptaf_core::ResourceKind;
use reqwest::Method;
use serde_json::Value;

use crate::modules::auth::{RequestError, SessionManager};
use crate::modules::system::http::response_value;

pub(crate) async fn fetch_traffic_settings(
    session: &mut SessionManager,
) -> Result<Value, RequestError> {
    let response = session
        .request(Method::GET, ResourceKind::TrafficSettings.path(), None)
        .await?;
    response.json()
}

pub(crate) async fn update_traffic_settings(
    session: &mut SessionManager,
    settings: &Value,
) -> Result<Value, RequestError> {
    let response = session
        .request(
            Method::PATCH,
            ResourceKind::TrafficSettings.path(),
            Some(settings),
        )
        .await?;
    Ok(response_value(&response))
}
