use ptaf_core::{rule_path, rules_path, ListResponse};
use reqwest::Method;
use serde_json::Value;

use crate::modules::auth::{RequestError, SessionManager};
use crate::modules::system::http::segment;

pub(crate) async fn fetch_rules(
    session: &mut SessionManager,
    template_id: &str,
) -> Result<Vec<Value>, RequestError> {
    let response = session
        .request(Method::GET, &rules_path(&segment(template_id)), None)
        .await?;
    Ok(response.json::<ListResponse<Value>>()?.into_items())
}

pub(crate) async fn update_rule(
    session: &mut SessionManager,
    template_id: &str,
    rule_id: &str,
    body: &Value,
) -> Result<(), RequestError> {
    let path = rule_path(&segment(template_id), &segment(rule_id));
    session.request(Method::PATCH, &path, Some(body)).await?;
    Ok(())
}
