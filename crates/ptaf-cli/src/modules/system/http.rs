use serde::Serialize;

use crate::modules::auth::ApiResponse;

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Decodes a response that may legitimately be empty (204, or `{}` on update).
pub(crate) fn response_value(response: &ApiResponse) -> serde_json::Value {
    if response.body().trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(response.body()).unwrap_or(serde_json::Value::Null)
}

/// Path segment for a server-assigned id.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
