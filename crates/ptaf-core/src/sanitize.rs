use serde_json::Value;

use crate::models::ResourceKind;

/// Keys every resource carries that the server assigns itself.
pub const COMMON_READ_ONLY_FIELDS: &[&str] = &[
    "id",
    "tenant_id",
    "created",
    "updated",
    "created_at",
    "updated_at",
];

/// Removes server-owned keys so an exported object can be submitted again.
pub fn strip_read_only(kind: ResourceKind, value: &mut Value) {
    strip_fields(value, COMMON_READ_ONLY_FIELDS);
    strip_fields(value, kind.read_only_fields());
}

pub fn strip_fields(value: &mut Value, fields: &[&str]) {
    if let Value::Object(map) = value {
        for field in fields {
            map.remove(*field);
        }
    }
}

/// Rule bodies keep everything but the identity keys.
pub fn strip_rule(value: &mut Value) {
    strip_fields(value, COMMON_READ_ONLY_FIELDS);
}

pub fn resource_id(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

pub fn resource_name(value: &Value) -> Option<&str> {
    value.get("name").and_then(Value::as_str)
}
