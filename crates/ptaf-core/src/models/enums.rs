use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Actions,
    Backends,
    Roles,
    PolicyTemplates,
    TrafficSettings,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Actions,
        ResourceKind::Backends,
        ResourceKind::Roles,
        ResourceKind::PolicyTemplates,
        ResourceKind::TrafficSettings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Actions => "actions",
            ResourceKind::Backends => "backends",
            ResourceKind::Roles => "roles",
            ResourceKind::PolicyTemplates => "policy_templates",
            ResourceKind::TrafficSettings => "traffic_settings",
        }
    }

    /// Path relative to the API root.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Actions => "/config/actions",
            ResourceKind::Backends => "/config/backends",
            ResourceKind::Roles => "/auth/roles",
            ResourceKind::PolicyTemplates => "/config/policies/templates/user",
            ResourceKind::TrafficSettings => "/config/traffic_settings",
        }
    }

    pub fn item_path(self, id: &str) -> String {
        format!("{}/{}", self.path(), id)
    }

    pub fn is_singleton(self) -> bool {
        matches!(self, ResourceKind::TrafficSettings)
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.as_str())
    }

    /// Keys the server owns for this kind, on top of [`crate::COMMON_READ_ONLY_FIELDS`].
    pub fn read_only_fields(self) -> &'static [&'static str] {
        match self {
            ResourceKind::PolicyTemplates => &["rules", "is_system"],
            ResourceKind::Roles => &["is_builtin"],
            ResourceKind::Actions | ResourceKind::Backends | ResourceKind::TrafficSettings => &[],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "actions" => Ok(ResourceKind::Actions),
            "backends" => Ok(ResourceKind::Backends),
            "roles" => Ok(ResourceKind::Roles),
            "policy_templates" | "templates" | "policies" => Ok(ResourceKind::PolicyTemplates),
            "traffic_settings" | "traffic" => Ok(ResourceKind::TrafficSettings),
            _ => Err(format!("unknown resource kind: {value}")),
        }
    }
}

pub fn rules_path(template_id: &str) -> String {
    format!("{}/{}/rules", ResourceKind::PolicyTemplates.path(), template_id)
}

pub fn rule_path(template_id: &str, rule_id: &str) -> String {
    format!("{}/{}", rules_path(template_id), rule_id)
}
