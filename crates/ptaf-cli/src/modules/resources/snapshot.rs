use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use ptaf_core::{ListResponse, ResourceKind, Tenant};
use serde_json::Value;
use tracing::debug;

const EXPORT_ROOT: &str = "exports";

/// `out` when given, else `exports/<tenant>_<timestamp>`.
pub(crate) fn snapshot_dir(out: Option<PathBuf>, tenant: &Tenant) -> PathBuf {
    out.unwrap_or_else(|| {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        Path::new(EXPORT_ROOT).join(format!("{}_{stamp}", safe_name(tenant.label())))
    })
}

fn safe_name(value: &str) -> String {
    value
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// Writes `<dir>/<kind>.json`. Singletons are written as an object, collections as an array.
pub(crate) fn write_snapshot(
    dir: &Path,
    kind: ResourceKind,
    items: &[Value],
) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(kind.file_name());
    let document = match (kind.is_singleton(), items) {
        (true, [single]) => single.clone(),
        _ => Value::Array(items.to_vec()),
    };
    fs::write(&path, serde_json::to_string_pretty(&document)?)?;
    debug!(path = %path.display(), count = items.len(), "wrote snapshot");
    Ok(path)
}

/// Reads a snapshot file back into items. Accepts a bare array, an
/// `{"items": [...]}` page, or (for singletons) a single object.
pub(crate) fn read_snapshot(path: &Path, kind: ResourceKind) -> anyhow::Result<Vec<Value>> {
    let contents = fs::read_to_string(path)
        .map_err(|err| anyhow::anyhow!("failed to read {}: {err}", path.display()))?;
    let document: Value = serde_json::from_str(&contents)
        .map_err(|err| anyhow::anyhow!("invalid JSON in {}: {err}", path.display()))?;
    if kind.is_singleton() && document.is_object() {
        return Ok(vec![document]);
    }
    let items: ListResponse<Value> = serde_json::from_value(document).map_err(|_| {
        anyhow::anyhow!(
            "{} must contain a JSON array or an object with `items`",
            path.display()
        )
    })?;
    Ok(items.into_items())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptaf_core::TenantId;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn collections_roundtrip_through_files() {
        let dir = tempdir().expect("tempdir");
        let items = vec![json!({"name": "a"}), json!({"name": "b"})];
        let path = write_snapshot(dir.path(), ResourceKind::Actions, &items).expect("write");
        assert!(path.ends_with("actions.json"));
        let loaded = read_snapshot(&path, ResourceKind::Actions).expect("read");
        assert_eq!(loaded, items);
    }

    #[test]
    fn singleton_is_written_as_object() {
        let dir = tempdir().expect("tempdir");
        let settings = json!({"http_port": 80});
        let path = write_snapshot(
            dir.path(),
            ResourceKind::TrafficSettings,
            std::slice::from_ref(&settings),
        )
        .expect("write");
        let raw: Value =
            serde_json::from_str(&fs::read_to_string(&path).expect("read file")).expect("json");
        assert_eq!(raw, settings);
        let loaded = read_snapshot(&path, ResourceKind::TrafficSettings).expect("read");
        assert_eq!(loaded, vec![settings]);
    }

    #[test]
    fn paged_documents_are_accepted() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("roles.json");
        fs::write(&path, r#"{"items": [{"name": "auditor"}], "total": 1}"#).expect("write");
        let loaded = read_snapshot(&path, ResourceKind::Roles).expect("read");
        assert_eq!(loaded, vec![json!({"name": "auditor"})]);
    }

    #[test]
    fn scalar_documents_are_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("actions.json");
        fs::write(&path, "42").expect("write");
        assert!(read_snapshot(&path, ResourceKind::Actions).is_err());
    }

    #[test]
    fn default_dir_uses_safe_tenant_name() {
        let tenant = Tenant {
            id: TenantId::new("t-1"),
            name: "Prod / EU".to_string(),
            description: None,
        };
        let dir = snapshot_dir(None, &tenant);
        let name = dir
            .file_name()
            .and_then(|name| name.to_str())
            .expect("dir name");
        assert!(dir.starts_with(EXPORT_ROOT));
        assert!(name.starts_with("Prod___EU_"));
        assert_eq!(
            snapshot_dir(Some(PathBuf::from("/tmp/out")), &tenant),
            PathBuf::from("/tmp/out")
        );
    }
}
