use std::path::{Path, PathBuf};

use anyhow::Context;
use ptaf_core::{resource_id, strip_read_only, ResourceKind};
use reqwest::StatusCode;
use serde_json::Value;

use super::http::{create_resource, delete_resource, list_resources};
use super::snapshot::{read_snapshot, snapshot_dir, write_snapshot};
use super::types::{item_label, BatchReport};
use crate::cli_args::*;
use crate::modules::auth::SessionManager;
use crate::modules::system::CommandContext;
use crate::modules::templates::{fetch_templates_with_rules, import_templates};
use crate::modules::tenants::resolve_tenant;
use crate::modules::traffic::{fetch_traffic_settings, update_traffic_settings};

pub(crate) async fn handle_export(
    args: ExportArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    let tenant = resolve_tenant(ctx.session, &args.tenant).await?;
    let kinds = if args.kind.is_empty() {
        ResourceKind::ALL.to_vec()
    } else {
        args.kind
    };
    let dir = snapshot_dir(args.out, &tenant);
    let report = ctx
        .session
        .with_tenant(&tenant.id, async |session: &mut SessionManager| {
            export_kinds(session, &kinds, &dir).await
        })
        .await?
        .settle();
    report.print("Exported");
    println!("Snapshot of {} in {}", tenant.label(), dir.display());
    report.ensure_success()
}

/// Writes one snapshot file per kind into `dir`. A kind that cannot be read
/// is reported and skipped.
pub(crate) async fn export_kinds(
    session: &mut SessionManager,
    kinds: &[ResourceKind],
    dir: &Path,
) -> BatchReport {
    let mut report = BatchReport::default();
    for kind in kinds {
        match export_kind(session, *kind, dir).await {
            Ok((path, skipped)) => {
                report.record_success(format!("{kind} -> {}", path.display()));
                report.merge(skipped);
            }
            Err(err) => report.record_failure(kind.to_string(), &err),
        }
    }
    report
}

async fn export_kind(
    session: &mut SessionManager,
    kind: ResourceKind,
    dir: &Path,
) -> anyhow::Result<(PathBuf, BatchReport)> {
    let (items, skipped) = collect_items(session, kind).await?;
    Ok((write_snapshot(dir, kind, &items)?, skipped))
}

/// Reads every item of `kind` from the current tenant. Items that could only
/// be read partially are left out and listed in the report.
pub(crate) async fn collect_items(
    session: &mut SessionManager,
    kind: ResourceKind,
) -> anyhow::Result<(Vec<Value>, BatchReport)> {
    let collected = match kind {
        ResourceKind::PolicyTemplates => fetch_templates_with_rules(session).await?,
        ResourceKind::TrafficSettings => (
            vec![fetch_traffic_settings(session).await?],
            BatchReport::default(),
        ),
        _ => (
            list_resources(session, kind)
                .await
                .with_context(|| format!("failed to list {kind}"))?,
            BatchReport::default(),
        ),
    };
    Ok(collected)
}

pub(crate) async fn handle_import(
    args: ImportArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    let target = resolve_tenant(ctx.session, &args.tenant).await?;
    let kind = args.kind;
    let (items, mut report) = match (args.file, args.from_tenant) {
        (Some(path), None) => (read_snapshot(&path, kind)?, BatchReport::default()),
        (None, Some(source)) => {
            let source = resolve_tenant(ctx.session, &source).await?;
            ctx.session
                .with_tenant(&source.id, async |session: &mut SessionManager| {
                    collect_items(session, kind).await
                })
                .await?
                .settle()
                .with_context(|| format!("failed to read {kind} from {}", source.label()))?
        }
        _ => anyhow::bail!("use either --file or --from-tenant"),
    };
    if items.is_empty() {
        println!("Nothing to import");
        report.print_failures();
        return report.ensure_success();
    }

    let imported = ctx
        .session
        .with_tenant(&target.id, async |session: &mut SessionManager| {
            import_items(session, kind, &items).await
        })
        .await?
        .settle();
    report.merge(imported);
    report.print("Imported");
    report.ensure_success()
}

/// Submits `items` to the current tenant after stripping server-owned fields.
pub(crate) async fn import_items(
    session: &mut SessionManager,
    kind: ResourceKind,
    items: &[Value],
) -> BatchReport {
    match kind {
        ResourceKind::PolicyTemplates => import_templates(session, items).await,
        ResourceKind::TrafficSettings => {
            let mut report = BatchReport::default();
            for item in items {
                let mut body = item.clone();
                strip_read_only(kind, &mut body);
                match update_traffic_settings(session, &body).await {
                    Ok(_) => report.record_success(kind.to_string()),
                    Err(err) => report.record_failure(kind.to_string(), &err),
                }
            }
            report
        }
        _ => {
            let mut report = BatchReport::default();
            for (index, item) in items.iter().enumerate() {
                let label = item_label(item, index);
                let mut body = item.clone();
                strip_read_only(kind, &mut body);
                match create_resource(session, kind, &body).await {
                    Ok(_) => report.record_success(label),
                    Err(err) if err.status() == Some(StatusCode::CONFLICT) => {
                        report.record_failure(label, &"already exists in the target tenant")
                    }
                    Err(err) => report.record_failure(label, &err),
                }
            }
            report
        }
    }
}

pub(crate) async fn handle_delete(
    args: DeleteArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    if args.kind.is_singleton() {
        anyhow::bail!("{} cannot be deleted", args.kind);
    }
    let tenant = resolve_tenant(ctx.session, &args.tenant).await?;
    let kind = args.kind;
    let report = ctx
        .session
        .with_tenant(&tenant.id, async |session: &mut SessionManager| {
            let ids: Vec<String> = if args.all {
                list_resources(session, kind)
                    .await?
                    .iter()
                    .filter_map(|item| resource_id(item).map(str::to_string))
                    .collect()
            } else {
                args.id.clone()
            };
            let mut report = BatchReport::default();
            for id in ids {
                match delete_resource(session, kind, &id).await {
                    Ok(()) => report.record_success(id),
                    Err(err) => report.record_failure(id, &err),
                }
            }
            Ok::<_, anyhow::Error>(report)
        })
        .await?
        .settle()?;
    report.print("Deleted");
    report.ensure_success()
}
