use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use ptaf_core::{ResourceKind, Tenant};

use crate::modules::auth::SessionManager;
use crate::modules::resources::{
    export_kinds, import_items, read_snapshot, snapshot_dir, BatchReport,
};
use crate::modules::system::http::print_json;
use crate::modules::system::CommandContext;
use crate::modules::templates::{fetch_templates_with_rules, import_templates};
use crate::modules::tenants::{fetch_tenants, print_tenant_table, resolve_tenant};
use crate::modules::traffic::fetch_traffic_settings;

pub(crate) async fn handle_interactive(ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_menu(ctx.session, &mut input).await
}

/// Menu loop. The selected tenant is only remembered here; every action that
/// needs it enters the tenant through the session's scoped switch.
pub(crate) async fn run_menu<R: BufRead>(
    session: &mut SessionManager,
    input: &mut R,
) -> anyhow::Result<()> {
    let mut selected: Option<Tenant> = None;
    loop {
        print_menu(selected.as_ref());
        let Some(choice) = prompt(input, "Choice: ")? else {
            break;
        };
        let result = match choice.as_str() {
            "1" => list_tenants(session, selected.as_ref()).await,
            "2" => match select_tenant(session, input).await {
                Ok(Some(tenant)) => {
                    println!("Selected tenant {}", tenant.label());
                    selected = Some(tenant);
                    Ok(())
                }
                Ok(None) => Ok(()),
                Err(err) => Err(err),
            },
            "3" => export_tenant(session, selected.as_ref()).await,
            "4" => import_file(session, selected.as_ref(), input).await,
            "5" => copy_templates(session, selected.as_ref(), input).await,
            "6" => show_traffic(session, selected.as_ref()).await,
            "0" | "q" | "quit" | "exit" => break,
            "" => continue,
            other => {
                println!("Unknown choice: {other}");
                Ok(())
            }
        };
        if let Err(err) = result {
            eprintln!("Error: {err:#}");
        }
    }
    Ok(())
}

fn print_menu(selected: Option<&Tenant>) {
    println!();
    match selected {
        Some(tenant) => println!("Tenant: {}", tenant.label()),
        None => println!("Tenant: (none)"),
    }
    println!("1) List tenants");
    println!("2) Select tenant");
    println!("3) Export tenant snapshot");
    println!("4) Import resources from file");
    println!("5) Copy policy templates to another tenant");
    println!("6) Show traffic settings");
    println!("0) Exit");
}

fn prompt<R: BufRead>(input: &mut R, label: &str) -> anyhow::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn require_tenant(selected: Option<&Tenant>) -> anyhow::Result<&Tenant> {
    selected.ok_or_else(|| anyhow::anyhow!("no tenant selected; choose 2 first"))
}

async fn list_tenants(
    session: &mut SessionManager,
    selected: Option<&Tenant>,
) -> anyhow::Result<()> {
    let tenants = fetch_tenants(session).await?;
    print_tenant_table(&tenants, selected.map(|tenant| tenant.id.as_str()));
    Ok(())
}

async fn select_tenant<R: BufRead>(
    session: &mut SessionManager,
    input: &mut R,
) -> anyhow::Result<Option<Tenant>> {
    let Some(needle) = prompt(input, "Tenant id or name: ")? else {
        return Ok(None);
    };
    if needle.is_empty() {
        return Ok(None);
    }
    Ok(Some(resolve_tenant(session, &needle).await?))
}

async fn export_tenant(
    session: &mut SessionManager,
    selected: Option<&Tenant>,
) -> anyhow::Result<()> {
    let tenant = require_tenant(selected)?;
    let dir = snapshot_dir(None, tenant);
    let report = session
        .with_tenant(&tenant.id, async |session: &mut SessionManager| {
            export_kinds(session, &ResourceKind::ALL, &dir).await
        })
        .await?
        .settle();
    report.print("Exported");
    report.ensure_success()
}

async fn import_file<R: BufRead>(
    session: &mut SessionManager,
    selected: Option<&Tenant>,
    input: &mut R,
) -> anyhow::Result<()> {
    let tenant = require_tenant(selected)?;
    let Some(kind) = prompt(input, "Resource kind: ")? else {
        return Ok(());
    };
    let kind: ResourceKind = kind.parse().map_err(|err: String| anyhow::anyhow!(err))?;
    let Some(file) = prompt(input, "Snapshot file: ")? else {
        return Ok(());
    };
    let items = read_snapshot(&PathBuf::from(file), kind)?;
    let report = session
        .with_tenant(&tenant.id, async |session: &mut SessionManager| {
            import_items(session, kind, &items).await
        })
        .await?
        .settle();
    report.print("Imported");
    report.ensure_success()
}

async fn copy_templates<R: BufRead>(
    session: &mut SessionManager,
    selected: Option<&Tenant>,
    input: &mut R,
) -> anyhow::Result<()> {
    let source = require_tenant(selected)?;
    let Some(needle) = prompt(input, "Copy to tenant: ")? else {
        return Ok(());
    };
    let target = resolve_tenant(session, &needle).await?;
    let (templates, mut report) = session
        .with_tenant(&source.id, async |session: &mut SessionManager| {
            fetch_templates_with_rules(session).await
        })
        .await?
        .settle()
        .with_context(|| format!("failed to read templates from {}", source.label()))?;
    let copied: BatchReport = session
        .with_tenant(&target.id, async |session: &mut SessionManager| {
            import_templates(session, &templates).await
        })
        .await?
        .settle();
    report.merge(copied);
    report.print("Copied");
    report.ensure_success()
}

async fn show_traffic(
    session: &mut SessionManager,
    selected: Option<&Tenant>,
) -> anyhow::Result<()> {
    let tenant = require_tenant(selected)?;
    let settings = session
        .with_tenant(&tenant.id, async |session: &mut SessionManager| {
            fetch_traffic_settings(session).await
        })
        .await?
        .settle()?;
    print_json(&settings)
}
