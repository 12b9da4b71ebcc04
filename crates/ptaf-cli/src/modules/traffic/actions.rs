use anyhow::Context;
use ptaf_core::{strip_read_only, ResourceKind};

use super::http::{fetch_traffic_settings, update_traffic_settings};
use crate::cli_args::*;
use crate::modules::auth::SessionManager;
use crate::modules::resources::{read_snapshot, snapshot_dir, write_snapshot};
use crate::modules::system::http::print_json;
use crate::modules::system::CommandContext;
use crate::modules::tenants::resolve_tenant;

const KIND: ResourceKind = ResourceKind::TrafficSettings;

pub(crate) async fn handle_traffic(
    args: TrafficArgs,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match args.command {
        TrafficCommand::Show(args) => {
            let tenant = resolve_tenant(ctx.session, &args.tenant).await?;
            let settings = ctx
                .session
                .with_tenant(&tenant.id, async |session: &mut SessionManager| {
                    fetch_traffic_settings(session).await
                })
                .await?
                .settle()?;
            print_json(&settings)?;
        }
        TrafficCommand::Export(args) => {
            let tenant = resolve_tenant(ctx.session, &args.tenant).await?;
            let dir = snapshot_dir(args.out, &tenant);
            let settings = ctx
                .session
                .with_tenant(&tenant.id, async |session: &mut SessionManager| {
                    fetch_traffic_settings(session).await
                })
                .await?
                .settle()?;
            let path = write_snapshot(&dir, KIND, std::slice::from_ref(&settings))?;
            println!("Wrote {}", path.display());
        }
        TrafficCommand::Import(args) => {
            let tenant = resolve_tenant(ctx.session, &args.tenant).await?;
            let mut items = read_snapshot(&args.file, KIND)?;
            let Some(mut settings) = items.pop() else {
                anyhow::bail!("{} holds no traffic settings", args.file.display());
            };
            strip_read_only(KIND, &mut settings);
            ctx.session
                .with_tenant(&tenant.id, async |session: &mut SessionManager| {
                    update_traffic_settings(session, &settings).await
                })
                .await?
                .settle()
                .with_context(|| format!("failed to apply traffic settings to {}", tenant.label()))?;
            println!("Traffic settings applied to {}", tenant.label());
        }
        TrafficCommand::Copy(args) => {
            let source = resolve_tenant(ctx.session, &args.from).await?;
            let target = resolve_tenant(ctx.session, &args.to).await?;
            let mut settings = ctx
                .session
                .with_tenant(&source.id, async |session: &mut SessionManager| {
                    fetch_traffic_settings(session).await
                })
                .await?
                .settle()
                .with_context(|| format!("failed to read traffic settings of {}", source.label()))?;
            strip_read_only(KIND, &mut settings);
            ctx.session
                .with_tenant(&target.id, async |session: &mut SessionManager| {
                    update_traffic_settings(session, &settings).await
                })
                .await?
                .settle()
                .with_context(|| format!("failed to apply traffic settings to {}", target.label()))?;
            println!(
                "Traffic settings copied from {} to {}",
                source.label(),
                target.label()
            );
        }
    }
    Ok(())
}
