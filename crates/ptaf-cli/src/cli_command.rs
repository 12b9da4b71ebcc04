use crate::cli_args::*;
use crate::modules::interactive::handle_interactive;
use crate::modules::resources::{handle_delete, handle_export, handle_import};
use crate::modules::system::CommandContext;
use crate::modules::templates::handle_templates;
use crate::modules::tenants::handle_tenants;
use crate::modules::traffic::handle_traffic;

pub(crate) async fn handle_command(
    command: Command,
    ctx: &mut CommandContext<'_>,
) -> anyhow::Result<()> {
    match command {
        Command::Tenants => handle_tenants(ctx).await?,
        Command::Export(args) => handle_export(args, ctx).await?,
        Command::Import(args) => handle_import(args, ctx).await?,
        Command::Delete(args) => handle_delete(args, ctx).await?,
        Command::Templates(args) => handle_templates(args, ctx).await?,
        Command::Traffic(args) => handle_traffic(args, ctx).await?,
        Command::Interactive => handle_interactive(ctx).await?,
    }

    Ok(())
}
