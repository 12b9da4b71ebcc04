use ptaf_core::Tenant;

use super::http::fetch_tenants;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_tenants(ctx: &mut CommandContext<'_>) -> anyhow::Result<()> {
    let tenants = fetch_tenants(ctx.session).await?;
    print_tenant_table(&tenants, ctx.session.current_tenant().map(|id| id.as_str()));
    Ok(())
}

pub(crate) fn print_tenant_table(tenants: &[Tenant], selected: Option<&str>) {
    if tenants.is_empty() {
        println!("No tenants available");
        return;
    }
    let id_width = tenants
        .iter()
        .map(|tenant| tenant.id.as_str().len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    println!("  {:<id_width$}  NAME", "ID", id_width = id_width);
    for tenant in tenants {
        let marker = if selected == Some(tenant.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {:<id_width$}  {}",
            tenant.id.as_str(),
            tenant.name,
            id_width = id_width
        );
    }
}
