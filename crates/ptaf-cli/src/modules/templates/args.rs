use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Args)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    pub command: TemplatesCommand,
}

#[derive(Subcommand)]
pub enum TemplatesCommand {
    #[command(about = "List user policy templates of a tenant")]
    List(TemplatesListArgs),
    #[command(about = "Export user policy templates with their rules")]
    Export(TemplatesExportArgs),
    #[command(about = "Copy user policy templates (and rule overrides) between tenants")]
    Copy(TemplatesCopyArgs),
}

#[derive(Args)]
pub struct TemplatesListArgs {
    #[arg(long, help = "Tenant id or name")]
    pub tenant: String,
}

#[derive(Args)]
pub struct TemplatesExportArgs {
    #[arg(long, help = "Tenant id or name")]
    pub tenant: String,
    #[arg(long, help = "Output directory (default: exports/<tenant>_<timestamp>)")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct TemplatesCopyArgs {
    #[arg(long, help = "Source tenant id or name")]
    pub from: String,
    #[arg(long, help = "Target tenant id or name")]
    pub to: String,
    #[arg(long, help = "Only copy templates with this name (repeatable)")]
    pub name: Vec<String>,
}
