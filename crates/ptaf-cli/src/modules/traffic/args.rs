use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Args)]
pub struct TrafficArgs {
    #[command(subcommand)]
    pub command: TrafficCommand,
}

#[derive(Subcommand)]
pub enum TrafficCommand {
    #[command(about = "Print the traffic settings of a tenant")]
    Show(TrafficTenantArgs),
    #[command(about = "Save the traffic settings of a tenant to a file")]
    Export(TrafficExportArgs),
    #[command(about = "Apply traffic settings from a file")]
    Import(TrafficImportArgs),
    #[command(about = "Copy traffic settings from one tenant to another")]
    Copy(TrafficCopyArgs),
}

#[derive(Args)]
pub struct TrafficTenantArgs {
    #[arg(long, help = "Tenant id or name")]
    pub tenant: String,
}

#[derive(Args)]
pub struct TrafficExportArgs {
    #[arg(long, help = "Tenant id or name")]
    pub tenant: String,
    #[arg(long, help = "Output directory (default: exports/<tenant>_<timestamp>)")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct TrafficImportArgs {
    #[arg(long, help = "Tenant id or name")]
    pub tenant: String,
    #[arg(long, help = "traffic_settings.json snapshot")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct TrafficCopyArgs {
    #[arg(long, help = "Source tenant id or name")]
    pub from: String,
    #[arg(long, help = "Target tenant id or name")]
    pub to: String,
}
