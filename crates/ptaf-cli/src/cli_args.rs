use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use crate::modules::resources::args::*;
pub use crate::modules::templates::args::*;
pub use crate::modules::traffic::args::*;

#[derive(Parser)]
#[command(name = "ptaf")]
#[command(about = "PT AF multi-tenant administration CLI")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        env = "PTAF_CONFIG",
        default_value = "config.json",
        help = "Path to the JSON config file"
    )]
    pub config: PathBuf,
    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "List tenants available to the account")]
    Tenants,
    #[command(about = "Export tenant resources to JSON files")]
    Export(ExportArgs),
    #[command(about = "Create resources in a tenant from a file or another tenant")]
    Import(ImportArgs),
    #[command(about = "Delete resources from a tenant")]
    Delete(DeleteArgs),
    #[command(about = "Work with user policy templates")]
    Templates(TemplatesArgs),
    #[command(about = "Work with traffic settings")]
    Traffic(TrafficArgs),
    #[command(about = "Start the interactive menu")]
    Interactive,
}
