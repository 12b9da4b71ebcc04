use std::path::PathBuf;

use clap::{ArgGroup, Args};
use ptaf_core::ResourceKind;

#[derive(Args)]
pub struct ExportArgs {
    #[arg(long, help = "Tenant id or name")]
    pub tenant: String,
    #[arg(
        long,
        help = "Resource kind to export (repeatable; default: all)",
        value_delimiter = ','
    )]
    pub kind: Vec<ResourceKind>,
    #[arg(long, help = "Output directory (default: exports/<tenant>_<timestamp>)")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "from_tenant"])))]
pub struct ImportArgs {
    #[arg(long, help = "Target tenant id or name")]
    pub tenant: String,
    #[arg(long, help = "Resource kind to import")]
    pub kind: ResourceKind,
    #[arg(long, help = "Snapshot file to read")]
    pub file: Option<PathBuf>,
    #[arg(long, help = "Copy the items live from this tenant instead of a file")]
    pub from_tenant: Option<String>,
}

#[derive(Args)]
#[command(group(ArgGroup::new("targets").required(true).args(["id", "all"])))]
pub struct DeleteArgs {
    #[arg(long, help = "Tenant id or name")]
    pub tenant: String,
    #[arg(long, help = "Resource kind to delete from")]
    pub kind: ResourceKind,
    #[arg(long, help = "Resource id (repeatable)")]
    pub id: Vec<String>,
    #[arg(long, help = "Delete every item of this kind")]
    pub all: bool,
}
