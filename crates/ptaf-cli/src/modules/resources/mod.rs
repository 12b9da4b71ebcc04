mod actions;
pub(crate) mod args;
mod http;
mod snapshot;
pub(crate) mod types;

pub(crate) use actions::{
    export_kinds, handle_delete, handle_export, handle_import, import_items,
};
pub(crate) use http::{create_resource, list_resources};
pub(crate) use snapshot::{read_snapshot, snapshot_dir, write_snapshot};
pub(crate) use types::{item_label, BatchReport};
