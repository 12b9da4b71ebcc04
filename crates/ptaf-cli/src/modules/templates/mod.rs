mod actions;
pub(crate) mod args;
mod http;

pub(crate) use actions::{fetch_templates_with_rules, handle_templates, import_templates};
