mod actions;
pub(crate) mod args;
mod http;

pub(crate) use actions::handle_traffic;
pub(crate) use http::{fetch_traffic_settings, update_traffic_settings};
