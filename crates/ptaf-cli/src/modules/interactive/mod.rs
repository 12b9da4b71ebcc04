mod actions;

pub(crate) use actions::{handle_interactive, run_menu};
