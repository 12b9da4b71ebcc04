use crate::modules::auth::SessionManager;

pub(crate) struct CommandContext<'a> {
    pub(crate) session: &'a mut SessionManager,
}
