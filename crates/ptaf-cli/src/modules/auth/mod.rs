mod session;
mod tenant;
pub(crate) mod types;

pub(crate) use session::{ApiResponse, SessionManager};
pub(crate) use types::{AuthError, RequestError, SwitchError};
