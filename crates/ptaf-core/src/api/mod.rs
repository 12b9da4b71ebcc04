pub mod auth;
pub mod list;

pub use auth::*;
pub use list::*;
