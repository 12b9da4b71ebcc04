pub(crate) mod auth;
pub(crate) mod interactive;
pub(crate) mod resources;
pub(crate) mod system;
pub(crate) mod templates;
pub(crate) mod tenants;
pub(crate) mod traffic;
