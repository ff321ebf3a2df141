pub mod admin_handlers;
pub mod auth_handlers;
pub mod crud;
pub mod mw_admin;
pub mod mw_auth;
pub mod public_handlers;
pub mod routes;
