// src/lib.rs
//
// minhaty: Arabic-first scholarship-listing site — public RTL pages plus a
// session-gated admin API, with a generic client data-access layer for the
// back office.

pub mod client;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod slug;
pub mod state;
pub mod templates;
pub mod validate;
pub mod web;
