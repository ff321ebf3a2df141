// src/client/mod.rs
//
// Data-access layer for admin front ends. Implemented once, generically,
// instead of once per entity screen: response parsing happens at this
// boundary only, list caches are versioned so mutations can invalidate
// them deterministically, and destructive actions go through an explicit
// confirmation flow.

pub mod auth;
pub mod delete;
pub mod payload;
pub mod resource;

pub use auth::{AuthGate, AuthState};
pub use delete::DeleteFlow;
pub use payload::{parse_item, parse_list, ItemEnvelope, ListPayload};
pub use resource::{CacheRegistry, ResourceClient, ResourceSpec, Transport};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with `success: false`; the message is shown to
    /// the user verbatim.
    #[error("{0}")]
    Api(String),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The submit control is gated while a mutation is in flight. There is
    /// no idempotency key: a user who retries after a timeout may still
    /// create a duplicate record.
    #[error("a mutation is already in flight")]
    MutationInFlight,

    #[error("no entity selected for deletion")]
    NothingSelected,
}
