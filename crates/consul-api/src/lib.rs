//! Typed wire models for the Consul v1 HTTP API.
//!
//! One module per endpoint group. Field names carry `#[serde(rename)]`
//! attributes matching the PascalCase keys Consul puts on the wire; binary
//! fields (KV values, event payloads) are transported base64-encoded and
//! exposed here as raw bytes.

pub mod acl;
pub mod agent;
pub mod catalog;
pub mod coordinate;
pub mod event;
pub mod health;
pub mod kv;
pub mod operator;
pub mod query;
pub mod serde_ext;
pub mod session;
pub mod txn;

use serde::Deserialize;

/// Response shape of the endpoints that answer with a bare `{"ID": ...}`
/// object (session create, legacy ACL create/update/clone).
#[derive(Debug, Clone, Deserialize)]
pub struct IdResponse {
    #[serde(rename = "ID")]
    pub id: String,
}
