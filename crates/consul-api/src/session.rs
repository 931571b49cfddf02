use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What happens to held locks when a session is invalidated. `Release`
/// frees them; `Delete` removes the keys, which makes ephemeral entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBehavior {
    #[default]
    Release,
    Delete,
}

/// Payload for `PUT /v1/session/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRequest {
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,

    /// Node to create the session on; defaults to the local agent's node.
    #[serde(rename = "Node", skip_serializing_if = "Option::is_none", default)]
    pub node: Option<String>,

    /// Checks to associate with the session. If overridden, including the
    /// default `serfHealth` is strongly recommended.
    #[serde(rename = "Checks", skip_serializing_if = "Option::is_none", default)]
    pub checks: Option<Vec<String>>,

    #[serde(
        rename = "LockDelay",
        with = "crate::serde_ext::go_duration",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub lock_delay: Option<Duration>,

    #[serde(rename = "Behavior", skip_serializing_if = "Option::is_none", default)]
    pub behavior: Option<SessionBehavior>,

    /// Invalidate the session unless renewed within this duration.
    /// Consul requires 10s..=24h.
    #[serde(
        rename = "TTL",
        with = "crate::serde_ext::go_duration",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub ttl: Option<Duration>,
}

/// A session as returned by the info/list/renew endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Name", default)]
    pub name: Option<String>,

    #[serde(rename = "Node", default)]
    pub node: String,

    #[serde(rename = "Checks", default)]
    pub checks: Option<Vec<String>>,

    #[serde(
        rename = "LockDelay",
        with = "crate::serde_ext::go_duration",
        default
    )]
    pub lock_delay: Option<Duration>,

    #[serde(rename = "Behavior", default)]
    pub behavior: Option<SessionBehavior>,

    #[serde(rename = "TTL", with = "crate::serde_ext::go_duration", default)]
    pub ttl: Option<Duration>,

    #[serde(rename = "CreateIndex", default)]
    pub create_index: u64,

    #[serde(rename = "ModifyIndex", default)]
    pub modify_index: u64,
}
