//! Per-request query options and indexed responses.

use std::time::Duration;

use consul_api::serde_ext::go_duration;

use crate::{config::ClientConfig, http::Params};

/// Consistency modes for read requests.
///
/// `Default` may serve slightly stale reads from the leader, `Consistent`
/// adds a quorum round-trip, `Stale` lets any server answer from its local
/// state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Consistency {
    #[default]
    Default,
    Consistent,
    Stale,
}

/// A response body paired with the `X-Consul-Index` it was observed at.
/// Feed the index back through [`QueryOptions::with_index`] to block until
/// the value changes.
#[derive(Clone, Debug)]
pub struct Indexed<T> {
    pub index: u64,
    pub body: T,
}

/// Options accepted by most read endpoints.
#[derive(Clone, Debug, Default)]
pub struct QueryOptions {
    pub datacenter: Option<String>,
    /// Per-request token overriding the client default.
    pub token: Option<String>,
    /// Index from a previous response; turns the request into a blocking
    /// query.
    pub index: Option<u64>,
    /// Maximum time the server holds a blocking query open. Only
    /// meaningful together with `index`.
    pub wait: Option<Duration>,
    pub consistency: Option<Consistency>,
    /// Sort results by round-trip time from this node. `_agent` means the
    /// agent serving the request.
    pub near: Option<String>,
    /// Filter nodes by metadata, as key/value pairs.
    pub node_meta: Vec<(String, String)>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_datacenter(mut self, datacenter: &str) -> Self {
        self.datacenter = Some(datacenter.to_string());
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_index(mut self, index: u64) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = Some(wait);
        self
    }

    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = Some(consistency);
        self
    }

    pub fn with_near(mut self, node: &str) -> Self {
        self.near = Some(node.to_string());
        self
    }

    pub fn with_node_meta(mut self, key: &str, value: &str) -> Self {
        self.node_meta.push((key.to_string(), value.to_string()));
        self
    }

    /// Render these options as query parameters, filling gaps from the
    /// client defaults.
    pub(crate) fn apply(&self, config: &ClientConfig, params: &mut Params) {
        if let Some(dc) = self.datacenter.as_deref().or(config.datacenter.as_deref()) {
            params.push(("dc", dc.to_string()));
        }
        if let Some(index) = self.index {
            params.push(("index", index.to_string()));
            if let Some(wait) = self.wait {
                params.push(("wait", go_duration::format(wait)));
            }
        }
        match self.consistency.unwrap_or(config.consistency) {
            Consistency::Default => {}
            Consistency::Consistent => params.push(("consistent", "1".to_string())),
            Consistency::Stale => params.push(("stale", "1".to_string())),
        }
        if let Some(near) = &self.near {
            params.push(("near", near.to_string()));
        }
        for (key, value) in &self.node_meta {
            params.push(("node-meta", format!("{key}:{value}")));
        }
    }

    /// Extra client-side time to allow beyond the read timeout while a
    /// blocking query is held open.
    pub(crate) fn poll_timeout(&self) -> Option<Duration> {
        match (self.index, self.wait) {
            (Some(_), Some(wait)) => Some(wait),
            _ => None,
        }
    }
}
