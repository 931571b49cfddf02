//! User event endpoints.

use std::sync::Arc;

use consul_api::event::UserEvent;

use crate::{
    constants::api_path,
    error::{ConsulError, Result},
    http::{HttpTransport, Params},
    options::{Indexed, QueryOptions},
};

/// Server-side filters applied when firing an event.
#[derive(Clone, Debug, Default)]
pub struct EventFilters {
    /// Regular expression matched against node names.
    pub node: Option<String>,
    /// Regular expression matched against service names.
    pub service: Option<String>,
    /// Regular expression matched against service tags; requires
    /// `service`.
    pub tag: Option<String>,
}

/// Handle for the `/v1/event` endpoints.
#[derive(Clone)]
pub struct Event {
    pub(crate) transport: Arc<HttpTransport>,
}

impl Event {
    /// Fire a custom event into the datacenter, returning it with the
    /// server-assigned id. Events propagate via gossip and are best
    /// effort: delivery is not guaranteed.
    pub async fn fire(
        &self,
        name: &str,
        payload: Option<Vec<u8>>,
        filters: &EventFilters,
        options: &QueryOptions,
    ) -> Result<UserEvent> {
        if name.starts_with('/') {
            return Err(ConsulError::InvalidInput(format!(
                "event names must not start with a slash: {name}"
            )));
        }

        let path = format!("{}/{}", api_path::EVENT_FIRE, name);
        let mut params = Params::new();
        if let Some(node) = &filters.node {
            params.push(("node", node.to_string()));
        }
        if let Some(service) = &filters.service {
            params.push(("service", service.to_string()));
        }
        if let Some(tag) = &filters.tag {
            params.push(("tag", tag.to_string()));
        }
        // Fire is a write; of the query options only dc and token apply.
        if let Some(dc) = options
            .datacenter
            .as_deref()
            .or(self.transport.config.datacenter.as_deref())
        {
            params.push(("dc", dc.to_string()));
        }

        self.transport
            .put_raw(
                &path,
                params,
                payload.unwrap_or_default(),
                options.token.as_deref(),
            )
            .await
    }

    /// Recent events the agent has seen, oldest first. The agent keeps a
    /// rolling buffer; the accompanying index is derived from event ids,
    /// not a raft index, so it only works for watching this endpoint.
    pub async fn list(
        &self,
        name: Option<&str>,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<UserEvent>>> {
        let mut params = Params::new();
        if let Some(name) = name {
            params.push(("name", name.to_string()));
        }
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get_indexed_list(
                api_path::EVENT_LIST,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await
    }
}
