//! Health check endpoints.

use std::sync::Arc;

use consul_api::health::{HealthCheck, HealthState, ServiceEntry};

use crate::{
    constants::api_path,
    error::Result,
    http::{HttpTransport, Params},
    options::{Indexed, QueryOptions},
};

/// Handle for the `/v1/health` endpoints.
#[derive(Clone)]
pub struct Health {
    pub(crate) transport: Arc<HttpTransport>,
}

impl Health {
    /// Providers of a service together with their health checks. With
    /// `passing`, instances with any non-passing check are filtered out
    /// server-side.
    pub async fn service(
        &self,
        service: &str,
        tag: Option<&str>,
        passing: bool,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<ServiceEntry>>> {
        let path = format!("{}/{}", api_path::HEALTH_SERVICE, service);
        let mut params = Params::new();
        if let Some(tag) = tag {
            params.push(("tag", tag.to_string()));
        }
        if passing {
            params.push(("passing", "1".to_string()));
        }
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get_indexed_list(
                &path,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await
    }

    /// Checks associated with a service, across all nodes providing it.
    pub async fn checks(
        &self,
        service: &str,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<HealthCheck>>> {
        let path = format!("{}/{}", api_path::HEALTH_CHECKS, service);
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get_indexed_list(
                &path,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await
    }

    /// Every check in the given state. [`HealthState::Any`] lists all
    /// checks.
    pub async fn state(
        &self,
        state: HealthState,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<HealthCheck>>> {
        let path = format!("{}/{}", api_path::HEALTH_STATE, state.as_str());
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get_indexed_list(
                &path,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await
    }

    /// Checks local to a node, system checks included.
    pub async fn node(
        &self,
        node: &str,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<HealthCheck>>> {
        let path = format!("{}/{}", api_path::HEALTH_NODE, node);
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get_indexed_list(
                &path,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await
    }
}
