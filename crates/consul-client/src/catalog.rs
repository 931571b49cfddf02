//! Catalog endpoints.

use std::collections::HashMap;
use std::sync::Arc;

use consul_api::catalog::{
    CatalogDeregistration, CatalogNode, CatalogRegistration, CatalogService, Node,
};

use crate::{
    constants::api_path,
    error::Result,
    http::{HttpTransport, Params},
    options::{Indexed, QueryOptions},
};

/// Handle for the `/v1/catalog` endpoints.
#[derive(Clone)]
pub struct Catalog {
    pub(crate) transport: Arc<HttpTransport>,
}

impl Catalog {
    /// Low-level node/service/check registration, bypassing the usual
    /// agent anti-entropy. Prefer [`Agent::register_service`] for services
    /// on a live agent.
    ///
    /// [`Agent::register_service`]: crate::agent::Agent::register_service
    pub async fn register(&self, registration: &CatalogRegistration) -> Result<bool> {
        self.transport
            .put_json(
                api_path::CATALOG_REGISTER,
                Params::new(),
                registration,
                None,
            )
            .await
    }

    /// Low-level removal of a node, service or check from the catalog.
    pub async fn deregister(&self, deregistration: &CatalogDeregistration) -> Result<bool> {
        self.transport
            .put_json(
                api_path::CATALOG_DEREGISTER,
                Params::new(),
                deregistration,
                None,
            )
            .await
    }

    /// Known datacenters, sorted by estimated median round-trip time.
    pub async fn datacenters(&self) -> Result<Vec<String>> {
        self.transport
            .get(api_path::CATALOG_DATACENTERS, Params::new(), None)
            .await
    }

    /// Nodes of a datacenter.
    pub async fn nodes(&self, options: &QueryOptions) -> Result<Indexed<Vec<Node>>> {
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get_indexed_list(
                api_path::CATALOG_NODES,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await
    }

    /// Service names of a datacenter, mapped to their known tags.
    pub async fn services(
        &self,
        options: &QueryOptions,
    ) -> Result<Indexed<HashMap<String, Vec<String>>>> {
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        let indexed = self
            .transport
            .get_indexed(
                api_path::CATALOG_SERVICES,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await?;
        Ok(Indexed {
            index: indexed.index,
            body: indexed.body.unwrap_or_default(),
        })
    }

    /// One node and every service it provides, or `None` for an unknown
    /// node.
    pub async fn node(
        &self,
        node: &str,
        options: &QueryOptions,
    ) -> Result<Indexed<Option<CatalogNode>>> {
        let path = format!("{}/{}", api_path::CATALOG_NODE, node);
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get_indexed(
                &path,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await
    }

    /// Every provider of a service. With `tag`, only providers carrying
    /// that tag.
    pub async fn service(
        &self,
        service: &str,
        tag: Option<&str>,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<CatalogService>>> {
        let path = format!("{}/{}", api_path::CATALOG_SERVICE, service);
        let mut params = Params::new();
        if let Some(tag) = tag {
            params.push(("tag", tag.to_string()));
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
}
