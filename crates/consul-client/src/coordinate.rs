//! Network coordinate endpoints.

use std::sync::Arc;

use consul_api::coordinate::{CoordinateDatacenter, CoordinateEntry};

use crate::{
    constants::api_path,
    error::Result,
    http::{HttpTransport, Params},
    options::{Indexed, QueryOptions},
};

/// Handle for the `/v1/coordinate` endpoints.
#[derive(Clone)]
pub struct Coordinate {
    pub(crate) transport: Arc<HttpTransport>,
}

impl Coordinate {
    /// WAN coordinates of every datacenter's servers, grouped by
    /// federation area.
    pub async fn datacenters(&self) -> Result<Vec<CoordinateDatacenter>> {
        self.transport
            .get(api_path::COORDINATE_DATACENTERS, Params::new(), None)
            .await
    }

    /// LAN coordinates of the datacenter's nodes.
    pub async fn nodes(&self, options: &QueryOptions) -> Result<Indexed<Vec<CoordinateEntry>>> {
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get_indexed_list(
                api_path::COORDINATE_NODES,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await
    }
}
