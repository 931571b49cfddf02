//! Status endpoints.

use std::sync::Arc;

use crate::{
    constants::api_path,
    error::Result,
    http::{HttpTransport, Params},
};

/// Handle for the `/v1/status` endpoints.
#[derive(Clone)]
pub struct Status {
    pub(crate) transport: Arc<HttpTransport>,
}

impl Status {
    /// Raft address of the current leader, e.g. `"10.1.10.12:8300"`.
    pub async fn leader(&self) -> Result<String> {
        self.transport
            .get(api_path::STATUS_LEADER, Params::new(), None)
            .await
    }

    /// Raft addresses of the current peer set.
    pub async fn peers(&self) -> Result<Vec<String>> {
        self.transport
            .get(api_path::STATUS_PEERS, Params::new(), None)
            .await
    }
}
