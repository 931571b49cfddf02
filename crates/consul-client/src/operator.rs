//! Operator endpoints.

use std::sync::Arc;

use consul_api::operator::RaftConfiguration;

use crate::{
    constants::api_path,
    error::Result,
    http::{HttpTransport, Params},
    options::QueryOptions,
};

/// Handle for the `/v1/operator` endpoints.
#[derive(Clone)]
pub struct Operator {
    pub(crate) transport: Arc<HttpTransport>,
}

impl Operator {
    /// The raft configuration as the leader sees it.
    pub async fn raft_configuration(&self, options: &QueryOptions) -> Result<RaftConfiguration> {
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get(
                api_path::OPERATOR_RAFT_CONFIGURATION,
                params,
                options.token.as_deref(),
            )
            .await
    }
}
