//! Transaction endpoint.

use std::sync::Arc;

use consul_api::txn::{TxnOp, TxnResponse};

use crate::{
    constants::api_path,
    error::Result,
    http::{HttpTransport, Params},
    options::QueryOptions,
};

/// Handle for `/v1/txn`.
#[derive(Clone)]
pub struct Txn {
    pub(crate) transport: Arc<HttpTransport>,
}

impl Txn {
    /// Commit up to 64 KV operations atomically. On rollback the returned
    /// response has an empty `results` and the per-operation `errors`.
    pub async fn put(&self, operations: Vec<TxnOp>, options: &QueryOptions) -> Result<TxnResponse> {
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .put_json_or_conflict(api_path::TXN, params, &operations, options.token.as_deref())
            .await
    }
}
