//! Legacy ACL endpoints.
//!
//! These are the pre-1.4 token endpoints. They require a management token
//! and answer 401 when ACL support is disabled on the cluster.

use std::sync::Arc;

use consul_api::{
    IdResponse,
    acl::{AclEntry, AclRequest},
};

use crate::{
    constants::api_path,
    error::{ConsulError, Result},
    http::{HttpTransport, Params},
    options::{Indexed, QueryOptions},
};

/// Handle for the legacy `/v1/acl` endpoints.
#[derive(Clone)]
pub struct Acl {
    pub(crate) transport: Arc<HttpTransport>,
}

impl Acl {
    /// All tokens of the cluster.
    pub async fn list(&self, options: &QueryOptions) -> Result<Indexed<Vec<AclEntry>>> {
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get_indexed_list(
                api_path::ACL_LIST,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await
    }

    /// Look up one token, `None` if it does not exist.
    pub async fn info(
        &self,
        acl_id: &str,
        options: &QueryOptions,
    ) -> Result<Indexed<Option<AclEntry>>> {
        let path = format!("{}/{}", api_path::ACL_INFO, acl_id);
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        let entries: Indexed<Vec<AclEntry>> = self
            .transport
            .get_indexed_list(
                &path,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await?;
        Ok(Indexed {
            index: entries.index,
            body: entries.body.into_iter().next(),
        })
    }

    /// Create a token and return its server-assigned id.
    pub async fn create(&self, request: &AclRequest, options: &QueryOptions) -> Result<String> {
        let response: IdResponse = self
            .transport
            .put_json(
                api_path::ACL_CREATE,
                Params::new(),
                request,
                options.token.as_deref(),
            )
            .await?;
        Ok(response.id)
    }

    /// Update an existing token; the request must carry its id.
    pub async fn update(&self, request: &AclRequest, options: &QueryOptions) -> Result<String> {
        if request.id.is_none() {
            return Err(ConsulError::InvalidInput(
                "ACL update requires the token id".to_string(),
            ));
        }

        let response: IdResponse = self
            .transport
            .put_json(
                api_path::ACL_UPDATE,
                Params::new(),
                request,
                options.token.as_deref(),
            )
            .await?;
        Ok(response.id)
    }

    /// Copy an existing token into a new one, returning the new id.
    pub async fn clone_token(&self, acl_id: &str, options: &QueryOptions) -> Result<String> {
        let path = format!("{}/{}", api_path::ACL_CLONE, acl_id);
        let response: IdResponse = self
            .transport
            .put_empty(&path, Params::new(), options.token.as_deref())
            .await?;
        Ok(response.id)
    }

    /// Destroy a token.
    pub async fn destroy(&self, acl_id: &str, options: &QueryOptions) -> Result<bool> {
        let path = format!("{}/{}", api_path::ACL_DESTROY, acl_id);
        self.transport
            .put_ok(&path, Params::new(), options.token.as_deref())
            .await
    }
}
