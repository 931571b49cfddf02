//! Session endpoints.

use std::sync::Arc;
use std::time::Duration;

use consul_api::{IdResponse, session::{SessionEntry, SessionRequest}};

use crate::{
    constants::api_path,
    error::{ConsulError, Result},
    http::{HttpTransport, Params},
    options::{Indexed, QueryOptions},
};

const TTL_MIN: Duration = Duration::from_secs(10);
const TTL_MAX: Duration = Duration::from_secs(86400);

/// Handle for the `/v1/session` endpoints.
#[derive(Clone)]
pub struct Session {
    pub(crate) transport: Arc<HttpTransport>,
}

impl Session {
    /// Create a session and return its id. A TTL outside Consul's
    /// accepted 10s..=24h range is rejected client-side.
    pub async fn create(
        &self,
        request: &SessionRequest,
        options: &QueryOptions,
    ) -> Result<String> {
        if let Some(ttl) = request.ttl {
            if !(TTL_MIN..=TTL_MAX).contains(&ttl) {
                return Err(ConsulError::InvalidInput(format!(
                    "session TTL must be between 10s and 86400s, got {}s",
                    ttl.as_secs()
                )));
            }
        }

        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        let response: IdResponse = self
            .transport
            .put_json(
                api_path::SESSION_CREATE,
                params,
                request,
                options.token.as_deref(),
            )
            .await?;
        Ok(response.id)
    }

    /// Destroy a session, releasing or deleting its locks per the
    /// session's behavior.
    pub async fn destroy(&self, session_id: &str, options: &QueryOptions) -> Result<bool> {
        let path = format!("{}/{}", api_path::SESSION_DESTROY, session_id);
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .put_ok(&path, params, options.token.as_deref())
            .await
    }

    /// All active sessions of the datacenter.
    pub async fn list(&self, options: &QueryOptions) -> Result<Indexed<Vec<SessionEntry>>> {
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get_indexed_list(
                api_path::SESSION_LIST,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await
    }

    /// Active sessions owned by a node.
    pub async fn node(
        &self,
        node: &str,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<SessionEntry>>> {
        let path = format!("{}/{}", api_path::SESSION_NODE, node);
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

    /// Look up one session, `None` if it no longer exists.
    pub async fn info(
        &self,
        session_id: &str,
        options: &QueryOptions,
    ) -> Result<Indexed<Option<SessionEntry>>> {
        let path = format!("{}/{}", api_path::SESSION_INFO, session_id);
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        let entries: Indexed<Vec<SessionEntry>> = self
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

    /// Reset a TTL session's clock. Errors with
    /// [`ConsulError::NotFound`] when the session has already been
    /// invalidated.
    pub async fn renew(
        &self,
        session_id: &str,
        options: &QueryOptions,
    ) -> Result<SessionEntry> {
        let path = format!("{}/{}", api_path::SESSION_RENEW, session_id);
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        let entries: Vec<SessionEntry> = self
            .transport
            .put_empty(&path, params, options.token.as_deref())
            .await?;
        entries
            .into_iter()
            .next()
            .ok_or_else(|| ConsulError::NotFound(format!("session {session_id}")))
    }
}
