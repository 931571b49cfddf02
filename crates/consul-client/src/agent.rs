//! Local agent endpoints.
//!
//! These talk to the agent serving the request rather than the cluster
//! catalog, so none of them take query options; the agent answers from
//! its own state.

use std::collections::HashMap;
use std::sync::Arc;

use consul_api::agent::{
    AgentCheck, AgentMember, AgentService, CheckRegistration, ServiceRegistration,
};

use crate::{
    constants::api_path,
    error::Result,
    http::{HttpTransport, Params},
};

/// Handle for the `/v1/agent` endpoints.
#[derive(Clone)]
pub struct Agent {
    pub(crate) transport: Arc<HttpTransport>,
}

impl Agent {
    /// Configuration and member info of the local agent.
    pub async fn self_info(&self) -> Result<serde_json::Value> {
        self.transport
            .get(api_path::AGENT_SELF, Params::new(), None)
            .await
    }

    /// Services registered with the local agent, keyed by service id.
    pub async fn services(&self) -> Result<HashMap<String, AgentService>> {
        self.transport
            .get(api_path::AGENT_SERVICES, Params::new(), None)
            .await
    }

    /// Checks registered with the local agent, keyed by check id.
    pub async fn checks(&self) -> Result<HashMap<String, AgentCheck>> {
        self.transport
            .get(api_path::AGENT_CHECKS, Params::new(), None)
            .await
    }

    /// Members the agent sees in the gossip pool. With `wan`, the WAN
    /// pool of a server agent instead of the LAN pool.
    pub async fn members(&self, wan: bool) -> Result<Vec<AgentMember>> {
        let mut params = Params::new();
        if wan {
            params.push(("wan", "1".to_string()));
        }
        self.transport
            .get(api_path::AGENT_MEMBERS, params, None)
            .await
    }

    /// Put the whole node into maintenance mode, or take it out again.
    pub async fn maintenance(&self, enable: bool, reason: Option<&str>) -> Result<()> {
        let mut params = vec![("enable", enable.to_string())];
        if let Some(reason) = reason {
            params.push(("reason", reason.to_string()));
        }
        self.transport
            .put_unit(api_path::AGENT_MAINTENANCE, params, None)
            .await
    }

    /// Ask the agent to join a cluster member at `address`. With `wan`,
    /// join the WAN pool (servers only).
    pub async fn join(&self, address: &str, wan: bool) -> Result<()> {
        let path = format!("{}/{}", api_path::AGENT_JOIN, address);
        let mut params = Params::new();
        if wan {
            params.push(("wan", "1".to_string()));
        }
        self.transport.put_unit(&path, params, None).await
    }

    /// Remove a failed node from the cluster immediately instead of
    /// waiting for the reap timeout.
    pub async fn force_leave(&self, node: &str) -> Result<()> {
        let path = format!("{}/{}", api_path::AGENT_FORCE_LEAVE, node);
        self.transport.put_unit(&path, Params::new(), None).await
    }

    /// Register (or update) a service with the local agent. `token`
    /// overrides the client default for this request.
    pub async fn register_service(
        &self,
        registration: &ServiceRegistration,
        token: Option<&str>,
    ) -> Result<()> {
        self.transport
            .put_json_unit(api_path::AGENT_SERVICE_REGISTER, Params::new(), registration, token)
            .await
    }

    /// Deregister a service and its checks from the local agent.
    pub async fn deregister_service(&self, service_id: &str) -> Result<()> {
        let path = format!("{}/{}", api_path::AGENT_SERVICE_DEREGISTER, service_id);
        self.transport.put_unit(&path, Params::new(), None).await
    }

    /// Put one service into maintenance mode, or take it out again.
    pub async fn service_maintenance(
        &self,
        service_id: &str,
        enable: bool,
        reason: Option<&str>,
    ) -> Result<()> {
        let path = format!("{}/{}", api_path::AGENT_SERVICE_MAINTENANCE, service_id);
        let mut params = vec![("enable", enable.to_string())];
        if let Some(reason) = reason {
            params.push(("reason", reason.to_string()));
        }
        self.transport.put_unit(&path, params, None).await
    }

    /// Register (or update) a check with the local agent. `token`
    /// overrides the client default for this request.
    pub async fn register_check(
        &self,
        registration: &CheckRegistration,
        token: Option<&str>,
    ) -> Result<()> {
        self.transport
            .put_json_unit(api_path::AGENT_CHECK_REGISTER, Params::new(), registration, token)
            .await
    }

    /// Deregister a check from the local agent.
    pub async fn deregister_check(&self, check_id: &str) -> Result<()> {
        let path = format!("{}/{}", api_path::AGENT_CHECK_DEREGISTER, check_id);
        self.transport.put_unit(&path, Params::new(), None).await
    }

    /// Mark a TTL check passing, resetting its clock.
    pub async fn check_pass(&self, check_id: &str, note: Option<&str>) -> Result<()> {
        self.ttl_update(api_path::AGENT_CHECK_PASS, check_id, note)
            .await
    }

    /// Mark a TTL check warning.
    pub async fn check_warn(&self, check_id: &str, note: Option<&str>) -> Result<()> {
        self.ttl_update(api_path::AGENT_CHECK_WARN, check_id, note)
            .await
    }

    /// Mark a TTL check critical.
    pub async fn check_fail(&self, check_id: &str, note: Option<&str>) -> Result<()> {
        self.ttl_update(api_path::AGENT_CHECK_FAIL, check_id, note)
            .await
    }

    async fn ttl_update(&self, base: &str, check_id: &str, note: Option<&str>) -> Result<()> {
        let path = format!("{base}/{check_id}");
        let mut params = Params::new();
        if let Some(note) = note {
            params.push(("note", note.to_string()));
        }
        self.transport.put_unit(&path, params, None).await
    }
}
