//! Endpoint paths of the Consul v1 HTTP API.

pub mod api_path {
    pub const KV: &str = "/v1/kv";
    pub const TXN: &str = "/v1/txn";

    pub const AGENT_SELF: &str = "/v1/agent/self";
    pub const AGENT_SERVICES: &str = "/v1/agent/services";
    pub const AGENT_CHECKS: &str = "/v1/agent/checks";
    pub const AGENT_MEMBERS: &str = "/v1/agent/members";
    pub const AGENT_MAINTENANCE: &str = "/v1/agent/maintenance";
    pub const AGENT_JOIN: &str = "/v1/agent/join";
    pub const AGENT_FORCE_LEAVE: &str = "/v1/agent/force-leave";
    pub const AGENT_SERVICE_REGISTER: &str = "/v1/agent/service/register";
    pub const AGENT_SERVICE_DEREGISTER: &str = "/v1/agent/service/deregister";
    pub const AGENT_SERVICE_MAINTENANCE: &str = "/v1/agent/service/maintenance";
    pub const AGENT_CHECK_REGISTER: &str = "/v1/agent/check/register";
    pub const AGENT_CHECK_DEREGISTER: &str = "/v1/agent/check/deregister";
    pub const AGENT_CHECK_PASS: &str = "/v1/agent/check/pass";
    pub const AGENT_CHECK_WARN: &str = "/v1/agent/check/warn";
    pub const AGENT_CHECK_FAIL: &str = "/v1/agent/check/fail";

    pub const CATALOG_REGISTER: &str = "/v1/catalog/register";
    pub const CATALOG_DEREGISTER: &str = "/v1/catalog/deregister";
    pub const CATALOG_DATACENTERS: &str = "/v1/catalog/datacenters";
    pub const CATALOG_NODES: &str = "/v1/catalog/nodes";
    pub const CATALOG_SERVICES: &str = "/v1/catalog/services";
    pub const CATALOG_NODE: &str = "/v1/catalog/node";
    pub const CATALOG_SERVICE: &str = "/v1/catalog/service";

    pub const HEALTH_SERVICE: &str = "/v1/health/service";
    pub const HEALTH_CHECKS: &str = "/v1/health/checks";
    pub const HEALTH_STATE: &str = "/v1/health/state";
    pub const HEALTH_NODE: &str = "/v1/health/node";

    pub const SESSION_CREATE: &str = "/v1/session/create";
    pub const SESSION_DESTROY: &str = "/v1/session/destroy";
    pub const SESSION_LIST: &str = "/v1/session/list";
    pub const SESSION_NODE: &str = "/v1/session/node";
    pub const SESSION_INFO: &str = "/v1/session/info";
    pub const SESSION_RENEW: &str = "/v1/session/renew";

    pub const ACL_CREATE: &str = "/v1/acl/create";
    pub const ACL_UPDATE: &str = "/v1/acl/update";
    pub const ACL_CLONE: &str = "/v1/acl/clone";
    pub const ACL_DESTROY: &str = "/v1/acl/destroy";
    pub const ACL_INFO: &str = "/v1/acl/info";
    pub const ACL_LIST: &str = "/v1/acl/list";

    pub const EVENT_FIRE: &str = "/v1/event/fire";
    pub const EVENT_LIST: &str = "/v1/event/list";

    pub const STATUS_LEADER: &str = "/v1/status/leader";
    pub const STATUS_PEERS: &str = "/v1/status/peers";

    pub const QUERY: &str = "/v1/query";

    pub const COORDINATE_DATACENTERS: &str = "/v1/coordinate/datacenters";
    pub const COORDINATE_NODES: &str = "/v1/coordinate/nodes";

    pub const OPERATOR_RAFT_CONFIGURATION: &str = "/v1/operator/raft/configuration";
}
