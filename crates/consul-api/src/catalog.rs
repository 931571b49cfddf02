use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::agent::AgentService;

/// A node known to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "ID", default)]
    pub id: Option<String>,

    #[serde(rename = "Node")]
    pub node: String,

    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "Datacenter", default)]
    pub datacenter: Option<String>,

    #[serde(rename = "TaggedAddresses", default)]
    pub tagged_addresses: Option<HashMap<String, String>>,

    #[serde(rename = "Meta", default)]
    pub meta: Option<HashMap<String, String>>,
}

/// One provider of a service, from `GET /v1/catalog/service/<name>`.
/// Node and service fields are flattened into a single object on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogService {
    #[serde(rename = "Node")]
    pub node: String,

    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "ServiceID")]
    pub service_id: String,

    #[serde(rename = "ServiceName")]
    pub service_name: String,

    #[serde(rename = "ServiceTags", default)]
    pub service_tags: Option<Vec<String>>,

    #[serde(rename = "ServiceAddress", default)]
    pub service_address: Option<String>,

    #[serde(rename = "ServicePort", default)]
    pub service_port: u16,

    #[serde(rename = "ServiceMeta", default)]
    pub service_meta: Option<HashMap<String, String>>,
}

/// Response of `GET /v1/catalog/node/<node>`: the node plus every service
/// it provides, keyed by service id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogNode {
    #[serde(rename = "Node")]
    pub node: Node,

    #[serde(rename = "Services", default)]
    pub services: HashMap<String, AgentService>,
}

/// Service block of a low-level catalog registration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogServiceSpec {
    #[serde(rename = "Service")]
    pub service: String,

    /// Defaults to `Service`; must be unique per node.
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,

    #[serde(rename = "Tags", skip_serializing_if = "Option::is_none", default)]
    pub tags: Option<Vec<String>>,

    #[serde(rename = "Address", skip_serializing_if = "Option::is_none", default)]
    pub address: Option<String>,

    #[serde(rename = "Port", skip_serializing_if = "Option::is_none", default)]
    pub port: Option<u16>,
}

/// Check block of a low-level catalog registration. This manipulates the
/// health entry only; it does not install a script or TTL that keeps the
/// status current.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogCheckSpec {
    #[serde(rename = "Node")]
    pub node: String,

    #[serde(rename = "CheckID", skip_serializing_if = "Option::is_none", default)]
    pub check_id: Option<String>,

    #[serde(rename = "Name", skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,

    #[serde(rename = "Notes", skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,

    #[serde(rename = "Status", skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,

    #[serde(rename = "ServiceID", skip_serializing_if = "Option::is_none", default)]
    pub service_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteRequest {
    #[serde(rename = "Token", skip_serializing_if = "Option::is_none", default)]
    pub token: Option<String>,
}

/// Payload for `PUT /v1/catalog/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogRegistration {
    #[serde(rename = "Node")]
    pub node: String,

    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "Datacenter", skip_serializing_if = "Option::is_none", default)]
    pub datacenter: Option<String>,

    #[serde(rename = "NodeMeta", skip_serializing_if = "Option::is_none", default)]
    pub node_meta: Option<HashMap<String, String>>,

    #[serde(rename = "Service", skip_serializing_if = "Option::is_none", default)]
    pub service: Option<CatalogServiceSpec>,

    #[serde(rename = "Check", skip_serializing_if = "Option::is_none", default)]
    pub check: Option<CatalogCheckSpec>,

    #[serde(rename = "WriteRequest", skip_serializing_if = "Option::is_none", default)]
    pub write_request: Option<WriteRequest>,
}

/// Payload for `PUT /v1/catalog/deregister`. With neither a service id nor
/// a check id, the whole node and everything on it is removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDeregistration {
    #[serde(rename = "Node")]
    pub node: String,

    #[serde(rename = "Datacenter", skip_serializing_if = "Option::is_none", default)]
    pub datacenter: Option<String>,

    #[serde(rename = "ServiceID", skip_serializing_if = "Option::is_none", default)]
    pub service_id: Option<String>,

    #[serde(rename = "CheckID", skip_serializing_if = "Option::is_none", default)]
    pub check_id: Option<String>,

    #[serde(rename = "WriteRequest", skip_serializing_if = "Option::is_none", default)]
    pub write_request: Option<WriteRequest>,
}
