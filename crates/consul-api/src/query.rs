use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{catalog::Node, agent::AgentService, health::HealthCheck};

/// Service block of a prepared query definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryService {
    #[serde(rename = "Service")]
    pub service: String,

    #[serde(rename = "Failover", skip_serializing_if = "Option::is_none", default)]
    pub failover: Option<QueryFailover>,

    #[serde(rename = "OnlyPassing", default)]
    pub only_passing: bool,

    #[serde(rename = "Tags", skip_serializing_if = "Option::is_none", default)]
    pub tags: Option<Vec<String>>,
}

/// Failover behavior when no healthy instances exist in the local
/// datacenter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryFailover {
    /// Try the N nearest datacenters by WAN round-trip time.
    #[serde(rename = "NearestN", default)]
    pub nearest_n: i32,

    /// Fixed list of datacenters to try, in order, after `NearestN`.
    #[serde(rename = "Datacenters", skip_serializing_if = "Option::is_none", default)]
    pub datacenters: Option<Vec<String>>,
}

/// DNS block of a prepared query definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryDns {
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none", default)]
    pub ttl: Option<String>,
}

/// Template block turning a query into a catch-all matched by name prefix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryTemplate {
    #[serde(rename = "Type", default)]
    pub template_type: String,

    #[serde(rename = "Regexp", default)]
    pub regexp: String,
}

/// A prepared query definition, for both the create/update payloads and
/// the get/list responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreparedQuery {
    /// Server-assigned; required for update, absent on create.
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,

    #[serde(rename = "Name", default)]
    pub name: String,

    /// Session whose invalidation deletes the query.
    #[serde(rename = "Session", skip_serializing_if = "Option::is_none", default)]
    pub session: Option<String>,

    /// Token captured at definition time and used when the query executes.
    #[serde(rename = "Token", skip_serializing_if = "Option::is_none", default)]
    pub token: Option<String>,

    #[serde(rename = "Service")]
    pub service: QueryService,

    #[serde(rename = "DNS", skip_serializing_if = "Option::is_none", default)]
    pub dns: Option<QueryDns>,

    #[serde(rename = "Template", skip_serializing_if = "Option::is_none", default)]
    pub template: Option<QueryTemplate>,
}

impl PreparedQuery {
    pub fn new(name: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            service: QueryService {
                service: service.into(),
                ..QueryService::default()
            },
            ..Self::default()
        }
    }
}

/// One node returned by executing a prepared query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryExecutionNode {
    #[serde(rename = "Node")]
    pub node: Node,

    #[serde(rename = "Service")]
    pub service: AgentService,

    #[serde(rename = "Checks", default)]
    pub checks: Vec<HealthCheck>,
}

/// Response of `GET /v1/query/<id>/execute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryExecution {
    #[serde(rename = "Service", default)]
    pub service: String,

    #[serde(rename = "Nodes", default)]
    pub nodes: Vec<QueryExecutionNode>,

    #[serde(rename = "DNS", default)]
    pub dns: Option<QueryDns>,

    /// Datacenter the results came from, after any failover.
    #[serde(rename = "Datacenter", default)]
    pub datacenter: String,

    /// Number of datacenters tried before results were found.
    #[serde(rename = "Failovers", default)]
    pub failovers: u32,
}

/// Response of `GET /v1/query/<name>/explain`: the fully rendered query a
/// template would produce for that name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryExplain {
    #[serde(rename = "Query")]
    pub query: PreparedQuery,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_omits_id() {
        let mut query = PreparedQuery::new("my-query", "redis");
        query.service.only_passing = true;

        let json = serde_json::to_value(&query).unwrap();
        assert!(json.get("ID").is_none());
        assert_eq!(json["Service"]["Service"], "redis");
        assert_eq!(json["Service"]["OnlyPassing"], true);
    }

    #[test]
    fn execution_deserializes() {
        let json = r#"{
            "Service": "redis",
            "Nodes": [{
                "Node": {"Node": "foobar", "Address": "10.1.10.12"},
                "Service": {"ID": "redis", "Service": "redis", "Port": 8000, "Address": ""},
                "Checks": []
            }],
            "DNS": {"TTL": "10s"},
            "Datacenter": "dc3",
            "Failovers": 2
        }"#;

        let execution: QueryExecution = serde_json::from_str(json).unwrap();
        assert_eq!(execution.failovers, 2);
        assert_eq!(execution.nodes[0].service.port, 8000);
    }
}
