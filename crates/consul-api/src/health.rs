use serde::{Deserialize, Serialize};

use crate::{agent::AgentService, catalog::Node};

/// Check states accepted by `GET /v1/health/state/<state>`.
/// `Any` is a wildcard returning every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Any,
    Unknown,
    Passing,
    Warning,
    Critical,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthState::Any => "any",
            HealthState::Unknown => "unknown",
            HealthState::Passing => "passing",
            HealthState::Warning => "warning",
            HealthState::Critical => "critical",
        }
    }
}

/// A health check entry as returned by the health endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    #[serde(rename = "Node")]
    pub node: String,

    #[serde(rename = "CheckID")]
    pub check_id: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Status")]
    pub status: String,

    #[serde(rename = "Notes", default)]
    pub notes: String,

    #[serde(rename = "Output", default)]
    pub output: String,

    #[serde(rename = "ServiceID", default)]
    pub service_id: String,

    #[serde(rename = "ServiceName", default)]
    pub service_name: String,
}

/// One entry of `GET /v1/health/service/<name>`: a node, the service
/// instance it runs, and the checks covering both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEntry {
    #[serde(rename = "Node")]
    pub node: Node,

    #[serde(rename = "Service")]
    pub service: AgentService,

    #[serde(rename = "Checks", default)]
    pub checks: Vec<HealthCheck>,
}

impl ServiceEntry {
    /// True when every check on this entry reports `passing`.
    pub fn all_passing(&self) -> bool {
        self.checks.iter().all(|check| check.status == "passing")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_state_renders_lowercase() {
        assert_eq!(HealthState::Critical.as_str(), "critical");
        assert_eq!(
            serde_json::to_string(&HealthState::Any).unwrap(),
            r#""any""#
        );
    }

    #[test]
    fn service_entry_deserializes() {
        let json = r#"{
            "Node": {"Node": "foobar", "Address": "10.1.10.12"},
            "Service": {"ID": "redis", "Service": "redis", "Tags": null, "Port": 8000, "Address": ""},
            "Checks": [
                {"Node": "foobar", "CheckID": "serfHealth", "Name": "Serf Health Status", "Status": "passing"},
                {"Node": "foobar", "CheckID": "service:redis", "Name": "Service 'redis' check", "Status": "critical"}
            ]
        }"#;

        let entry: ServiceEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.service.service, "redis");
        assert_eq!(entry.checks.len(), 2);
        assert!(!entry.all_passing());
    }
}
