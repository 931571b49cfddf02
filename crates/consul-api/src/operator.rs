use serde::{Deserialize, Serialize};

/// One server in the raft configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaftServer {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Node")]
    pub node: String,

    /// `ip:port` the server listens on for raft traffic.
    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "Leader", default)]
    pub leader: bool,

    /// Non-voters receive log replication but have no say in elections.
    #[serde(rename = "Voter", default)]
    pub voter: bool,

    #[serde(rename = "ProtocolVersion", default)]
    pub protocol_version: Option<String>,
}

/// Response of `GET /v1/operator/raft/configuration`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaftConfiguration {
    #[serde(rename = "Servers", default)]
    pub servers: Vec<RaftServer>,

    #[serde(rename = "Index", default)]
    pub index: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raft_configuration_deserializes() {
        let json = r#"{
            "Servers": [{
                "ID": "127.0.0.1:8300",
                "Node": "alice",
                "Address": "127.0.0.1:8300",
                "Leader": true,
                "Voter": true
            }],
            "Index": 22
        }"#;

        let config: RaftConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(config.index, 22);
        assert!(config.servers[0].leader);
    }
}
