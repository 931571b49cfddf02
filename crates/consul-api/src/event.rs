use serde::{Deserialize, Serialize};

/// A custom user event, as returned by `PUT /v1/event/fire/<name>` and
/// `GET /v1/event/list`. The payload travels base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEvent {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Payload", with = "crate::serde_ext::base64_bytes", default)]
    pub payload: Option<Vec<u8>>,

    #[serde(rename = "NodeFilter", default)]
    pub node_filter: String,

    #[serde(rename = "ServiceFilter", default)]
    pub service_filter: String,

    #[serde(rename = "TagFilter", default)]
    pub tag_filter: String,

    #[serde(rename = "Version", default)]
    pub version: u32,

    /// Lamport clock time of the event. Not a raft index; the event
    /// endpoints use it in place of `X-Consul-Index`.
    #[serde(rename = "LTime", default)]
    pub ltime: u64,
}

impl UserEvent {
    /// The payload as UTF-8 text, if present and valid UTF-8.
    pub fn payload_str(&self) -> Option<&str> {
        self.payload
            .as_deref()
            .and_then(|p| std::str::from_utf8(p).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_decodes_payload() {
        let json = r#"{
            "ID": "b54fe110-7af5-cafc-d1fb-afc8ba432b1c",
            "Name": "deploy",
            "Payload": "MTYwOTAzMA==",
            "NodeFilter": "",
            "ServiceFilter": "",
            "TagFilter": "",
            "Version": 1,
            "LTime": 19
        }"#;

        let event: UserEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.payload_str(), Some("1609030"));
        assert_eq!(event.ltime, 19);
    }

    #[test]
    fn event_without_payload() {
        let json = r#"{"ID": "x", "Name": "restart", "Payload": null}"#;
        let event: UserEvent = serde_json::from_str(json).unwrap();
        assert!(event.payload.is_none());
    }
}
