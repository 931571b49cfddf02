use serde::{Deserialize, Serialize};

/// A single entry in the key/value store.
///
/// `GET /v1/kv/<key>` returns a list of these; the `Value` field arrives
/// base64-encoded and is exposed here as raw bytes. A `null` value marks a
/// key used as a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvPair {
    #[serde(rename = "Key")]
    pub key: String,

    #[serde(rename = "Value", with = "crate::serde_ext::base64_bytes", default)]
    pub value: Option<Vec<u8>>,

    #[serde(rename = "Flags", default)]
    pub flags: u64,

    #[serde(rename = "CreateIndex")]
    pub create_index: u64,

    #[serde(rename = "ModifyIndex")]
    pub modify_index: u64,

    #[serde(rename = "LockIndex", default)]
    pub lock_index: u64,

    /// Session currently holding the lock on this key, if any.
    #[serde(rename = "Session", default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

impl KvPair {
    /// The value as UTF-8 text, if it is present and valid UTF-8.
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_deref().and_then(|v| std::str::from_utf8(v).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_entry() {
        let json = r#"{
            "CreateIndex": 100,
            "ModifyIndex": 200,
            "LockIndex": 200,
            "Key": "foo",
            "Flags": 0,
            "Value": "YmFy",
            "Session": "adf4238a-882b-9ddc-4a9d-5b6758e4159e"
        }"#;

        let pair: KvPair = serde_json::from_str(json).unwrap();
        assert_eq!(pair.key, "foo");
        assert_eq!(pair.value_str(), Some("bar"));
        assert_eq!(pair.modify_index, 200);
        assert!(pair.session.is_some());
    }

    #[test]
    fn directory_entry_has_no_value() {
        let json = r#"{"CreateIndex":1,"ModifyIndex":1,"LockIndex":0,"Key":"dir/","Flags":0,"Value":null}"#;
        let pair: KvPair = serde_json::from_str(json).unwrap();
        assert!(pair.value.is_none());
        assert!(pair.value_str().is_none());
    }
}
