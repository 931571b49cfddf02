use serde::{Deserialize, Serialize};

use crate::kv::KvPair;

/// KV operations available inside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TxnKvVerb {
    Set,
    Cas,
    Lock,
    Unlock,
    Get,
    GetTree,
    CheckIndex,
    CheckSession,
    Delete,
    DeleteTree,
    DeleteCas,
}

/// One KV operation of a transaction. `Value` travels base64-encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvOp {
    #[serde(rename = "Verb")]
    pub verb: TxnKvVerb,

    #[serde(rename = "Key")]
    pub key: String,

    #[serde(
        rename = "Value",
        with = "crate::serde_ext::base64_bytes",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub value: Option<Vec<u8>>,

    #[serde(rename = "Flags", skip_serializing_if = "Option::is_none", default)]
    pub flags: Option<u64>,

    /// Modify index compared by `cas`, `check-index` and `delete-cas`.
    #[serde(rename = "Index", skip_serializing_if = "Option::is_none", default)]
    pub index: Option<u64>,

    #[serde(rename = "Session", skip_serializing_if = "Option::is_none", default)]
    pub session: Option<String>,
}

impl KvOp {
    pub fn set(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self::new(TxnKvVerb::Set, key, Some(value))
    }

    pub fn cas(key: impl Into<String>, value: Vec<u8>, index: u64) -> Self {
        let mut op = Self::new(TxnKvVerb::Cas, key, Some(value));
        op.index = Some(index);
        op
    }

    pub fn get(key: impl Into<String>) -> Self {
        Self::new(TxnKvVerb::Get, key, None)
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self::new(TxnKvVerb::Delete, key, None)
    }

    fn new(verb: TxnKvVerb, key: impl Into<String>, value: Option<Vec<u8>>) -> Self {
        Self {
            verb,
            key: key.into(),
            value,
            flags: None,
            index: None,
            session: None,
        }
    }
}

/// One operation of a transaction payload. Only KV operations are
/// supported by the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxnOp {
    #[serde(rename = "KV")]
    pub kv: KvOp,
}

impl From<KvOp> for TxnOp {
    fn from(kv: KvOp) -> Self {
        Self { kv }
    }
}

/// One result of a committed transaction. Write verbs return the entry
/// without its value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxnResult {
    #[serde(rename = "KV", default)]
    pub kv: Option<KvPair>,
}

/// Why one operation made the transaction roll back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxnError {
    #[serde(rename = "OpIndex")]
    pub op_index: u64,

    #[serde(rename = "What")]
    pub what: String,
}

/// Response of `PUT /v1/txn`: results on commit, errors on rollback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TxnResponse {
    #[serde(
        rename = "Results",
        default,
        deserialize_with = "crate::serde_ext::null_to_default"
    )]
    pub results: Vec<TxnResult>,

    #[serde(
        rename = "Errors",
        default,
        deserialize_with = "crate::serde_ext::null_to_default"
    )]
    pub errors: Vec<TxnError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops_serialize_with_base64_values() {
        let ops: Vec<TxnOp> = vec![
            KvOp::cas("key/one", b"one".to_vec(), 7).into(),
            KvOp::get("key/two").into(),
        ];

        let json = serde_json::to_value(&ops).unwrap();
        assert_eq!(json[0]["KV"]["Verb"], "cas");
        assert_eq!(json[0]["KV"]["Value"], "b25l");
        assert_eq!(json[0]["KV"]["Index"], 7);
        assert_eq!(json[1]["KV"]["Verb"], "get");
        assert!(json[1]["KV"].get("Value").is_none());
    }

    #[test]
    fn rollback_response_carries_errors() {
        let json = r#"{
            "Results": null,
            "Errors": [{"OpIndex": 0, "What": "key \"foo\" doesn't exist"}]
        }"#;

        let response: TxnResponse = serde_json::from_str(json).unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.errors[0].op_index, 0);
    }
}
