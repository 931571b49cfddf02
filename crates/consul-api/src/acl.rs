use serde::{Deserialize, Serialize};

/// Token kinds of the legacy ACL system. `Management` tokens bypass rule
/// evaluation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AclType {
    #[default]
    Client,
    Management,
}

/// Payload for the legacy `PUT /v1/acl/create` and `/v1/acl/update`
/// endpoints. Rules are an HCL policy document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AclRequest {
    /// Required for update, server-assigned on create.
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,

    #[serde(rename = "Name", skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,

    #[serde(rename = "Type", skip_serializing_if = "Option::is_none", default)]
    pub acl_type: Option<AclType>,

    #[serde(rename = "Rules", skip_serializing_if = "Option::is_none", default)]
    pub rules: Option<String>,
}

/// A legacy ACL token as returned by `GET /v1/acl/list` and `/v1/acl/info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AclEntry {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Type", default)]
    pub acl_type: AclType,

    #[serde(rename = "Rules", default)]
    pub rules: String,

    #[serde(rename = "CreateIndex", default)]
    pub create_index: u64,

    #[serde(rename = "ModifyIndex", default)]
    pub modify_index: u64,
}
