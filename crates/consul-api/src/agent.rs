use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Health check definition used when registering services and checks.
///
/// Build one with the constructors (`Check::http`, `Check::tcp`, `Check::ttl`,
/// `Check::script`, `Check::docker`) rather than filling fields by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Check {
    #[serde(rename = "HTTP", skip_serializing_if = "Option::is_none", default)]
    pub http: Option<String>,

    #[serde(rename = "Method", skip_serializing_if = "Option::is_none", default)]
    pub method: Option<String>,

    #[serde(rename = "Header", skip_serializing_if = "Option::is_none", default)]
    pub header: Option<HashMap<String, Vec<String>>>,

    #[serde(rename = "TCP", skip_serializing_if = "Option::is_none", default)]
    pub tcp: Option<String>,

    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none", default)]
    pub ttl: Option<String>,

    /// Command and arguments for script checks.
    #[serde(rename = "Args", skip_serializing_if = "Option::is_none", default)]
    pub args: Option<Vec<String>>,

    #[serde(
        rename = "DockerContainerID",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub docker_container_id: Option<String>,

    #[serde(rename = "Shell", skip_serializing_if = "Option::is_none", default)]
    pub shell: Option<String>,

    #[serde(rename = "Interval", skip_serializing_if = "Option::is_none", default)]
    pub interval: Option<String>,

    #[serde(rename = "Timeout", skip_serializing_if = "Option::is_none", default)]
    pub timeout: Option<String>,

    /// Deregister the service automatically after the check has been
    /// critical for this long (e.g. `"90m"`).
    #[serde(
        rename = "DeregisterCriticalServiceAfter",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub deregister_critical_service_after: Option<String>,
}

impl Check {
    /// HTTP GET against `url` every `interval` (e.g. `"10s"`).
    pub fn http(url: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            http: Some(url.into()),
            interval: Some(interval.into()),
            ..Self::default()
        }
    }

    /// TCP connect attempt to `host:port` every `interval`.
    pub fn tcp(host: &str, port: u16, interval: impl Into<String>) -> Self {
        Self {
            tcp: Some(format!("{host}:{port}")),
            interval: Some(interval.into()),
            ..Self::default()
        }
    }

    /// TTL check: marked critical unless refreshed within `ttl` via the
    /// check pass/warn/fail endpoints.
    pub fn ttl(ttl: impl Into<String>) -> Self {
        Self {
            ttl: Some(ttl.into()),
            ..Self::default()
        }
    }

    /// Script check running `args` every `interval`.
    pub fn script(args: Vec<String>, interval: impl Into<String>) -> Self {
        Self {
            args: Some(args),
            interval: Some(interval.into()),
            ..Self::default()
        }
    }

    /// Script check executed inside a running docker container.
    pub fn docker(
        container_id: impl Into<String>,
        shell: impl Into<String>,
        args: Vec<String>,
        interval: impl Into<String>,
    ) -> Self {
        Self {
            docker_container_id: Some(container_id.into()),
            shell: Some(shell.into()),
            args: Some(args),
            interval: Some(interval.into()),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = Some(timeout.into());
        self
    }

    pub fn with_deregister_after(mut self, after: impl Into<String>) -> Self {
        self.deregister_critical_service_after = Some(after.into());
        self
    }
}

/// Payload for `PUT /v1/agent/service/register`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceRegistration {
    #[serde(rename = "Name")]
    pub name: String,

    /// Defaults to `Name` server-side; must be unique per agent.
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,

    #[serde(rename = "Address", skip_serializing_if = "Option::is_none", default)]
    pub address: Option<String>,

    #[serde(rename = "Port", skip_serializing_if = "Option::is_none", default)]
    pub port: Option<u16>,

    #[serde(rename = "Tags", skip_serializing_if = "Option::is_none", default)]
    pub tags: Option<Vec<String>>,

    #[serde(rename = "Meta", skip_serializing_if = "Option::is_none", default)]
    pub meta: Option<HashMap<String, String>>,

    #[serde(rename = "Check", skip_serializing_if = "Option::is_none", default)]
    pub check: Option<Check>,

    #[serde(rename = "EnableTagOverride", skip_serializing_if = "std::ops::Not::not", default)]
    pub enable_tag_override: bool,
}

impl ServiceRegistration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Payload for `PUT /v1/agent/check/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRegistration {
    #[serde(rename = "Name")]
    pub name: String,

    /// Defaults to `Name` server-side; must be unique per agent.
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,

    /// Not interpreted by Consul, human readable only.
    #[serde(rename = "Notes", skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,

    /// Associates the check with an already registered service.
    #[serde(rename = "ServiceID", skip_serializing_if = "Option::is_none", default)]
    pub service_id: Option<String>,

    #[serde(flatten)]
    pub check: Check,
}

impl CheckRegistration {
    pub fn new(name: impl Into<String>, check: Check) -> Self {
        Self {
            name: name.into(),
            id: None,
            notes: None,
            service_id: None,
            check,
        }
    }
}

/// A service as reported by `GET /v1/agent/services`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentService {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Service")]
    pub service: String,

    #[serde(rename = "Tags", default)]
    pub tags: Option<Vec<String>>,

    #[serde(rename = "Address", default)]
    pub address: String,

    #[serde(rename = "Port", default)]
    pub port: u16,

    #[serde(rename = "Meta", default)]
    pub meta: Option<HashMap<String, String>>,

    #[serde(rename = "EnableTagOverride", default)]
    pub enable_tag_override: bool,
}

/// A check as reported by `GET /v1/agent/checks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCheck {
    #[serde(rename = "CheckID")]
    pub check_id: String,

    #[serde(rename = "Name")]
    pub name: String,

    /// One of `passing`, `warning`, `critical`.
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

    #[serde(rename = "Node", default)]
    pub node: Option<String>,
}

/// A gossip pool member from `GET /v1/agent/members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMember {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Addr")]
    pub addr: String,

    #[serde(rename = "Port")]
    pub port: u16,

    #[serde(rename = "Tags", default)]
    pub tags: HashMap<String, String>,

    #[serde(rename = "Status", default)]
    pub status: i32,
}
