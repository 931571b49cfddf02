//! Client configuration.

use url::Url;

use crate::{
    error::{ConsulError, Result},
    options::Consistency,
};

/// Configuration for a [`Consul`](crate::Consul) client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Agent address, scheme included (e.g. `http://127.0.0.1:8500`).
    pub address: String,
    /// Default ACL token sent with every request.
    pub token: Option<String>,
    /// Default datacenter for requests that accept one.
    pub datacenter: Option<String>,
    /// Default consistency mode for reads.
    pub consistency: Consistency,
    /// Connection timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds. Blocking queries extend this by their
    /// wait duration.
    pub read_timeout_ms: u64,
    /// Verify TLS certificates when the scheme is `https`.
    pub tls_verify: bool,
    /// How many times a request is retried after a connection failure.
    pub retries: u32,
    /// Base backoff between retries in milliseconds; doubles per attempt.
    pub retry_backoff_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:8500".to_string(),
            token: None,
            datacenter: None,
            consistency: Consistency::Default,
            connect_timeout_ms: 5000,
            read_timeout_ms: 30000,
            tls_verify: true,
            retries: 2,
            retry_backoff_ms: 250,
        }
    }
}

impl ClientConfig {
    /// Create a new config pointing at the given agent address.
    pub fn new(address: &str) -> Self {
        Self {
            address: normalize_address(address),
            ..Default::default()
        }
    }

    /// Read configuration from the standard `CONSUL_HTTP_*` environment
    /// variables, falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("CONSUL_HTTP_ADDR") {
            config.address = normalize_address(&addr);
        }
        if let Ok(token) = std::env::var("CONSUL_HTTP_TOKEN") {
            if !token.is_empty() {
                config.token = Some(token);
            }
        }
        if let Ok(ssl) = std::env::var("CONSUL_HTTP_SSL") {
            let mut url = Url::parse(&config.address)
                .map_err(|e| ConsulError::InvalidConfig(format!("bad address: {e}")))?;
            let scheme = if is_truthy(&ssl) { "https" } else { "http" };
            url.set_scheme(scheme)
                .map_err(|_| ConsulError::InvalidConfig("cannot set scheme".to_string()))?;
            config.address = url.to_string().trim_end_matches('/').to_string();
        }
        if let Ok(verify) = std::env::var("CONSUL_HTTP_SSL_VERIFY") {
            config.tls_verify = is_truthy(&verify);
        }

        Ok(config)
    }

    /// Set the default ACL token.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Set the default datacenter.
    pub fn with_datacenter(mut self, datacenter: &str) -> Self {
        self.datacenter = Some(datacenter.to_string());
        self
    }

    /// Set the default consistency mode.
    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = consistency;
        self
    }

    /// Set timeouts.
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }

    /// Disable TLS certificate verification.
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set the retry policy for connection failures.
    pub fn with_retries(mut self, retries: u32, backoff_ms: u64) -> Self {
        self.retries = retries;
        self.retry_backoff_ms = backoff_ms;
        self
    }
}

/// Accept both `host:port` and full URLs.
fn normalize_address(address: &str) -> String {
    let with_scheme = if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{address}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
