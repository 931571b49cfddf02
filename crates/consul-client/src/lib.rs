//! Async client for the Consul v1 HTTP API.
//!
//! The entry point is [`Consul`]: build one from a [`ClientConfig`] and
//! reach the endpoint groups through its accessors.
//!
//! ```no_run
//! use consul_client::{ClientConfig, Consul, QueryOptions};
//!
//! # async fn run() -> consul_client::Result<()> {
//! let consul = Consul::new(ClientConfig::default())?;
//!
//! consul.kv().put("app/config", b"v1".to_vec(), &Default::default()).await?;
//! let entry = consul.kv().get("app/config", &QueryOptions::new()).await?;
//! assert_eq!(entry.body.and_then(|p| p.value), Some(b"v1".to_vec()));
//! # Ok(())
//! # }
//! ```
//!
//! Read endpoints return [`Indexed`] values; feed the index back via
//! [`QueryOptions::with_index`] to turn the next call into a blocking
//! query that returns once the data changes (or the wait expires).
//!
//! A synchronous facade for non-async callers lives in [`blocking`].

pub mod acl;
pub mod agent;
pub mod blocking;
pub mod catalog;
mod config;
mod constants;
pub mod coordinate;
mod error;
pub mod event;
pub mod health;
mod http;
pub mod kv;
pub mod operator;
mod options;
pub mod query;
pub mod session;
pub mod status;
pub mod txn;

use std::sync::Arc;

pub use config::ClientConfig;
pub use error::{ConsulError, Result};
pub use options::{Consistency, Indexed, QueryOptions};

/// Re-exported wire models.
pub use consul_api as api;

use http::HttpTransport;

/// Handle to a Consul agent. Cheap to clone; all clones share one
/// connection pool.
#[derive(Clone)]
pub struct Consul {
    transport: Arc<HttpTransport>,
}

impl Consul {
    /// Create a client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)?),
        })
    }

    /// Create a client from the `CONSUL_HTTP_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Key/value store.
    pub fn kv(&self) -> kv::Kv {
        kv::Kv {
            transport: self.transport.clone(),
        }
    }

    /// Atomic multi-key transactions.
    pub fn txn(&self) -> txn::Txn {
        txn::Txn {
            transport: self.transport.clone(),
        }
    }

    /// Local agent: service/check registration, members, maintenance.
    pub fn agent(&self) -> agent::Agent {
        agent::Agent {
            transport: self.transport.clone(),
        }
    }

    /// Cluster catalog.
    pub fn catalog(&self) -> catalog::Catalog {
        catalog::Catalog {
            transport: self.transport.clone(),
        }
    }

    /// Health checks and service discovery with health filtering.
    pub fn health(&self) -> health::Health {
        health::Health {
            transport: self.transport.clone(),
        }
    }

    /// Sessions for distributed locking.
    pub fn session(&self) -> session::Session {
        session::Session {
            transport: self.transport.clone(),
        }
    }

    /// Legacy ACL tokens.
    pub fn acl(&self) -> acl::Acl {
        acl::Acl {
            transport: self.transport.clone(),
        }
    }

    /// Custom user events.
    pub fn event(&self) -> event::Event {
        event::Event {
            transport: self.transport.clone(),
        }
    }

    /// Raft leader and peers.
    pub fn status(&self) -> status::Status {
        status::Status {
            transport: self.transport.clone(),
        }
    }

    /// Prepared queries.
    pub fn query(&self) -> query::Query {
        query::Query {
            transport: self.transport.clone(),
        }
    }

    /// Network tomography coordinates.
    pub fn coordinate(&self) -> coordinate::Coordinate {
        coordinate::Coordinate {
            transport: self.transport.clone(),
        }
    }

    /// Operator-only cluster internals.
    pub fn operator(&self) -> operator::Operator {
        operator::Operator {
            transport: self.transport.clone(),
        }
    }
}
