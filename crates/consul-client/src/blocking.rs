//! Synchronous facade over the async client.
//!
//! Each [`Consul`] owns a private single-threaded tokio runtime and drives
//! the async client on it, so callers need no runtime of their own. Do not
//! use this from inside an async context; it will panic when the inner
//! `block_on` nests.
//!
//! ```no_run
//! use consul_client::{ClientConfig, QueryOptions, blocking};
//!
//! # fn run() -> consul_client::Result<()> {
//! let consul = blocking::Consul::new(ClientConfig::default())?;
//! let leader = consul.status().leader()?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};

use consul_api::{
    acl::{AclEntry, AclRequest},
    agent::{AgentCheck, AgentMember, AgentService, CheckRegistration, ServiceRegistration},
    catalog::{CatalogDeregistration, CatalogNode, CatalogRegistration, CatalogService, Node},
    coordinate::{CoordinateDatacenter, CoordinateEntry},
    event::UserEvent,
    health::{HealthCheck, HealthState, ServiceEntry},
    kv::KvPair,
    operator::RaftConfiguration,
    query::{PreparedQuery, QueryExecution, QueryExplain},
    session::{SessionEntry, SessionRequest},
    txn::{TxnOp, TxnResponse},
};

use crate::{
    ClientConfig, Indexed, QueryOptions, Result,
    event::EventFilters,
    kv::{KvDeleteOptions, KvPutOptions},
};

/// Blocking handle to a Consul agent. Cheap to clone; clones share the
/// connection pool and the runtime.
#[derive(Clone)]
pub struct Consul {
    inner: crate::Consul,
    rt: Arc<Runtime>,
}

impl Consul {
    /// Create a blocking client from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let rt = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            inner: crate::Consul::new(config)?,
            rt: Arc::new(rt),
        })
    }

    /// Create a blocking client from the `CONSUL_HTTP_*` environment
    /// variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn kv(&self) -> Kv {
        Kv {
            inner: self.inner.kv(),
            rt: self.rt.clone(),
        }
    }

    pub fn txn(&self) -> Txn {
        Txn {
            inner: self.inner.txn(),
            rt: self.rt.clone(),
        }
    }

    pub fn agent(&self) -> Agent {
        Agent {
            inner: self.inner.agent(),
            rt: self.rt.clone(),
        }
    }

    pub fn catalog(&self) -> Catalog {
        Catalog {
            inner: self.inner.catalog(),
            rt: self.rt.clone(),
        }
    }

    pub fn health(&self) -> Health {
        Health {
            inner: self.inner.health(),
            rt: self.rt.clone(),
        }
    }

    pub fn session(&self) -> Session {
        Session {
            inner: self.inner.session(),
            rt: self.rt.clone(),
        }
    }

    pub fn acl(&self) -> Acl {
        Acl {
            inner: self.inner.acl(),
            rt: self.rt.clone(),
        }
    }

    pub fn event(&self) -> Event {
        Event {
            inner: self.inner.event(),
            rt: self.rt.clone(),
        }
    }

    pub fn status(&self) -> Status {
        Status {
            inner: self.inner.status(),
            rt: self.rt.clone(),
        }
    }

    pub fn query(&self) -> Query {
        Query {
            inner: self.inner.query(),
            rt: self.rt.clone(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            inner: self.inner.coordinate(),
            rt: self.rt.clone(),
        }
    }

    pub fn operator(&self) -> Operator {
        Operator {
            inner: self.inner.operator(),
            rt: self.rt.clone(),
        }
    }
}

/// Blocking key/value store handle.
#[derive(Clone)]
pub struct Kv {
    inner: crate::kv::Kv,
    rt: Arc<Runtime>,
}

impl Kv {
    pub fn get(&self, key: &str, options: &QueryOptions) -> Result<Indexed<Option<KvPair>>> {
        self.rt.block_on(self.inner.get(key, options))
    }

    pub fn get_recurse(
        &self,
        prefix: &str,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<KvPair>>> {
        self.rt.block_on(self.inner.get_recurse(prefix, options))
    }

    pub fn keys(
        &self,
        prefix: &str,
        separator: Option<&str>,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<String>>> {
        self.rt.block_on(self.inner.keys(prefix, separator, options))
    }

    pub fn put(&self, key: &str, value: Vec<u8>, options: &KvPutOptions) -> Result<bool> {
        self.rt.block_on(self.inner.put(key, value, options))
    }

    pub fn delete(&self, key: &str, options: &KvDeleteOptions) -> Result<bool> {
        self.rt.block_on(self.inner.delete(key, options))
    }

    pub fn watch(
        &self,
        key: &str,
        index: u64,
        wait: Duration,
        options: &QueryOptions,
    ) -> Result<Indexed<Option<KvPair>>> {
        self.rt.block_on(self.inner.watch(key, index, wait, options))
    }
}

/// Blocking transaction handle.
#[derive(Clone)]
pub struct Txn {
    inner: crate::txn::Txn,
    rt: Arc<Runtime>,
}

impl Txn {
    pub fn put(&self, operations: Vec<TxnOp>, options: &QueryOptions) -> Result<TxnResponse> {
        self.rt.block_on(self.inner.put(operations, options))
    }
}

/// Blocking local agent handle.
#[derive(Clone)]
pub struct Agent {
    inner: crate::agent::Agent,
    rt: Arc<Runtime>,
}

impl Agent {
    pub fn self_info(&self) -> Result<serde_json::Value> {
        self.rt.block_on(self.inner.self_info())
    }

    pub fn services(&self) -> Result<HashMap<String, AgentService>> {
        self.rt.block_on(self.inner.services())
    }

    pub fn checks(&self) -> Result<HashMap<String, AgentCheck>> {
        self.rt.block_on(self.inner.checks())
    }

    pub fn members(&self, wan: bool) -> Result<Vec<AgentMember>> {
        self.rt.block_on(self.inner.members(wan))
    }

    pub fn maintenance(&self, enable: bool, reason: Option<&str>) -> Result<()> {
        self.rt.block_on(self.inner.maintenance(enable, reason))
    }

    pub fn join(&self, address: &str, wan: bool) -> Result<()> {
        self.rt.block_on(self.inner.join(address, wan))
    }

    pub fn force_leave(&self, node: &str) -> Result<()> {
        self.rt.block_on(self.inner.force_leave(node))
    }

    pub fn register_service(
        &self,
        registration: &ServiceRegistration,
        token: Option<&str>,
    ) -> Result<()> {
        self.rt
            .block_on(self.inner.register_service(registration, token))
    }

    pub fn deregister_service(&self, service_id: &str) -> Result<()> {
        self.rt.block_on(self.inner.deregister_service(service_id))
    }

    pub fn service_maintenance(
        &self,
        service_id: &str,
        enable: bool,
        reason: Option<&str>,
    ) -> Result<()> {
        self.rt
            .block_on(self.inner.service_maintenance(service_id, enable, reason))
    }

    pub fn register_check(
        &self,
        registration: &CheckRegistration,
        token: Option<&str>,
    ) -> Result<()> {
        self.rt
            .block_on(self.inner.register_check(registration, token))
    }

    pub fn deregister_check(&self, check_id: &str) -> Result<()> {
        self.rt.block_on(self.inner.deregister_check(check_id))
    }

    pub fn check_pass(&self, check_id: &str, note: Option<&str>) -> Result<()> {
        self.rt.block_on(self.inner.check_pass(check_id, note))
    }

    pub fn check_warn(&self, check_id: &str, note: Option<&str>) -> Result<()> {
        self.rt.block_on(self.inner.check_warn(check_id, note))
    }

    pub fn check_fail(&self, check_id: &str, note: Option<&str>) -> Result<()> {
        self.rt.block_on(self.inner.check_fail(check_id, note))
    }
}

/// Blocking catalog handle.
#[derive(Clone)]
pub struct Catalog {
    inner: crate::catalog::Catalog,
    rt: Arc<Runtime>,
}

impl Catalog {
    pub fn register(&self, registration: &CatalogRegistration) -> Result<bool> {
        self.rt.block_on(self.inner.register(registration))
    }

    pub fn deregister(&self, deregistration: &CatalogDeregistration) -> Result<bool> {
        self.rt.block_on(self.inner.deregister(deregistration))
    }

    pub fn datacenters(&self) -> Result<Vec<String>> {
        self.rt.block_on(self.inner.datacenters())
    }

    pub fn nodes(&self, options: &QueryOptions) -> Result<Indexed<Vec<Node>>> {
        self.rt.block_on(self.inner.nodes(options))
    }

    pub fn services(&self, options: &QueryOptions) -> Result<Indexed<HashMap<String, Vec<String>>>> {
        self.rt.block_on(self.inner.services(options))
    }

    pub fn node(&self, node: &str, options: &QueryOptions) -> Result<Indexed<Option<CatalogNode>>> {
        self.rt.block_on(self.inner.node(node, options))
    }

    pub fn service(
        &self,
        service: &str,
        tag: Option<&str>,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<CatalogService>>> {
        self.rt.block_on(self.inner.service(service, tag, options))
    }
}

/// Blocking health handle.
#[derive(Clone)]
pub struct Health {
    inner: crate::health::Health,
    rt: Arc<Runtime>,
}

impl Health {
    pub fn service(
        &self,
        service: &str,
        tag: Option<&str>,
        passing: bool,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<ServiceEntry>>> {
        self.rt
            .block_on(self.inner.service(service, tag, passing, options))
    }

    pub fn checks(
        &self,
        service: &str,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<HealthCheck>>> {
        self.rt.block_on(self.inner.checks(service, options))
    }

    pub fn state(
        &self,
        state: HealthState,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<HealthCheck>>> {
        self.rt.block_on(self.inner.state(state, options))
    }

    pub fn node(&self, node: &str, options: &QueryOptions) -> Result<Indexed<Vec<HealthCheck>>> {
        self.rt.block_on(self.inner.node(node, options))
    }
}

/// Blocking session handle.
#[derive(Clone)]
pub struct Session {
    inner: crate::session::Session,
    rt: Arc<Runtime>,
}

impl Session {
    pub fn create(&self, request: &SessionRequest, options: &QueryOptions) -> Result<String> {
        self.rt.block_on(self.inner.create(request, options))
    }

    pub fn destroy(&self, session_id: &str, options: &QueryOptions) -> Result<bool> {
        self.rt.block_on(self.inner.destroy(session_id, options))
    }

    pub fn list(&self, options: &QueryOptions) -> Result<Indexed<Vec<SessionEntry>>> {
        self.rt.block_on(self.inner.list(options))
    }

    pub fn node(&self, node: &str, options: &QueryOptions) -> Result<Indexed<Vec<SessionEntry>>> {
        self.rt.block_on(self.inner.node(node, options))
    }

    pub fn info(
        &self,
        session_id: &str,
        options: &QueryOptions,
    ) -> Result<Indexed<Option<SessionEntry>>> {
        self.rt.block_on(self.inner.info(session_id, options))
    }

    pub fn renew(&self, session_id: &str, options: &QueryOptions) -> Result<SessionEntry> {
        self.rt.block_on(self.inner.renew(session_id, options))
    }
}

/// Blocking legacy ACL handle.
#[derive(Clone)]
pub struct Acl {
    inner: crate::acl::Acl,
    rt: Arc<Runtime>,
}

impl Acl {
    pub fn list(&self, options: &QueryOptions) -> Result<Indexed<Vec<AclEntry>>> {
        self.rt.block_on(self.inner.list(options))
    }

    pub fn info(&self, acl_id: &str, options: &QueryOptions) -> Result<Indexed<Option<AclEntry>>> {
        self.rt.block_on(self.inner.info(acl_id, options))
    }

    pub fn create(&self, request: &AclRequest, options: &QueryOptions) -> Result<String> {
        self.rt.block_on(self.inner.create(request, options))
    }

    pub fn update(&self, request: &AclRequest, options: &QueryOptions) -> Result<String> {
        self.rt.block_on(self.inner.update(request, options))
    }

    pub fn clone_token(&self, acl_id: &str, options: &QueryOptions) -> Result<String> {
        self.rt.block_on(self.inner.clone_token(acl_id, options))
    }

    pub fn destroy(&self, acl_id: &str, options: &QueryOptions) -> Result<bool> {
        self.rt.block_on(self.inner.destroy(acl_id, options))
    }
}

/// Blocking user event handle.
#[derive(Clone)]
pub struct Event {
    inner: crate::event::Event,
    rt: Arc<Runtime>,
}

impl Event {
    pub fn fire(
        &self,
        name: &str,
        payload: Option<Vec<u8>>,
        filters: &EventFilters,
        options: &QueryOptions,
    ) -> Result<UserEvent> {
        self.rt
            .block_on(self.inner.fire(name, payload, filters, options))
    }

    pub fn list(
        &self,
        name: Option<&str>,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<UserEvent>>> {
        self.rt.block_on(self.inner.list(name, options))
    }
}

/// Blocking status handle.
#[derive(Clone)]
pub struct Status {
    inner: crate::status::Status,
    rt: Arc<Runtime>,
}

impl Status {
    pub fn leader(&self) -> Result<String> {
        self.rt.block_on(self.inner.leader())
    }

    pub fn peers(&self) -> Result<Vec<String>> {
        self.rt.block_on(self.inner.peers())
    }
}

/// Blocking prepared query handle.
#[derive(Clone)]
pub struct Query {
    inner: crate::query::Query,
    rt: Arc<Runtime>,
}

impl Query {
    pub fn list(&self, options: &QueryOptions) -> Result<Vec<PreparedQuery>> {
        self.rt.block_on(self.inner.list(options))
    }

    pub fn create(&self, query: &PreparedQuery, options: &QueryOptions) -> Result<String> {
        self.rt.block_on(self.inner.create(query, options))
    }

    pub fn update(&self, query: &PreparedQuery, options: &QueryOptions) -> Result<()> {
        self.rt.block_on(self.inner.update(query, options))
    }

    pub fn get(&self, query_id: &str, options: &QueryOptions) -> Result<Option<PreparedQuery>> {
        self.rt.block_on(self.inner.get(query_id, options))
    }

    pub fn delete(&self, query_id: &str, options: &QueryOptions) -> Result<bool> {
        self.rt.block_on(self.inner.delete(query_id, options))
    }

    pub fn execute(
        &self,
        query: &str,
        limit: Option<u64>,
        options: &QueryOptions,
    ) -> Result<QueryExecution> {
        self.rt.block_on(self.inner.execute(query, limit, options))
    }

    pub fn explain(&self, query_name: &str, options: &QueryOptions) -> Result<QueryExplain> {
        self.rt.block_on(self.inner.explain(query_name, options))
    }
}

/// Blocking coordinate handle.
#[derive(Clone)]
pub struct Coordinate {
    inner: crate::coordinate::Coordinate,
    rt: Arc<Runtime>,
}

impl Coordinate {
    pub fn datacenters(&self) -> Result<Vec<CoordinateDatacenter>> {
        self.rt.block_on(self.inner.datacenters())
    }

    pub fn nodes(&self, options: &QueryOptions) -> Result<Indexed<Vec<CoordinateEntry>>> {
        self.rt.block_on(self.inner.nodes(options))
    }
}

/// Blocking operator handle.
#[derive(Clone)]
pub struct Operator {
    inner: crate::operator::Operator,
    rt: Arc<Runtime>,
}

impl Operator {
    pub fn raft_configuration(&self, options: &QueryOptions) -> Result<RaftConfiguration> {
        self.rt.block_on(self.inner.raft_configuration(options))
    }
}
