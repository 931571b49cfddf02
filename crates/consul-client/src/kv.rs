//! Key/value store endpoints.

use std::sync::Arc;
use std::time::Duration;

use consul_api::kv::KvPair;

use crate::{
    constants::api_path,
    error::{ConsulError, Result},
    http::{HttpTransport, Params},
    options::{Indexed, QueryOptions},
};

/// Options for `Kv::put`.
#[derive(Clone, Debug, Default)]
pub struct KvPutOptions {
    /// Check-and-set: the write succeeds only if the key's modify index
    /// matches. 0 means "only if the key does not exist yet".
    pub cas: Option<u64>,
    /// Opaque user flags stored with the entry.
    pub flags: Option<u64>,
    /// Acquire the key's lock for this session.
    pub acquire: Option<String>,
    /// Release the lock held by this session.
    pub release: Option<String>,
    pub datacenter: Option<String>,
    pub token: Option<String>,
}

impl KvPutOptions {
    pub fn cas(index: u64) -> Self {
        Self {
            cas: Some(index),
            ..Self::default()
        }
    }

    pub fn acquire(session: &str) -> Self {
        Self {
            acquire: Some(session.to_string()),
            ..Self::default()
        }
    }

    pub fn release(session: &str) -> Self {
        Self {
            release: Some(session.to_string()),
            ..Self::default()
        }
    }
}

/// Options for `Kv::delete`.
#[derive(Clone, Debug, Default)]
pub struct KvDeleteOptions {
    /// Delete the whole prefix.
    pub recurse: bool,
    /// Check-and-set: delete only if the key's modify index matches.
    pub cas: Option<u64>,
    pub datacenter: Option<String>,
    pub token: Option<String>,
}

/// Handle for the `/v1/kv` endpoints.
#[derive(Clone)]
pub struct Kv {
    pub(crate) transport: Arc<HttpTransport>,
}

impl Kv {
    /// Fetch a single key. Returns the entry (or `None` if absent)
    /// together with the index to watch it at.
    pub async fn get(&self, key: &str, options: &QueryOptions) -> Result<Indexed<Option<KvPair>>> {
        let path = self.key_path(key)?;
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        let entries: Indexed<Vec<KvPair>> = self
            .transport
            .get_indexed_list(
                &path,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await?;
        Ok(Indexed {
            index: entries.index,
            body: entries.body.into_iter().next(),
        })
    }

    /// Fetch every entry under a prefix.
    pub async fn get_recurse(
        &self,
        prefix: &str,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<KvPair>>> {
        let path = self.key_path(prefix)?;
        let mut params = vec![("recurse", "1".to_string())];
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get_indexed_list(
                &path,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await
    }

    /// List key names under a prefix without their values. With a
    /// separator, keys are rolled up at the first separator past the
    /// prefix, directory-listing style.
    pub async fn keys(
        &self,
        prefix: &str,
        separator: Option<&str>,
        options: &QueryOptions,
    ) -> Result<Indexed<Vec<String>>> {
        let path = self.key_path(prefix)?;
        let mut params = vec![("keys", "1".to_string())];
        if let Some(separator) = separator {
            params.push(("separator", separator.to_string()));
        }
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get_indexed_list(
                &path,
                params,
                options.token.as_deref(),
                options.poll_timeout(),
            )
            .await
    }

    /// Write a value. Returns `false` when a `cas`, `acquire` or `release`
    /// precondition was not met.
    pub async fn put(&self, key: &str, value: Vec<u8>, options: &KvPutOptions) -> Result<bool> {
        let path = self.key_path(key)?;
        let mut params = Params::new();
        if let Some(cas) = options.cas {
            params.push(("cas", cas.to_string()));
        }
        if let Some(flags) = options.flags {
            params.push(("flags", flags.to_string()));
        }
        if let Some(session) = &options.acquire {
            params.push(("acquire", session.to_string()));
        }
        if let Some(session) = &options.release {
            params.push(("release", session.to_string()));
        }
        if let Some(dc) = options
            .datacenter
            .as_deref()
            .or(self.transport.config.datacenter.as_deref())
        {
            params.push(("dc", dc.to_string()));
        }

        self.transport
            .put_raw(&path, params, value, options.token.as_deref())
            .await
    }

    /// Delete a key or, recursively, a prefix. Returns `false` when a
    /// `cas` precondition was not met.
    pub async fn delete(&self, key: &str, options: &KvDeleteOptions) -> Result<bool> {
        let path = self.key_path(key)?;
        let mut params = Params::new();
        if options.recurse {
            params.push(("recurse", "1".to_string()));
        }
        if let Some(cas) = options.cas {
            params.push(("cas", cas.to_string()));
        }
        if let Some(dc) = options
            .datacenter
            .as_deref()
            .or(self.transport.config.datacenter.as_deref())
        {
            params.push(("dc", dc.to_string()));
        }

        self.transport
            .delete(&path, params, options.token.as_deref())
            .await
    }

    /// Block until the key changes past `index`, up to `wait`. Convenience
    /// over [`Kv::get`] with index and wait set.
    pub async fn watch(
        &self,
        key: &str,
        index: u64,
        wait: Duration,
        options: &QueryOptions,
    ) -> Result<Indexed<Option<KvPair>>> {
        let options = QueryOptions {
            index: Some(index),
            wait: Some(wait),
            ..options.clone()
        };
        self.get(key, &options).await
    }

    fn key_path(&self, key: &str) -> Result<String> {
        if key.starts_with('/') {
            return Err(ConsulError::InvalidInput(format!(
                "keys must not start with a slash: {key}"
            )));
        }
        Ok(format!("{}/{}", api_path::KV, key))
    }
}
