//! Prepared query endpoints.

use std::sync::Arc;

use consul_api::{
    IdResponse,
    query::{PreparedQuery, QueryExecution, QueryExplain},
};

use crate::{
    constants::api_path,
    error::{ConsulError, Result},
    http::{HttpTransport, Params},
    options::QueryOptions,
};

/// Handle for the `/v1/query` endpoints.
#[derive(Clone)]
pub struct Query {
    pub(crate) transport: Arc<HttpTransport>,
}

impl Query {
    /// All prepared queries the token can see.
    pub async fn list(&self, options: &QueryOptions) -> Result<Vec<PreparedQuery>> {
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get(api_path::QUERY, params, options.token.as_deref())
            .await
    }

    /// Create a prepared query, returning its server-assigned id.
    pub async fn create(
        &self,
        query: &PreparedQuery,
        options: &QueryOptions,
    ) -> Result<String> {
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        let response: IdResponse = self
            .transport
            .post_json(api_path::QUERY, params, query, options.token.as_deref())
            .await?;
        Ok(response.id)
    }

    /// Update an existing prepared query; the definition must carry its
    /// id.
    pub async fn update(&self, query: &PreparedQuery, options: &QueryOptions) -> Result<()> {
        let Some(id) = query.id.as_deref() else {
            return Err(ConsulError::InvalidInput(
                "prepared query update requires the query id".to_string(),
            ));
        };

        let path = format!("{}/{}", api_path::QUERY, id);
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .put_json_unit(&path, params, query, options.token.as_deref())
            .await
    }

    /// Fetch one prepared query definition.
    pub async fn get(
        &self,
        query_id: &str,
        options: &QueryOptions,
    ) -> Result<Option<PreparedQuery>> {
        let path = format!("{}/{}", api_path::QUERY, query_id);
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        let queries: Option<Vec<PreparedQuery>> = self
            .transport
            .get_opt(&path, params, options.token.as_deref())
            .await?;
        Ok(queries.and_then(|q| q.into_iter().next()))
    }

    /// Delete a prepared query.
    pub async fn delete(&self, query_id: &str, options: &QueryOptions) -> Result<bool> {
        let path = format!("{}/{}", api_path::QUERY, query_id);
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .delete_ok(&path, params, options.token.as_deref())
            .await
    }

    /// Execute a prepared query by id or name, optionally capping the
    /// number of returned nodes.
    pub async fn execute(
        &self,
        query: &str,
        limit: Option<u64>,
        options: &QueryOptions,
    ) -> Result<QueryExecution> {
        let path = format!("{}/{}/execute", api_path::QUERY, query);
        let mut params = Params::new();
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get(&path, params, options.token.as_deref())
            .await
    }

    /// Show the fully rendered query a template would produce for the
    /// given name.
    pub async fn explain(
        &self,
        query_name: &str,
        options: &QueryOptions,
    ) -> Result<QueryExplain> {
        let path = format!("{}/{}/explain", api_path::QUERY, query_name);
        let mut params = Params::new();
        options.apply(&self.transport.config, &mut params);

        self.transport
            .get(&path, params, options.token.as_deref())
            .await
    }
}
