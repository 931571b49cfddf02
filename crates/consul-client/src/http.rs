//! HTTP transport with retries and response decoding.
//!
//! Everything here speaks the agent's wire conventions once, so the
//! endpoint modules stay declarative: build a path, collect query
//! parameters, pick the decode shape.

use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode, header::HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    error::{ConsulError, Result},
    options::Indexed,
};

/// Query parameters, in insertion order. Consul accepts repeated keys
/// (`node-meta`) so this stays a list rather than a map.
pub(crate) type Params = Vec<(&'static str, String)>;

const INDEX_HEADER: &str = "X-Consul-Index";
const TOKEN_HEADER: &str = "X-Consul-Token";

/// Request body variants the endpoints need.
enum Payload {
    None,
    Json(serde_json::Value),
    Raw(Vec<u8>),
}

/// Shared transport underneath every endpoint handle.
pub(crate) struct HttpTransport {
    client: Client,
    pub(crate) config: ClientConfig,
}

impl HttpTransport {
    pub(crate) fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms));
        if !config.tls_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.config.address, path)
    }

    /// Send one request, retrying connection failures with exponential
    /// backoff. A connect error means the request never reached the agent,
    /// so retrying is safe for writes too.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        payload: &Payload,
        token: Option<&str>,
        poll_timeout: Option<Duration>,
    ) -> Result<Response> {
        let url = self.build_url(path);
        let token = token.or(self.config.token.as_deref());

        let mut attempt = 0;
        loop {
            let mut request = self.client.request(method.clone(), &url).query(params);
            if let Some(token) = token {
                request = request.header(TOKEN_HEADER, token);
            }
            // Blocking queries are held open server-side for their wait
            // duration, so the client allows that on top of the read timeout.
            if let Some(wait) = poll_timeout {
                request =
                    request.timeout(wait + Duration::from_millis(self.config.read_timeout_ms));
            }
            request = match payload {
                Payload::None => request,
                Payload::Json(body) => request.json(body),
                Payload::Raw(bytes) => request.body(bytes.clone()),
            };

            match request.send().await {
                Ok(response) => {
                    debug!(%url, status = %response.status(), "request complete");
                    return Ok(response);
                }
                Err(err) if err.is_connect() && attempt < self.config.retries => {
                    attempt += 1;
                    let backoff = self.config.retry_backoff_ms << (attempt - 1).min(6);
                    warn!(%url, attempt, backoff_ms = backoff, "connection failed, retrying: {err}");
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Map a non-success status to the matching error, consuming the body
    /// for context.
    async fn into_error(response: Response) -> ConsulError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::BAD_REQUEST => ConsulError::BadRequest(body),
            StatusCode::UNAUTHORIZED => ConsulError::AclDisabled(body),
            StatusCode::FORBIDDEN => ConsulError::PermissionDenied(body),
            StatusCode::NOT_FOUND => ConsulError::NotFound(body),
            status if status.is_client_error() => ConsulError::Client {
                status: status.as_u16(),
                body,
            },
            status => ConsulError::Server {
                status: status.as_u16(),
                body,
            },
        }
    }

    fn parse_index(value: Option<&HeaderValue>) -> Result<u64> {
        value
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .ok_or(ConsulError::MissingIndex)
    }

    /// GET decoding the body on success.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        token: Option<&str>,
    ) -> Result<T> {
        let response = self
            .execute(Method::GET, path, &params, &Payload::None, token, None)
            .await?;
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// GET where 404 is an answer, not an error.
    pub(crate) async fn get_opt<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        token: Option<&str>,
    ) -> Result<Option<T>> {
        let response = self
            .execute(Method::GET, path, &params, &Payload::None, token, None)
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(Some(response.json().await?))
    }

    /// GET on a blocking-query endpoint returning a single object. The
    /// index header is parsed even on 404, so absence can be watched too.
    pub(crate) async fn get_indexed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        token: Option<&str>,
        poll_timeout: Option<Duration>,
    ) -> Result<Indexed<Option<T>>> {
        let response = self
            .execute(Method::GET, path, &params, &Payload::None, token, poll_timeout)
            .await?;
        if !response.status().is_success() && response.status() != StatusCode::NOT_FOUND {
            return Err(Self::into_error(response).await);
        }
        let index = Self::parse_index(response.headers().get(INDEX_HEADER))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Indexed { index, body: None });
        }
        Ok(Indexed {
            index,
            body: Some(response.json().await?),
        })
    }

    /// GET on a blocking-query endpoint returning a list. 404 and `null`
    /// both decode to an empty list.
    pub(crate) async fn get_indexed_list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        token: Option<&str>,
        poll_timeout: Option<Duration>,
    ) -> Result<Indexed<Vec<T>>> {
        let response = self
            .execute(Method::GET, path, &params, &Payload::None, token, poll_timeout)
            .await?;
        if !response.status().is_success() && response.status() != StatusCode::NOT_FOUND {
            return Err(Self::into_error(response).await);
        }
        let index = Self::parse_index(response.headers().get(INDEX_HEADER))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Indexed {
                index,
                body: Vec::new(),
            });
        }
        let body: Option<Vec<T>> = response.json().await?;
        Ok(Indexed {
            index,
            body: body.unwrap_or_default(),
        })
    }

    /// PUT with a JSON body, decoding the response body.
    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        params: Params,
        body: &B,
        token: Option<&str>,
    ) -> Result<T> {
        let payload = Payload::Json(serde_json::to_value(body)?);
        let response = self
            .execute(Method::PUT, path, &params, &payload, token, None)
            .await?;
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// PUT with a raw byte body, decoding the response body.
    pub(crate) async fn put_raw<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        body: Vec<u8>,
        token: Option<&str>,
    ) -> Result<T> {
        let response = self
            .execute(Method::PUT, path, &params, &Payload::Raw(body), token, None)
            .await?;
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Body-less PUT where success means `true` and 404 means `false`.
    pub(crate) async fn put_ok(
        &self,
        path: &str,
        params: Params,
        token: Option<&str>,
    ) -> Result<bool> {
        let response = self
            .execute(Method::PUT, path, &params, &Payload::None, token, None)
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(true)
    }

    /// PUT with a JSON body where only success matters.
    pub(crate) async fn put_json_ok<B: Serialize>(
        &self,
        path: &str,
        params: Params,
        body: &B,
        token: Option<&str>,
    ) -> Result<bool> {
        let payload = Payload::Json(serde_json::to_value(body)?);
        let response = self
            .execute(Method::PUT, path, &params, &payload, token, None)
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(true)
    }

    /// Body-less PUT where the response body is ignored.
    pub(crate) async fn put_unit(
        &self,
        path: &str,
        params: Params,
        token: Option<&str>,
    ) -> Result<()> {
        let response = self
            .execute(Method::PUT, path, &params, &Payload::None, token, None)
            .await?;
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(())
    }

    /// PUT with a JSON body where the response body is ignored.
    pub(crate) async fn put_json_unit<B: Serialize>(
        &self,
        path: &str,
        params: Params,
        body: &B,
        token: Option<&str>,
    ) -> Result<()> {
        let payload = Payload::Json(serde_json::to_value(body)?);
        let response = self
            .execute(Method::PUT, path, &params, &payload, token, None)
            .await?;
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(())
    }

    /// Body-less PUT decoding the response body.
    pub(crate) async fn put_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        token: Option<&str>,
    ) -> Result<T> {
        let response = self
            .execute(Method::PUT, path, &params, &Payload::None, token, None)
            .await?;
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Body-less PUT where 404 is an answer, not an error.
    pub(crate) async fn put_empty_opt<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        token: Option<&str>,
    ) -> Result<Option<T>> {
        let response = self
            .execute(Method::PUT, path, &params, &Payload::None, token, None)
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(Some(response.json().await?))
    }

    /// PUT with a JSON body where 409 Conflict still carries a decodable
    /// body (transaction rollback).
    pub(crate) async fn put_json_or_conflict<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        params: Params,
        body: &B,
        token: Option<&str>,
    ) -> Result<T> {
        let payload = Payload::Json(serde_json::to_value(body)?);
        let response = self
            .execute(Method::PUT, path, &params, &payload, token, None)
            .await?;
        if !response.status().is_success() && response.status() != StatusCode::CONFLICT {
            return Err(Self::into_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// POST with a JSON body, decoding the response body.
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        params: Params,
        body: &B,
        token: Option<&str>,
    ) -> Result<T> {
        let payload = Payload::Json(serde_json::to_value(body)?);
        let response = self
            .execute(Method::POST, path, &params, &payload, token, None)
            .await?;
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// DELETE decoding the response body.
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Params,
        token: Option<&str>,
    ) -> Result<T> {
        let response = self
            .execute(Method::DELETE, path, &params, &Payload::None, token, None)
            .await?;
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// DELETE where only success matters.
    pub(crate) async fn delete_ok(
        &self,
        path: &str,
        params: Params,
        token: Option<&str>,
    ) -> Result<bool> {
        let response = self
            .execute(Method::DELETE, path, &params, &Payload::None, token, None)
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(true)
    }
}
