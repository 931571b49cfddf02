//! Client error types.

/// Error type for Consul client operations.
#[derive(Debug, thiserror::Error)]
pub enum ConsulError {
    /// 400: the request was malformed (bad CAS index, invalid session, ...).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// 401: the endpoint requires ACLs and they are disabled on the cluster.
    #[error("ACL support disabled: {0}")]
    AclDisabled(String),

    /// 403: the supplied token does not grant access.
    #[error("ACL permission denied: {0}")]
    PermissionDenied(String),

    /// 404 on an endpoint where absence is not an answer.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("server returned client error: status={status}, body={body}")]
    Client { status: u16, body: String },

    #[error("server error: status={status}, body={body}")]
    Server { status: u16, body: String },

    /// The response lacked the `X-Consul-Index` header on an endpoint that
    /// supports blocking queries.
    #[error("response missing X-Consul-Index header")]
    MissingIndex,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConsulError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConsulError::PermissionDenied("rpc error: Permission denied".to_string());
        assert_eq!(
            err.to_string(),
            "ACL permission denied: rpc error: Permission denied"
        );

        let err = ConsulError::Server {
            status: 500,
            body: "internal error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "server error: status=500, body=internal error"
        );

        let err = ConsulError::MissingIndex;
        assert_eq!(err.to_string(), "response missing X-Consul-Index header");
    }
}
