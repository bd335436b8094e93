use thiserror::Error;

/// Error kinds shared across the search pipeline's boundaries.
///
/// Each RPC server and the gateway map this down to the table in the
/// design's error-handling section (BAD_REQUEST/UNAUTHORIZED/ACCEPTED/
/// SERVICE_UNAVAILABLE/INTERNAL); `CoreError` itself stays transport-agnostic.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("already running")]
    AlreadyRunning,

    #[error("upstream request failed: {0}")]
    Upstream(String),

    #[error("store error: {0}")]
    Store(String),

    #[error("normalize error: {0}")]
    Normalize(String),

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("{0}")]
    Other(String),
}
