use thiserror::Error;

/// Errors from navigator operations.
#[derive(Debug, Error)]
pub enum NavError {
    /// A parameter failed validation. Raised before any service call;
    /// the caller can correct the parameters and retry.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// A service call failed. Propagated unchanged; the whole operation
    /// aborts with no partial result.
    #[error(transparent)]
    Workspace(#[from] setnav_workspace::WorkspaceError),
}

/// Result alias for navigator operations.
pub type NavResult<T> = Result<T, NavError>;
