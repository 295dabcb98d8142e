use setnav_types::{ObjRef, TypeError};

/// Errors from workspace service operations.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// The addressed workspace does not exist or is not readable.
    #[error("no such workspace: {0}")]
    NoSuchWorkspace(String),

    /// The addressed object version does not exist in its workspace.
    #[error("no such object: {0}")]
    NoSuchObject(ObjRef),

    /// A reference-path lookup named an object the container does not hold.
    #[error("object {object} is not reachable via {via}")]
    Unreachable { via: ObjRef, object: ObjRef },

    /// The service reported an error for the call.
    #[error("workspace service error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// HTTP transport failure.
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service response could not be decoded.
    #[error("malformed service response: {0}")]
    Malformed(String),

    /// A reference or identifier in the response was invalid.
    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Result alias for workspace service operations.
pub type WsResult<T> = Result<T, WorkspaceError>;
