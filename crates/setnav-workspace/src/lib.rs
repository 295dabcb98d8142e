//! The workspace service boundary.
//!
//! This crate owns everything that touches the remote object-storage
//! service ("Workspace"): the narrow client contract the rest of the system
//! consumes, the request types, and the two implementations of that
//! contract.
//!
//! # Client Implementations
//!
//! All implementations satisfy the [`WorkspaceClient`] trait:
//!
//! - [`InMemoryWorkspace`] — `HashMap`-based workspace for tests and
//!   embedding, with call accounting so tests can assert how many RPCs a
//!   caller issued
//! - [`RpcWorkspace`] — JSON-RPC 1.1 over HTTP against a live service
//!
//! # Design Rules
//!
//! 1. The service's positional wire tuples are decoded into named structs
//!    here and nowhere else.
//! 2. Calls are synchronous and sequential; no retries, no local recovery.
//! 3. Service failures propagate unchanged as [`WorkspaceError`].

pub mod error;
pub mod memory;
pub mod query;
pub mod rpc;
pub mod traits;
mod wire;

pub use error::{WorkspaceError, WsResult};
pub use memory::{CallCounts, InMemoryWorkspace};
pub use query::{ListObjectsQuery, ObjectSpec};
pub use rpc::RpcWorkspace;
pub use traits::WorkspaceClient;
