use setnav_types::{ObjRef, ObjectInfo, WorkspaceIdentity, WorkspaceInfo};

use crate::error::WsResult;
use crate::query::{ListObjectsQuery, ObjectSpec};

/// The narrow contract consumed from the workspace service.
///
/// All implementations must satisfy these invariants:
/// - Calls are synchronous; each blocks until the service answers.
/// - Batched calls return exactly one entry per requested spec, in request
///   order. A spec the service cannot resolve fails the whole call.
/// - No retries and no partial results: any failure is propagated to the
///   caller unchanged.
/// - Implementations hold no per-call state; calls are independent.
pub trait WorkspaceClient: Send + Sync {
    /// Fetch metadata for one workspace.
    ///
    /// `WorkspaceInfo::max_object_id` is the inclusive upper bound of object
    /// ids ever assigned in the workspace and bounds windowed enumeration.
    fn get_workspace_info(&self, identity: &WorkspaceIdentity) -> WsResult<WorkspaceInfo>;

    /// Enumerate objects of one type within an object-id window.
    ///
    /// Returns records ordered by object id. An empty window, or a window
    /// past the end of the workspace, returns an empty list.
    fn list_objects(&self, query: &ListObjectsQuery) -> WsResult<Vec<ObjectInfo>>;

    /// Fetch the outgoing reference list of each requested object, without
    /// fetching object data.
    ///
    /// For set-typed objects the returned references are the set's items,
    /// in the order the set stores them.
    fn get_object_refs(&self, specs: &[ObjectSpec]) -> WsResult<Vec<Vec<ObjRef>>>;

    /// Fetch metadata for each requested object, optionally with user
    /// metadata, without fetching object data.
    ///
    /// Specs may use reference-path addressing; the returned record
    /// describes the resolved object version regardless of the path used
    /// to reach it.
    fn get_object_info(&self, specs: &[ObjectSpec], include_metadata: bool)
        -> WsResult<Vec<ObjectInfo>>;
}
