use serde::{Deserialize, Serialize};
use setnav_types::{ObjRef, WorkspaceIdentity};

/// Parameters for one windowed `list_objects` enumeration call.
///
/// The service bounds enumeration by object-id range rather than by result
/// count, so callers walk a large workspace in `[min, max)` windows. Type
/// matching is by unversioned type string: `KBaseSets.ReadsSet` matches
/// every stored version of that type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListObjectsQuery {
    /// Workspace to enumerate.
    pub workspace: WorkspaceIdentity,
    /// Unversioned type string to match.
    pub type_string: String,
    /// Lowest object id to return (inclusive).
    pub min_object_id: u64,
    /// Upper bound on object ids (exclusive).
    pub max_object_id: u64,
    /// Whether to include user metadata in the returned records.
    pub include_metadata: bool,
}

impl ListObjectsQuery {
    /// Query for all objects of one type, full id range, no metadata.
    pub fn new(workspace: WorkspaceIdentity, type_string: impl Into<String>) -> Self {
        Self {
            workspace,
            type_string: type_string.into(),
            min_object_id: 0,
            max_object_id: u64::MAX,
            include_metadata: false,
        }
    }

    /// Restrict the query to object ids in `[min, max)`.
    pub fn window(mut self, min: u64, max: u64) -> Self {
        self.min_object_id = min;
        self.max_object_id = max;
        self
    }

    /// Include user metadata in the returned records.
    pub fn with_metadata(mut self) -> Self {
        self.include_metadata = true;
        self
    }
}

/// Addresses one object for a batched fetch.
///
/// The plain form addresses an object the caller can read directly. The
/// reference-path form resolves an object through a container the caller can
/// read: the service grants access to any object a readable container
/// references, without requiring direct permission on the target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSpec {
    /// The directly-addressed object (a container when `path` is set).
    pub target: ObjRef,
    /// Reference path from `target` to the object actually wanted.
    /// Empty for direct addressing.
    pub path: Vec<ObjRef>,
}

impl ObjectSpec {
    /// Address an object directly.
    pub fn direct(target: ObjRef) -> Self {
        Self {
            target,
            path: Vec::new(),
        }
    }

    /// Address `item` through the container `via`.
    pub fn via(via: ObjRef, item: ObjRef) -> Self {
        Self {
            target: via,
            path: vec![item],
        }
    }

    /// The object version this spec addresses: the end of the reference
    /// path, or the target itself for direct addressing.
    pub fn resolved(&self) -> ObjRef {
        self.path.last().copied().unwrap_or(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_builder_sets_window_and_metadata() {
        let q = ListObjectsQuery::new(WorkspaceIdentity::Id(6), "KBaseSets.ReadsSet")
            .window(0, 10_000)
            .with_metadata();
        assert_eq!(q.min_object_id, 0);
        assert_eq!(q.max_object_id, 10_000);
        assert!(q.include_metadata);
        assert_eq!(q.type_string, "KBaseSets.ReadsSet");
    }

    #[test]
    fn direct_spec_resolves_to_target() {
        let r = ObjRef::new(6, 1, 1);
        assert_eq!(ObjectSpec::direct(r).resolved(), r);
    }

    #[test]
    fn path_spec_resolves_to_path_end() {
        let set = ObjRef::new(6, 1, 1);
        let item = ObjRef::new(6, 2, 1);
        let spec = ObjectSpec::via(set, item);
        assert_eq!(spec.target, set);
        assert_eq!(spec.resolved(), item);
    }
}
