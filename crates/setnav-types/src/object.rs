use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::obj_ref::ObjRef;

/// Metadata for one stored object version.
///
/// The workspace service reports this as an 11-position tuple; the service
/// adapter decodes it into this named struct at the wire boundary, so the
/// rest of the system never indexes into positional data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object id, unique within the owning workspace.
    pub object_id: u64,
    /// Object name, unique among live objects in the workspace.
    pub name: String,
    /// Full type string, e.g. `KBaseSets.ReadsSet-2.1`.
    pub type_string: String,
    /// Timestamp of the save that created this version.
    pub saved_at: String,
    /// Version number, starting at 1.
    pub version: u64,
    /// Username that saved this version.
    pub saved_by: String,
    /// Id of the owning workspace.
    pub workspace_id: u64,
    /// Name of the owning workspace.
    pub workspace_name: String,
    /// MD5 checksum of the object data.
    pub checksum: String,
    /// Size of the object data in bytes.
    pub size: u64,
    /// User metadata attached to this version.
    pub metadata: BTreeMap<String, String>,
}

impl ObjectInfo {
    /// The reference addressing exactly this object version:
    /// `workspace_id/object_id/version`.
    pub fn obj_ref(&self) -> ObjRef {
        ObjRef::new(self.workspace_id, self.object_id, self.version)
    }
}
