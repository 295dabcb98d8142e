use serde::{Deserialize, Serialize};
use setnav_types::{ObjRef, ObjectInfo};

/// One enumerated set object with its item references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEntry {
    /// Reference to this set's object version.
    #[serde(rename = "ref")]
    pub obj_ref: ObjRef,
    /// Metadata for the set object itself.
    pub info: ObjectInfo,
    /// The objects this set references, in stored order.
    pub items: Vec<SetItem>,
}

/// One object referenced from within a set.
///
/// `info` is populated only when item enrichment was requested and the
/// metadata fetch returned a record for this reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetItem {
    #[serde(rename = "ref")]
    pub obj_ref: ObjRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ObjectInfo>,
}

impl SetItem {
    /// Item with unpopulated info.
    pub fn new(obj_ref: ObjRef) -> Self {
        Self {
            obj_ref,
            info: None,
        }
    }
}

/// Result of `list_sets`: the top-level sets, in enumeration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedSets {
    pub sets: Vec<SetEntry>,
}

/// Result of the reserved `get_set_items` operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedSetItems {}
