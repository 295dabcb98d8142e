//! Wire codec for the workspace service's JSON-RPC payloads.
//!
//! The service reports object and workspace metadata as positional JSON
//! tuples. The decoders here are the only place positional indexing is
//! allowed; everything past this boundary works with named structs.
//! Boolean flags are 0/1 integers on this wire.

use std::collections::BTreeMap;

use serde_json::{json, Value};
use setnav_types::{ObjRef, ObjectInfo, WorkspaceIdentity, WorkspaceInfo};

use crate::error::{WorkspaceError, WsResult};
use crate::query::{ListObjectsQuery, ObjectSpec};

/// Decode an 11-position object_info tuple.
///
/// Layout: `[object_id, name, type, saved_at, version, saved_by,
/// workspace_id, workspace_name, checksum, size, metadata]`.
pub fn object_info_from_tuple(value: &Value) -> WsResult<ObjectInfo> {
    let tuple = as_tuple(value, 11, "object_info")?;
    Ok(ObjectInfo {
        object_id: field_u64(tuple, 0, "object_id")?,
        name: field_string(tuple, 1, "name")?,
        type_string: field_string(tuple, 2, "type")?,
        saved_at: field_string(tuple, 3, "saved_at")?,
        version: field_u64(tuple, 4, "version")?,
        saved_by: field_string(tuple, 5, "saved_by")?,
        workspace_id: field_u64(tuple, 6, "workspace_id")?,
        workspace_name: field_string(tuple, 7, "workspace_name")?,
        checksum: field_string(tuple, 8, "checksum")?,
        size: field_u64(tuple, 9, "size")?,
        metadata: field_metadata(tuple, 10)?,
    })
}

/// Decode a 9-position workspace_info tuple.
///
/// Layout: `[id, name, owner, modified_at, max_object_id, user_permission,
/// global_read, lock_status, metadata]`. Position 4 is the enumeration
/// upper bound.
pub fn workspace_info_from_tuple(value: &Value) -> WsResult<WorkspaceInfo> {
    let tuple = as_tuple(value, 9, "workspace_info")?;
    Ok(WorkspaceInfo {
        id: field_u64(tuple, 0, "id")?,
        name: field_string(tuple, 1, "name")?,
        owner: field_string(tuple, 2, "owner")?,
        modified_at: field_string(tuple, 3, "modified_at")?,
        max_object_id: field_u64(tuple, 4, "max_object_id")?,
        user_permission: field_string(tuple, 5, "user_permission")?,
        global_read: field_string(tuple, 6, "global_read")?,
        lock_status: field_string(tuple, 7, "lock_status")?,
        metadata: field_metadata(tuple, 8)?,
    })
}

/// Encode a workspace identity for the service: `{"id": n}` or
/// `{"workspace": name}`.
pub fn identity_params(identity: &WorkspaceIdentity) -> Value {
    match identity {
        WorkspaceIdentity::Id(id) => json!({ "id": id }),
        WorkspaceIdentity::Name(name) => json!({ "workspace": name }),
    }
}

/// Encode a windowed enumeration query for `list_objects`.
pub fn list_objects_params(query: &ListObjectsQuery) -> Value {
    let mut params = json!({
        "type": query.type_string,
        "minObjectID": query.min_object_id,
        "maxObjectID": query.max_object_id,
        "includeMetadata": flag(query.include_metadata),
    });
    let target = match &query.workspace {
        WorkspaceIdentity::Id(id) => ("ids", json!([id])),
        WorkspaceIdentity::Name(name) => ("workspaces", json!([name])),
    };
    params[target.0] = target.1;
    params
}

/// Encode one object spec: `{"ref": ...}` plus `obj_ref_path` when
/// reference-path addressing is used.
pub fn object_spec_param(spec: &ObjectSpec) -> Value {
    if spec.path.is_empty() {
        json!({ "ref": spec.target.to_string() })
    } else {
        json!({
            "ref": spec.target.to_string(),
            "obj_ref_path": spec.path.iter().map(ObjRef::to_string).collect::<Vec<_>>(),
        })
    }
}

fn flag(on: bool) -> u64 {
    if on {
        1
    } else {
        0
    }
}

fn as_tuple<'a>(value: &'a Value, len: usize, what: &str) -> WsResult<&'a [Value]> {
    let tuple = value
        .as_array()
        .ok_or_else(|| malformed(format!("{what} is not a tuple: {value}")))?;
    if tuple.len() < len {
        return Err(malformed(format!(
            "{what} has {} positions, expected {len}",
            tuple.len()
        )));
    }
    Ok(tuple)
}

fn field_u64(tuple: &[Value], index: usize, name: &str) -> WsResult<u64> {
    tuple[index]
        .as_u64()
        .ok_or_else(|| malformed(format!("position {index} ({name}) is not an integer")))
}

fn field_string(tuple: &[Value], index: usize, name: &str) -> WsResult<String> {
    tuple[index]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| malformed(format!("position {index} ({name}) is not a string")))
}

fn field_metadata(tuple: &[Value], index: usize) -> WsResult<BTreeMap<String, String>> {
    match &tuple[index] {
        Value::Null => Ok(BTreeMap::new()),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                let v = v
                    .as_str()
                    .ok_or_else(|| malformed(format!("metadata value for {k:?} is not a string")))?;
                Ok((k.clone(), v.to_string()))
            })
            .collect(),
        other => Err(malformed(format!("metadata is not an object: {other}"))),
    }
}

fn malformed(reason: String) -> WorkspaceError {
    WorkspaceError::Malformed(reason)
}
