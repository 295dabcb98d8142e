use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Metadata for one workspace.
///
/// Reported by the service as a 9-position tuple; decoded into this struct
/// at the wire boundary. `max_object_id` is the highest object id ever
/// assigned in the workspace and bounds any id-windowed enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    /// Numeric workspace id.
    pub id: u64,
    /// Workspace name.
    pub name: String,
    /// Username of the workspace owner.
    pub owner: String,
    /// Timestamp of the last modification.
    pub modified_at: String,
    /// Maximum object id ever assigned in this workspace (inclusive).
    pub max_object_id: u64,
    /// Permission of the requesting user (`a`, `w`, `r`, or `n`).
    pub user_permission: String,
    /// Global read permission (`r` or `n`).
    pub global_read: String,
    /// Lock status of the workspace.
    pub lock_status: String,
    /// User metadata attached to the workspace.
    pub metadata: BTreeMap<String, String>,
}

/// A workspace addressed either by numeric id or by name.
///
/// Callers pass a single free-form `workspace` parameter; a value consisting
/// entirely of ASCII digits addresses by id, anything else by name. Workspace
/// names starting with a digit are not ambiguous because the service forbids
/// purely numeric names.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkspaceIdentity {
    Id(u64),
    Name(String),
}

impl WorkspaceIdentity {
    /// Resolve a raw `workspace` parameter into an identity.
    pub fn resolve(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            match raw.parse::<u64>() {
                Ok(id) => return Self::Id(id),
                Err(_) => return Self::Name(raw.to_string()),
            }
        }
        Self::Name(raw.to_string())
    }
}

impl fmt::Display for WorkspaceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_resolve_to_id() {
        assert_eq!(WorkspaceIdentity::resolve("6"), WorkspaceIdentity::Id(6));
        assert_eq!(
            WorkspaceIdentity::resolve("10500"),
            WorkspaceIdentity::Id(10500)
        );
    }

    #[test]
    fn names_resolve_to_name() {
        assert_eq!(
            WorkspaceIdentity::resolve("someuser:narrative"),
            WorkspaceIdentity::Name("someuser:narrative".into())
        );
        // mixed digits and letters are a name
        assert_eq!(
            WorkspaceIdentity::resolve("123abc"),
            WorkspaceIdentity::Name("123abc".into())
        );
    }

    #[test]
    fn empty_string_is_a_name() {
        assert_eq!(
            WorkspaceIdentity::resolve(""),
            WorkspaceIdentity::Name(String::new())
        );
    }

    #[test]
    fn overlong_digit_string_falls_back_to_name() {
        let raw = "99999999999999999999999999";
        assert_eq!(
            WorkspaceIdentity::resolve(raw),
            WorkspaceIdentity::Name(raw.into())
        );
    }

    #[test]
    fn display_matches_raw_form() {
        assert_eq!(WorkspaceIdentity::Id(6).to_string(), "6");
        assert_eq!(
            WorkspaceIdentity::Name("myws".into()).to_string(),
            "myws"
        );
    }
}
