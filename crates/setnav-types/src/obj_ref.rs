use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Identifier for one immutable object version in a workspace.
///
/// The canonical form is the slash-separated triple
/// `workspace_id/object_id/version`, which is what the workspace service
/// accepts and returns on the wire. Two `ObjRef`s are equal exactly when
/// they address the same object version, making `ObjRef` the hash key for
/// all set/item lookups.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjRef {
    pub workspace_id: u64,
    pub object_id: u64,
    pub version: u64,
}

impl ObjRef {
    /// Build a reference from its three components.
    pub const fn new(workspace_id: u64, object_id: u64, version: u64) -> Self {
        Self {
            workspace_id,
            object_id,
            version,
        }
    }
}

impl fmt::Display for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.workspace_id, self.object_id, self.version)
    }
}

impl fmt::Debug for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjRef({self})")
    }
}

impl FromStr for ObjRef {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TypeError::InvalidRef {
            reference: s.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = s.split('/');
        let mut next = |what: &str| {
            parts
                .next()
                .filter(|p| !p.is_empty())
                .ok_or_else(|| invalid(&format!("missing {what}")))?
                .parse::<u64>()
                .map_err(|_| invalid(&format!("non-numeric {what}")))
        };

        let workspace_id = next("workspace id")?;
        let object_id = next("object id")?;
        let version = next("version")?;
        if parts.next().is_some() {
            return Err(invalid("trailing components"));
        }
        Ok(Self::new(workspace_id, object_id, version))
    }
}

// On the wire a reference is always its string form.
impl Serialize for ObjRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_slash_triple() {
        let r = ObjRef::new(6, 42, 3);
        assert_eq!(r.to_string(), "6/42/3");
    }

    #[test]
    fn parse_roundtrip() {
        let r = ObjRef::new(100, 7, 1);
        let parsed: ObjRef = r.to_string().parse().unwrap();
        assert_eq!(parsed, r);
    }

    #[test]
    fn parse_rejects_missing_components() {
        assert!("6/42".parse::<ObjRef>().is_err());
        assert!("6".parse::<ObjRef>().is_err());
        assert!("".parse::<ObjRef>().is_err());
    }

    #[test]
    fn parse_rejects_trailing_components() {
        assert!("6/42/3/9".parse::<ObjRef>().is_err());
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert!("ws/42/3".parse::<ObjRef>().is_err());
        assert!("6/obj/3".parse::<ObjRef>().is_err());
        assert!("6/42/v3".parse::<ObjRef>().is_err());
    }

    #[test]
    fn parse_rejects_empty_component() {
        assert!("6//3".parse::<ObjRef>().is_err());
    }

    #[test]
    fn same_version_is_equal() {
        assert_eq!(ObjRef::new(1, 2, 3), ObjRef::new(1, 2, 3));
        assert_ne!(ObjRef::new(1, 2, 3), ObjRef::new(1, 2, 4));
    }

    #[test]
    fn ordering_is_workspace_object_version() {
        assert!(ObjRef::new(1, 9, 9) < ObjRef::new(2, 1, 1));
        assert!(ObjRef::new(1, 1, 1) < ObjRef::new(1, 2, 1));
        assert!(ObjRef::new(1, 1, 1) < ObjRef::new(1, 1, 2));
    }

    #[test]
    fn serde_is_string_form() {
        let r = ObjRef::new(6, 42, 3);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "\"6/42/3\"");
        let parsed: ObjRef = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, r);
    }
}
