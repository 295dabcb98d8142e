//! Foundation types for workspace set navigation.
//!
//! This crate provides the identifier and metadata types shared by every
//! other setnav crate.
//!
//! # Key Types
//!
//! - [`ObjRef`] — Immutable object-version identifier (`workspace/object/version`)
//! - [`ObjectInfo`] — Named metadata record for one stored object version
//! - [`WorkspaceInfo`] — Named metadata record for one workspace
//! - [`WorkspaceIdentity`] — A workspace addressed by numeric id or by name

pub mod error;
pub mod object;
pub mod obj_ref;
pub mod workspace;

pub use error::TypeError;
pub use obj_ref::ObjRef;
pub use object::ObjectInfo;
pub use workspace::{WorkspaceIdentity, WorkspaceInfo};
