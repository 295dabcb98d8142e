//! Top-level set enumeration over a workspace.
//!
//! A "set" is a stored object whose payload is primarily a list of
//! references to other stored objects. [`SetNavigator`] enumerates every
//! set in a workspace and returns the *top-level* ones: sets not referenced
//! as an item by any other enumerated set.
//!
//! The navigator holds no state beyond its client and its configured set
//! types; every call builds its structures fresh and discards them with the
//! response.

pub mod error;
pub mod navigator;
pub mod params;
pub mod set;

pub use error::{NavError, NavResult};
pub use navigator::{top_level_sets, SetNavigator, DEFAULT_SET_TYPES, LIST_OBJECTS_STEP};
pub use params::{GetSetItemsParams, ListSetsParams};
pub use set::{ListedSetItems, ListedSets, SetEntry, SetItem};
