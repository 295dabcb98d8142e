//! The set navigator: enumeration, reference-graph filtering, enrichment.
//!
//! `list_sets` runs four sequential stages against the workspace client:
//! validate, enumerate every set-typed object in id windows, populate each
//! set's item references with one batched no-data fetch, then drop every
//! set referenced by another enumerated set. Optionally a fifth stage
//! attaches full metadata to the surviving items.
//!
//! # Invariants
//!
//! - Every returned `SetEntry` reference is unique (one enumeration cannot
//!   yield the same object version twice).
//! - No returned set's reference appears among any other returned set's
//!   items.
//! - Filtering is stable: survivors keep their enumeration order.

use std::collections::{BTreeMap, HashMap, HashSet};

use setnav_types::{ObjRef, ObjectInfo, WorkspaceIdentity};
use setnav_workspace::{ListObjectsQuery, ObjectSpec, WorkspaceClient};
use tracing::debug;

use crate::error::{NavError, NavResult};
use crate::params::{GetSetItemsParams, ListSetsParams};
use crate::set::{ListedSetItems, ListedSets, SetEntry, SetItem};

/// Set types enumerated when none are configured explicitly.
pub const DEFAULT_SET_TYPES: &[&str] = &["KBaseSets.ReadsSet"];

/// Width of each `list_objects` id window. The enumeration call is bounded
/// by id range rather than result count, so workspaces larger than one call
/// can safely return are walked window by window.
pub const LIST_OBJECTS_STEP: u64 = 10_000;

/// Navigates the set objects of a workspace.
///
/// Generic over the [`WorkspaceClient`] so the same pipeline runs against a
/// live service or an in-memory one. Stateless across calls.
pub struct SetNavigator<C> {
    client: C,
    set_types: Vec<String>,
}

impl<C: WorkspaceClient> SetNavigator<C> {
    /// Navigator over the default set types.
    pub fn new(client: C) -> Self {
        Self::with_set_types(
            client,
            DEFAULT_SET_TYPES.iter().map(|t| t.to_string()).collect(),
        )
    }

    /// Navigator over an explicit list of set types. The filter logic is
    /// type-agnostic; new set types only extend the enumeration.
    pub fn with_set_types(client: C, set_types: Vec<String>) -> Self {
        Self { client, set_types }
    }

    /// The underlying workspace client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// List the top-level sets of a workspace: every enumerated set that no
    /// other enumerated set references as an item.
    ///
    /// Item references are always populated; full item metadata only when
    /// `include_set_item_info` is 1. Validation failures are raised before
    /// any service call; any service failure aborts the whole operation.
    pub fn list_sets(&self, params: &ListSetsParams) -> NavResult<ListedSets> {
        let (identity, include_item_info) = validate_list_params(params)?;

        let mut all_sets = self.list_all_sets(&identity)?;
        self.populate_set_refs(&mut all_sets)?;

        let mut sets = top_level_sets(all_sets);
        debug!(top_level = sets.len(), "filtered to top-level sets");

        if include_item_info {
            self.populate_set_item_info(&mut sets)?;
        }
        Ok(ListedSets { sets })
    }

    /// Reserved: item listing for a single set addressed by reference.
    /// Currently answers empty unconditionally and issues no service calls.
    pub fn get_set_items(&self, _params: &GetSetItemsParams) -> NavResult<ListedSetItems> {
        Ok(ListedSetItems::default())
    }

    /// Enumerate every object of every configured set type, in type order
    /// then id order, with its derived reference.
    fn list_all_sets(&self, identity: &WorkspaceIdentity) -> NavResult<Vec<SetEntry>> {
        let ws_info = self.client.get_workspace_info(identity)?;
        debug!(
            workspace = %identity,
            max_object_id = ws_info.max_object_id,
            "enumerating sets"
        );

        let mut sets = Vec::new();
        for type_string in &self.set_types {
            for info in self.list_until_exhausted(identity, type_string, ws_info.max_object_id)? {
                sets.push(SetEntry {
                    obj_ref: info.obj_ref(),
                    info,
                    items: Vec::new(),
                });
            }
        }
        Ok(sets)
    }

    /// Walk `[0, max_object_id]` in `LIST_OBJECTS_STEP`-wide windows,
    /// accumulating every returned record in order.
    fn list_until_exhausted(
        &self,
        identity: &WorkspaceIdentity,
        type_string: &str,
        max_object_id: u64,
    ) -> NavResult<Vec<ObjectInfo>> {
        let mut records = Vec::new();
        let mut min_id = 0;
        while min_id < max_object_id {
            let query = ListObjectsQuery::new(identity.clone(), type_string)
                .window(min_id, min_id + LIST_OBJECTS_STEP)
                .with_metadata();
            let batch = self.client.list_objects(&query)?;
            debug!(
                type_string,
                min_id,
                returned = batch.len(),
                "enumeration window"
            );
            records.extend(batch);
            min_id += LIST_OBJECTS_STEP;
        }
        Ok(records)
    }

    /// One batched no-data fetch for every enumerated set; the returned
    /// reference lists become the sets' items, in request order.
    fn populate_set_refs(&self, sets: &mut [SetEntry]) -> NavResult<()> {
        if sets.is_empty() {
            return Ok(());
        }
        let specs: Vec<ObjectSpec> = sets.iter().map(|s| ObjectSpec::direct(s.obj_ref)).collect();
        let ref_lists = self.client.get_object_refs(&specs)?;

        for (set, refs) in sets.iter_mut().zip(ref_lists) {
            set.items = refs.into_iter().map(SetItem::new).collect();
        }
        Ok(())
    }

    /// One batched metadata fetch for every distinct item of the surviving
    /// sets, then attach each record to every item carrying its reference.
    ///
    /// Items are deduplicated through a map from item reference to one
    /// owning set (last writer wins). Any owning path resolves the same
    /// object version, so which set carries the fetch is immaterial; the
    /// map only guarantees each item is requested once, through a set the
    /// caller can read.
    fn populate_set_item_info(&self, sets: &mut [SetEntry]) -> NavResult<()> {
        let mut owners: BTreeMap<ObjRef, ObjRef> = BTreeMap::new();
        for set in sets.iter() {
            for item in &set.items {
                owners.insert(item.obj_ref, set.obj_ref);
            }
        }
        if owners.is_empty() {
            return Ok(());
        }

        let specs: Vec<ObjectSpec> = owners
            .iter()
            .map(|(item, owner)| ObjectSpec::via(*owner, *item))
            .collect();
        debug!(items = specs.len(), "fetching item info");
        let infos = self.client.get_object_info(&specs, true)?;

        let by_ref: HashMap<ObjRef, ObjectInfo> =
            infos.into_iter().map(|info| (info.obj_ref(), info)).collect();
        for set in sets.iter_mut() {
            for item in &mut set.items {
                if let Some(info) = by_ref.get(&item.obj_ref) {
                    item.info = Some(info.clone());
                }
            }
        }
        Ok(())
    }
}

fn validate_list_params(params: &ListSetsParams) -> NavResult<(WorkspaceIdentity, bool)> {
    let workspace = params.workspace.as_deref().ok_or_else(|| {
        NavError::InvalidParams("\"workspace\" field required to list sets".into())
    })?;
    let include_item_info = match params.include_set_item_info {
        None | Some(0) => false,
        Some(1) => true,
        Some(_) => {
            return Err(NavError::InvalidParams(
                "\"include_set_item_info\" field must be set to 0 or 1".into(),
            ))
        }
    };
    Ok((WorkspaceIdentity::resolve(workspace), include_item_info))
}

/// Keep only the sets no other set on the list references as an item.
///
/// Stable: survivors keep their input order. References appearing as items
/// but not on the list (ordinary objects, or sets of unconfigured types)
/// never disqualify anything.
pub fn top_level_sets(sets: Vec<SetEntry>) -> Vec<SetEntry> {
    let enumerated: HashSet<ObjRef> = sets.iter().map(|s| s.obj_ref).collect();

    let mut referenced: HashSet<ObjRef> = HashSet::new();
    for set in &sets {
        for item in &set.items {
            if enumerated.contains(&item.obj_ref) {
                referenced.insert(item.obj_ref);
            }
        }
    }

    sets.into_iter()
        .filter(|s| !referenced.contains(&s.obj_ref))
        .collect()
}
