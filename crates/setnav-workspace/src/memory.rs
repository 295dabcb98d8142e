use std::collections::HashMap;
use std::sync::RwLock;

use setnav_types::{ObjRef, ObjectInfo, WorkspaceIdentity, WorkspaceInfo};

use crate::error::{WorkspaceError, WsResult};
use crate::query::{ListObjectsQuery, ObjectSpec};
use crate::traits::WorkspaceClient;

/// In-memory, HashMap-based workspace service.
///
/// Intended for tests and embedding. Workspaces and objects are held in
/// memory behind a `RwLock`; records are cloned on read. Every trait call
/// is counted, and `list_objects` windows are recorded, so tests can assert
/// exactly which RPCs a caller issued.
pub struct InMemoryWorkspace {
    inner: RwLock<Inner>,
    log: RwLock<CallLog>,
}

#[derive(Default)]
struct Inner {
    workspaces: HashMap<u64, WorkspaceRecord>,
    ids_by_name: HashMap<String, u64>,
}

struct WorkspaceRecord {
    info: WorkspaceInfo,
    objects: HashMap<ObjRef, ObjectRecord>,
}

struct ObjectRecord {
    info: ObjectInfo,
    refs: Vec<ObjRef>,
}

/// Per-method call counters, snapshotted by [`InMemoryWorkspace::call_counts`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub get_workspace_info: usize,
    pub list_objects: usize,
    pub get_object_refs: usize,
    pub get_object_info: usize,
}

impl CallCounts {
    /// Total calls across all methods.
    pub fn total(&self) -> usize {
        self.get_workspace_info + self.list_objects + self.get_object_refs + self.get_object_info
    }
}

#[derive(Default)]
struct CallLog {
    counts: CallCounts,
    list_object_windows: Vec<(u64, u64)>,
    info_batch_sizes: Vec<usize>,
}

impl InMemoryWorkspace {
    /// Create an empty in-memory service with no workspaces.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            log: RwLock::new(CallLog::default()),
        }
    }

    /// Register a workspace. Replaces any workspace with the same id.
    pub fn add_workspace(&self, info: WorkspaceInfo) {
        let mut inner = self.inner.write().expect("lock poisoned");
        inner.ids_by_name.insert(info.name.clone(), info.id);
        inner.workspaces.insert(
            info.id,
            WorkspaceRecord {
                info,
                objects: HashMap::new(),
            },
        );
    }

    /// Store an object version with its outgoing reference list.
    ///
    /// The owning workspace (from `info.workspace_id`) must already be
    /// registered. Bumps the workspace's `max_object_id` if this object id
    /// exceeds it.
    pub fn add_object(&self, info: ObjectInfo, refs: Vec<ObjRef>) -> WsResult<()> {
        let mut inner = self.inner.write().expect("lock poisoned");
        let record = inner
            .workspaces
            .get_mut(&info.workspace_id)
            .ok_or_else(|| WorkspaceError::NoSuchWorkspace(info.workspace_id.to_string()))?;
        if info.object_id > record.info.max_object_id {
            record.info.max_object_id = info.object_id;
        }
        record.objects.insert(info.obj_ref(), ObjectRecord { info, refs });
        Ok(())
    }

    /// Force a workspace's `max_object_id`, independent of the objects
    /// actually stored. Lets tests exercise enumeration windowing over
    /// sparse workspaces.
    pub fn set_max_object_id(&self, workspace_id: u64, max_object_id: u64) -> WsResult<()> {
        let mut inner = self.inner.write().expect("lock poisoned");
        let record = inner
            .workspaces
            .get_mut(&workspace_id)
            .ok_or_else(|| WorkspaceError::NoSuchWorkspace(workspace_id.to_string()))?;
        record.info.max_object_id = max_object_id;
        Ok(())
    }

    /// Number of object versions stored across all workspaces.
    pub fn len(&self) -> usize {
        let inner = self.inner.read().expect("lock poisoned");
        inner.workspaces.values().map(|w| w.objects.len()).sum()
    }

    /// Returns `true` if no object versions are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the per-method call counters.
    pub fn call_counts(&self) -> CallCounts {
        self.log.read().expect("lock poisoned").counts
    }

    /// Every `[min, max)` window passed to `list_objects`, in call order.
    pub fn list_object_windows(&self) -> Vec<(u64, u64)> {
        self.log
            .read()
            .expect("lock poisoned")
            .list_object_windows
            .clone()
    }

    /// Batch size of every `get_object_info` call, in call order.
    pub fn info_batch_sizes(&self) -> Vec<usize> {
        self.log.read().expect("lock poisoned").info_batch_sizes.clone()
    }

    fn resolve_id(inner: &Inner, identity: &WorkspaceIdentity) -> WsResult<u64> {
        let id = match identity {
            WorkspaceIdentity::Id(id) => *id,
            WorkspaceIdentity::Name(name) => *inner
                .ids_by_name
                .get(name)
                .ok_or_else(|| WorkspaceError::NoSuchWorkspace(name.clone()))?,
        };
        if !inner.workspaces.contains_key(&id) {
            return Err(WorkspaceError::NoSuchWorkspace(identity.to_string()));
        }
        Ok(id)
    }

    fn lookup<'a>(inner: &'a Inner, obj_ref: &ObjRef) -> WsResult<&'a ObjectRecord> {
        inner
            .workspaces
            .get(&obj_ref.workspace_id)
            .and_then(|w| w.objects.get(obj_ref))
            .ok_or(WorkspaceError::NoSuchObject(*obj_ref))
    }

    /// Resolve a spec to its object record, enforcing reference-path
    /// reachability when a path is present.
    fn resolve_spec<'a>(inner: &'a Inner, spec: &ObjectSpec) -> WsResult<&'a ObjectRecord> {
        let mut current = Self::lookup(inner, &spec.target)?;
        for hop in &spec.path {
            if !current.refs.contains(hop) {
                return Err(WorkspaceError::Unreachable {
                    via: current.info.obj_ref(),
                    object: *hop,
                });
            }
            current = Self::lookup(inner, hop)?;
        }
        Ok(current)
    }

    fn strip_metadata(mut info: ObjectInfo) -> ObjectInfo {
        info.metadata.clear();
        info
    }
}

impl Default for InMemoryWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkspaceClient for InMemoryWorkspace {
    fn get_workspace_info(&self, identity: &WorkspaceIdentity) -> WsResult<WorkspaceInfo> {
        self.log.write().expect("lock poisoned").counts.get_workspace_info += 1;
        let inner = self.inner.read().expect("lock poisoned");
        let id = Self::resolve_id(&inner, identity)?;
        Ok(inner.workspaces[&id].info.clone())
    }

    fn list_objects(&self, query: &ListObjectsQuery) -> WsResult<Vec<ObjectInfo>> {
        {
            let mut log = self.log.write().expect("lock poisoned");
            log.counts.list_objects += 1;
            log.list_object_windows
                .push((query.min_object_id, query.max_object_id));
        }
        let inner = self.inner.read().expect("lock poisoned");
        let id = Self::resolve_id(&inner, &query.workspace)?;

        let versioned_prefix = format!("{}-", query.type_string);
        let mut matched: Vec<ObjectInfo> = inner.workspaces[&id]
            .objects
            .values()
            .filter(|record| {
                record.info.object_id >= query.min_object_id
                    && record.info.object_id < query.max_object_id
            })
            .filter(|record| {
                record.info.type_string == query.type_string
                    || record.info.type_string.starts_with(&versioned_prefix)
            })
            .map(|record| record.info.clone())
            .collect();
        matched.sort_by_key(|info| (info.object_id, info.version));

        if !query.include_metadata {
            matched = matched.into_iter().map(Self::strip_metadata).collect();
        }
        Ok(matched)
    }

    fn get_object_refs(&self, specs: &[ObjectSpec]) -> WsResult<Vec<Vec<ObjRef>>> {
        self.log.write().expect("lock poisoned").counts.get_object_refs += 1;
        let inner = self.inner.read().expect("lock poisoned");
        specs
            .iter()
            .map(|spec| Self::resolve_spec(&inner, spec).map(|record| record.refs.clone()))
            .collect()
    }

    fn get_object_info(
        &self,
        specs: &[ObjectSpec],
        include_metadata: bool,
    ) -> WsResult<Vec<ObjectInfo>> {
        {
            let mut log = self.log.write().expect("lock poisoned");
            log.counts.get_object_info += 1;
            log.info_batch_sizes.push(specs.len());
        }
        let inner = self.inner.read().expect("lock poisoned");
        specs
            .iter()
            .map(|spec| {
                let info = Self::resolve_spec(&inner, spec)?.info.clone();
                Ok(if include_metadata {
                    info
                } else {
                    Self::strip_metadata(info)
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for InMemoryWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read().expect("lock poisoned");
        f.debug_struct("InMemoryWorkspace")
            .field("workspace_count", &inner.workspaces.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn ws(id: u64, name: &str) -> WorkspaceInfo {
        WorkspaceInfo {
            id,
            name: name.into(),
            owner: "owner".into(),
            modified_at: "2024-01-01T00:00:00+0000".into(),
            max_object_id: 0,
            user_permission: "r".into(),
            global_read: "n".into(),
            lock_status: "unlocked".into(),
            metadata: BTreeMap::new(),
        }
    }

    fn obj(ws_id: u64, object_id: u64, version: u64, type_string: &str) -> ObjectInfo {
        ObjectInfo {
            object_id,
            name: format!("obj_{object_id}"),
            type_string: type_string.into(),
            saved_at: "2024-01-02T00:00:00+0000".into(),
            version,
            saved_by: "owner".into(),
            workspace_id: ws_id,
            workspace_name: "testws".into(),
            checksum: "0".repeat(32),
            size: 128,
            metadata: BTreeMap::from([("k".to_string(), "v".to_string())]),
        }
    }

    fn seeded() -> InMemoryWorkspace {
        let service = InMemoryWorkspace::new();
        service.add_workspace(ws(6, "testws"));
        service
    }

    // -----------------------------------------------------------------------
    // Workspace info
    // -----------------------------------------------------------------------

    #[test]
    fn workspace_info_by_id_and_by_name() {
        let service = seeded();
        let by_id = service
            .get_workspace_info(&WorkspaceIdentity::Id(6))
            .unwrap();
        let by_name = service
            .get_workspace_info(&WorkspaceIdentity::Name("testws".into()))
            .unwrap();
        assert_eq!(by_id, by_name);
        assert_eq!(by_id.id, 6);
    }

    #[test]
    fn unknown_workspace_is_an_error() {
        let service = seeded();
        let err = service
            .get_workspace_info(&WorkspaceIdentity::Name("nope".into()))
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::NoSuchWorkspace(_)));
    }

    #[test]
    fn add_object_bumps_max_object_id() {
        let service = seeded();
        service
            .add_object(obj(6, 17, 1, "KBaseSets.ReadsSet-2.1"), vec![])
            .unwrap();
        let info = service
            .get_workspace_info(&WorkspaceIdentity::Id(6))
            .unwrap();
        assert_eq!(info.max_object_id, 17);
    }

    #[test]
    fn set_max_object_id_overrides() {
        let service = seeded();
        service.set_max_object_id(6, 25_000).unwrap();
        let info = service
            .get_workspace_info(&WorkspaceIdentity::Id(6))
            .unwrap();
        assert_eq!(info.max_object_id, 25_000);
    }

    // -----------------------------------------------------------------------
    // Enumeration
    // -----------------------------------------------------------------------

    #[test]
    fn list_objects_filters_by_type_and_window() {
        let service = seeded();
        service
            .add_object(obj(6, 1, 1, "KBaseSets.ReadsSet-2.1"), vec![])
            .unwrap();
        service
            .add_object(obj(6, 2, 1, "KBaseFile.PairedEndLibrary-1.0"), vec![])
            .unwrap();
        service
            .add_object(obj(6, 30, 1, "KBaseSets.ReadsSet-2.1"), vec![])
            .unwrap();

        let query =
            ListObjectsQuery::new(WorkspaceIdentity::Id(6), "KBaseSets.ReadsSet").window(0, 10);
        let listed = service.list_objects(&query).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].object_id, 1);
    }

    #[test]
    fn list_objects_window_upper_bound_is_exclusive() {
        let service = seeded();
        service
            .add_object(obj(6, 10, 1, "KBaseSets.ReadsSet-2.1"), vec![])
            .unwrap();
        let q = ListObjectsQuery::new(WorkspaceIdentity::Id(6), "KBaseSets.ReadsSet");
        assert!(service.list_objects(&q.clone().window(0, 10)).unwrap().is_empty());
        assert_eq!(service.list_objects(&q.window(10, 20)).unwrap().len(), 1);
    }

    #[test]
    fn list_objects_orders_by_object_id() {
        let service = seeded();
        for id in [9, 3, 7] {
            service
                .add_object(obj(6, id, 1, "KBaseSets.ReadsSet-2.1"), vec![])
                .unwrap();
        }
        let q = ListObjectsQuery::new(WorkspaceIdentity::Id(6), "KBaseSets.ReadsSet");
        let ids: Vec<u64> = service
            .list_objects(&q)
            .unwrap()
            .iter()
            .map(|i| i.object_id)
            .collect();
        assert_eq!(ids, vec![3, 7, 9]);
    }

    #[test]
    fn list_objects_metadata_flag() {
        let service = seeded();
        service
            .add_object(obj(6, 1, 1, "KBaseSets.ReadsSet-2.1"), vec![])
            .unwrap();
        let q = ListObjectsQuery::new(WorkspaceIdentity::Id(6), "KBaseSets.ReadsSet");
        assert!(service.list_objects(&q.clone()).unwrap()[0].metadata.is_empty());
        assert!(!service.list_objects(&q.with_metadata()).unwrap()[0]
            .metadata
            .is_empty());
    }

    // -----------------------------------------------------------------------
    // Batched fetches
    // -----------------------------------------------------------------------

    #[test]
    fn object_refs_in_request_order() {
        let service = seeded();
        let item = ObjRef::new(6, 2, 1);
        service
            .add_object(obj(6, 1, 1, "KBaseSets.ReadsSet-2.1"), vec![item])
            .unwrap();
        service
            .add_object(obj(6, 3, 1, "KBaseSets.ReadsSet-2.1"), vec![])
            .unwrap();

        let specs = vec![
            ObjectSpec::direct(ObjRef::new(6, 3, 1)),
            ObjectSpec::direct(ObjRef::new(6, 1, 1)),
        ];
        let refs = service.get_object_refs(&specs).unwrap();
        assert_eq!(refs, vec![vec![], vec![item]]);
    }

    #[test]
    fn missing_object_fails_the_whole_batch() {
        let service = seeded();
        service
            .add_object(obj(6, 1, 1, "KBaseSets.ReadsSet-2.1"), vec![])
            .unwrap();
        let specs = vec![
            ObjectSpec::direct(ObjRef::new(6, 1, 1)),
            ObjectSpec::direct(ObjRef::new(6, 99, 1)),
        ];
        let err = service.get_object_refs(&specs).unwrap_err();
        assert!(matches!(err, WorkspaceError::NoSuchObject(_)));
    }

    #[test]
    fn object_info_via_reference_path() {
        let service = seeded();
        let item_info = obj(6, 2, 1, "KBaseFile.PairedEndLibrary-1.0");
        let item = item_info.obj_ref();
        service
            .add_object(obj(6, 1, 1, "KBaseSets.ReadsSet-2.1"), vec![item])
            .unwrap();
        service.add_object(item_info.clone(), vec![]).unwrap();

        let specs = vec![ObjectSpec::via(ObjRef::new(6, 1, 1), item)];
        let infos = service.get_object_info(&specs, true).unwrap();
        assert_eq!(infos, vec![item_info]);
    }

    #[test]
    fn reference_path_must_be_contained() {
        let service = seeded();
        let stray = obj(6, 2, 1, "KBaseFile.PairedEndLibrary-1.0");
        service
            .add_object(obj(6, 1, 1, "KBaseSets.ReadsSet-2.1"), vec![])
            .unwrap();
        service.add_object(stray.clone(), vec![]).unwrap();

        let specs = vec![ObjectSpec::via(ObjRef::new(6, 1, 1), stray.obj_ref())];
        let err = service.get_object_info(&specs, true).unwrap_err();
        assert!(matches!(err, WorkspaceError::Unreachable { .. }));
    }

    #[test]
    fn object_info_metadata_flag() {
        let service = seeded();
        service
            .add_object(obj(6, 1, 1, "KBaseSets.ReadsSet-2.1"), vec![])
            .unwrap();
        let specs = vec![ObjectSpec::direct(ObjRef::new(6, 1, 1))];
        assert!(service.get_object_info(&specs, false).unwrap()[0]
            .metadata
            .is_empty());
        assert!(!service.get_object_info(&specs, true).unwrap()[0]
            .metadata
            .is_empty());
    }

    // -----------------------------------------------------------------------
    // Call accounting
    // -----------------------------------------------------------------------

    #[test]
    fn calls_are_counted_and_windows_recorded() {
        let service = seeded();
        let q = ListObjectsQuery::new(WorkspaceIdentity::Id(6), "KBaseSets.ReadsSet");
        service.get_workspace_info(&WorkspaceIdentity::Id(6)).unwrap();
        service.list_objects(&q.clone().window(0, 10_000)).unwrap();
        service.list_objects(&q.window(10_000, 20_000)).unwrap();

        let counts = service.call_counts();
        assert_eq!(counts.get_workspace_info, 1);
        assert_eq!(counts.list_objects, 2);
        assert_eq!(counts.total(), 3);
        assert_eq!(
            service.list_object_windows(),
            vec![(0, 10_000), (10_000, 20_000)]
        );
    }

    #[test]
    fn info_batch_sizes_recorded() {
        let service = seeded();
        service
            .add_object(obj(6, 1, 1, "KBaseSets.ReadsSet-2.1"), vec![])
            .unwrap();
        let specs = vec![ObjectSpec::direct(ObjRef::new(6, 1, 1))];
        service.get_object_info(&specs, false).unwrap();
        assert_eq!(service.info_batch_sizes(), vec![1]);
    }

    #[test]
    fn failed_calls_still_count() {
        let service = seeded();
        let _ = service.get_workspace_info(&WorkspaceIdentity::Name("nope".into()));
        assert_eq!(service.call_counts().get_workspace_info, 1);
    }
}
