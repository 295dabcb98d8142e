use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::{json, Value};
use setnav_types::{ObjRef, ObjectInfo, WorkspaceIdentity, WorkspaceInfo};
use tracing::debug;

use crate::error::{WorkspaceError, WsResult};
use crate::query::{ListObjectsQuery, ObjectSpec};
use crate::traits::WorkspaceClient;
use crate::wire;

const USER_AGENT: &str = concat!("setnav/", env!("CARGO_PKG_VERSION"));
const RPC_TIMEOUT: Duration = Duration::from_secs(180);

/// JSON-RPC 1.1 client for a live workspace service.
///
/// One request per call, no retries; timeout and connection handling are
/// delegated to the HTTP client. Service-reported failures surface as
/// [`WorkspaceError::Rpc`], transport failures as [`WorkspaceError::Http`].
pub struct RpcWorkspace {
    http: reqwest::blocking::Client,
    url: String,
    token: Option<String>,
    next_id: AtomicU64,
}

impl RpcWorkspace {
    /// Client for an unauthenticated (public-read) service endpoint.
    pub fn new(url: impl Into<String>) -> WsResult<Self> {
        Self::build(url.into(), None)
    }

    /// Client sending an authorization token with every request.
    pub fn with_token(url: impl Into<String>, token: impl Into<String>) -> WsResult<Self> {
        Self::build(url.into(), Some(token.into()))
    }

    fn build(url: String, token: Option<String>) -> WsResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(RPC_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            url,
            token,
            next_id: AtomicU64::new(1),
        })
    }

    /// The service endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue one JSON-RPC call and return the first element of the result
    /// array (this wire wraps every method result in a one-element array).
    fn call(&self, method: &str, params: Value) -> WsResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "workspace rpc");

        let body = json!({
            "version": "1.1",
            "id": id.to_string(),
            "method": method,
            "params": [params],
        });

        let mut request = self.http.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            request = request.header("Authorization", token);
        }
        let response = request.send()?;
        let status = response.status();
        let envelope: Value = response.json()?;

        if let Some(error) = envelope.get("error").filter(|e| !e.is_null()) {
            return Err(WorkspaceError::Rpc {
                code: error.get("code").and_then(Value::as_i64).unwrap_or(-1),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown service error")
                    .to_string(),
            });
        }
        if !status.is_success() {
            return Err(WorkspaceError::Rpc {
                code: i64::from(status.as_u16()),
                message: format!("{method} failed with HTTP {status}"),
            });
        }

        envelope
            .get("result")
            .and_then(Value::as_array)
            .and_then(|result| result.first())
            .cloned()
            .ok_or_else(|| {
                WorkspaceError::Malformed(format!("{method}: response carries no result"))
            })
    }
}

impl WorkspaceClient for RpcWorkspace {
    fn get_workspace_info(&self, identity: &WorkspaceIdentity) -> WsResult<WorkspaceInfo> {
        let result = self.call(
            "Workspace.get_workspace_info",
            wire::identity_params(identity),
        )?;
        wire::workspace_info_from_tuple(&result)
    }

    fn list_objects(&self, query: &ListObjectsQuery) -> WsResult<Vec<ObjectInfo>> {
        let result = self.call("Workspace.list_objects", wire::list_objects_params(query))?;
        result
            .as_array()
            .ok_or_else(|| {
                WorkspaceError::Malformed("list_objects: result is not an array".into())
            })?
            .iter()
            .map(wire::object_info_from_tuple)
            .collect()
    }

    fn get_object_refs(&self, specs: &[ObjectSpec]) -> WsResult<Vec<Vec<ObjRef>>> {
        if specs.is_empty() {
            return Ok(Vec::new());
        }
        let params = json!({
            "objects": specs.iter().map(wire::object_spec_param).collect::<Vec<_>>(),
            "no_data": 1,
        });
        let result = self.call("Workspace.get_objects2", params)?;

        let data = result
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                WorkspaceError::Malformed("get_objects2: response carries no data list".into())
            })?;
        data.iter()
            .map(|entry| {
                entry
                    .get("refs")
                    .and_then(Value::as_array)
                    .ok_or_else(|| {
                        WorkspaceError::Malformed(
                            "get_objects2: object entry carries no refs list".into(),
                        )
                    })?
                    .iter()
                    .map(|r| {
                        let raw = r.as_str().ok_or_else(|| {
                            WorkspaceError::Malformed(format!("non-string reference: {r}"))
                        })?;
                        Ok(raw.parse::<ObjRef>()?)
                    })
                    .collect()
            })
            .collect()
    }

    fn get_object_info(
        &self,
        specs: &[ObjectSpec],
        include_metadata: bool,
    ) -> WsResult<Vec<ObjectInfo>> {
        if specs.is_empty() {
            return Ok(Vec::new());
        }
        let params = json!({
            "objects": specs.iter().map(wire::object_spec_param).collect::<Vec<_>>(),
            "includeMetadata": if include_metadata { 1 } else { 0 },
        });
        let result = self.call("Workspace.get_object_info_new", params)?;
        result
            .as_array()
            .ok_or_else(|| {
                WorkspaceError::Malformed("get_object_info_new: result is not an array".into())
            })?
            .iter()
            .map(wire::object_info_from_tuple)
            .collect()
    }
}

impl std::fmt::Debug for RpcWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcWorkspace")
            .field("url", &self.url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}
