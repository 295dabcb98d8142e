use serde::{Deserialize, Serialize};

/// Parameters for [`SetNavigator::list_sets`].
///
/// The shape mirrors the published service method: both fields arrive as
/// optional and are validated at call time, so a missing `workspace` or an
/// out-of-range flag is reported as an invalid-params failure rather than a
/// deserialization error.
///
/// [`SetNavigator::list_sets`]: crate::SetNavigator::list_sets
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSetsParams {
    /// Workspace to search, by numeric id or by name. Required.
    #[serde(default)]
    pub workspace: Option<String>,
    /// 1 to fetch full metadata for every item of every top-level set;
    /// 0 or absent to leave item info unpopulated.
    #[serde(default)]
    pub include_set_item_info: Option<i64>,
}

impl ListSetsParams {
    /// Params addressing one workspace, without item enrichment.
    pub fn for_workspace(workspace: impl Into<String>) -> Self {
        Self {
            workspace: Some(workspace.into()),
            include_set_item_info: None,
        }
    }

    /// Request item-info enrichment.
    pub fn with_item_info(mut self) -> Self {
        self.include_set_item_info = Some(1);
        self
    }
}

/// Parameters for the reserved `get_set_items` operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSetItemsParams {}
