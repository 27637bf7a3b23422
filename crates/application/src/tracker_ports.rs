use async_trait::async_trait;
use serde_json::Value;
use youtrack_mcp_core::RemoteResult;

/// Port for the remote issue tracker REST API.
///
/// Every method is one request/response exchange. `fields` is the tracker's
/// field projection for the returned entity.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetches one issue by identifier or readable key.
    async fn fetch_issue(&self, issue_id: &str, fields: &str) -> RemoteResult<Value>;

    /// Lists work items of an issue, optionally capped at `top` entries.
    async fn list_work_items(
        &self,
        issue_id: &str,
        fields: &str,
        top: Option<u32>,
    ) -> RemoteResult<Value>;

    /// Fetches one work item of an issue.
    async fn fetch_work_item(
        &self,
        issue_id: &str,
        work_item_id: &str,
        fields: &str,
    ) -> RemoteResult<Value>;

    /// Creates a work item; any non-success status is an error.
    async fn create_work_item(
        &self,
        issue_id: &str,
        payload: &Value,
        fields: &str,
    ) -> RemoteResult<Value>;

    /// Applies a partial update to a work item.
    async fn update_work_item(
        &self,
        issue_id: &str,
        work_item_id: &str,
        payload: &Value,
        fields: &str,
    ) -> RemoteResult<Value>;

    /// Deletes a work item.
    async fn delete_work_item(&self, issue_id: &str, work_item_id: &str) -> RemoteResult<()>;

    /// Runs a tracker query and returns at most `limit` issues.
    async fn search_issues(&self, query: &str, limit: u32, fields: &str) -> RemoteResult<Value>;

    /// Fetches one project by identifier or short name.
    async fn fetch_project(&self, project_id: &str, fields: &str) -> RemoteResult<Value>;

    /// Fetches the user the API token belongs to.
    async fn fetch_current_user(&self, fields: &str) -> RemoteResult<Value>;
}
