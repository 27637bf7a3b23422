use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use youtrack_mcp_application::{
    IssueService, IssueTracker, ValidationPolicy, WorkItemService, WorkItemValidator,
};
use youtrack_mcp_core::{RemoteError, RemoteResult};
use youtrack_mcp_domain::AllowList;

use crate::state::AppState;
use crate::tools::ToolFacade;

/// Tracker with one open issue per configured key and a fixed create answer.
#[derive(Default)]
pub struct StubTracker {
    pub issues: HashMap<String, Value>,
    pub time_tracking_disabled: bool,
    pub create_status: Option<u16>,
    pub writes: Mutex<Vec<Value>>,
}

impl StubTracker {
    pub fn with_open_issue(mut self, issue_id: &str) -> Self {
        self.issues.insert(
            issue_id.to_owned(),
            json!({
                "id": "2-1",
                "idReadable": issue_id,
                "project": { "id": "0-5", "shortName": "DEVOPS" },
                "customFields": [{
                    "$type": "StateIssueCustomField",
                    "name": "State",
                    "value": { "name": "Open", "isResolved": false },
                }],
            }),
        );
        self
    }

    fn issue(&self, issue_id: &str) -> RemoteResult<Value> {
        self.issues
            .get(issue_id)
            .cloned()
            .ok_or_else(|| RemoteError::Status {
                status: 404,
                body: "Issue not found".to_owned(),
            })
    }
}

#[async_trait]
impl IssueTracker for StubTracker {
    async fn fetch_issue(&self, issue_id: &str, _fields: &str) -> RemoteResult<Value> {
        self.issue(issue_id)
    }

    async fn list_work_items(
        &self,
        issue_id: &str,
        _fields: &str,
        _top: Option<u32>,
    ) -> RemoteResult<Value> {
        self.issue(issue_id)?;
        if self.time_tracking_disabled {
            return Err(RemoteError::Status {
                status: 400,
                body: "Time tracking is disabled".to_owned(),
            });
        }
        Ok(json!([{ "id": "8-1", "text": "standup" }]))
    }

    async fn fetch_work_item(
        &self,
        _issue_id: &str,
        work_item_id: &str,
        _fields: &str,
    ) -> RemoteResult<Value> {
        Ok(json!({ "id": work_item_id }))
    }

    async fn create_work_item(
        &self,
        _issue_id: &str,
        payload: &Value,
        _fields: &str,
    ) -> RemoteResult<Value> {
        self.writes.lock().await.push(payload.clone());
        match self.create_status {
            Some(status) => Err(RemoteError::Status {
                status,
                body: "rejected".to_owned(),
            }),
            None => Ok(json!({ "id": "8-9", "text": payload.get("text").cloned() })),
        }
    }

    async fn update_work_item(
        &self,
        _issue_id: &str,
        work_item_id: &str,
        payload: &Value,
        _fields: &str,
    ) -> RemoteResult<Value> {
        self.writes.lock().await.push(payload.clone());
        Ok(json!({ "id": work_item_id }))
    }

    async fn delete_work_item(&self, _issue_id: &str, _work_item_id: &str) -> RemoteResult<()> {
        Ok(())
    }

    async fn search_issues(&self, _query: &str, limit: u32, _fields: &str) -> RemoteResult<Value> {
        Ok(json!({ "limit": limit }))
    }

    async fn fetch_project(&self, project_id: &str, _fields: &str) -> RemoteResult<Value> {
        Ok(json!({ "shortName": project_id }))
    }

    async fn fetch_current_user(&self, _fields: &str) -> RemoteResult<Value> {
        Ok(json!({ "login": "robot" }))
    }
}

pub fn facade(tracker: Arc<StubTracker>, allow_list: AllowList) -> ToolFacade {
    let validator = WorkItemValidator::new(tracker.clone(), allow_list, ValidationPolicy::default());
    ToolFacade::new(
        WorkItemService::new(tracker.clone(), validator),
        IssueService::new(tracker),
    )
}

pub fn app_state(tracker: Arc<StubTracker>) -> AppState {
    AppState {
        tools: facade(tracker, AllowList::Unrestricted),
        server_name: "youtrack-mcp".to_owned(),
        server_description: "YouTrack MCP Server".to_owned(),
    }
}
