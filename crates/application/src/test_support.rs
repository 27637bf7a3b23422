use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use youtrack_mcp_core::{RemoteError, RemoteResult};

use crate::IssueTracker;

/// Request recorded by [`FakeTracker`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TrackerCall {
    FetchIssue { issue_id: String, fields: String },
    ListWorkItems { issue_id: String, top: Option<u32> },
    FetchWorkItem { issue_id: String, work_item_id: String },
    CreateWorkItem { issue_id: String, payload: Value },
    UpdateWorkItem { work_item_id: String, payload: Value },
    DeleteWorkItem { work_item_id: String },
    SearchIssues { query: String, limit: u32 },
    FetchProject { project_id: String },
    FetchCurrentUser,
}

/// Scripted tracker that records every call.
#[derive(Default)]
pub(crate) struct FakeTracker {
    pub issues: HashMap<String, RemoteResult<Value>>,
    pub work_item_list: Option<RemoteResult<Value>>,
    pub create_responses: Mutex<VecDeque<RemoteResult<Value>>>,
    pub update_response: Option<RemoteResult<Value>>,
    pub calls: Mutex<Vec<TrackerCall>>,
}

impl FakeTracker {
    pub fn with_issue(mut self, issue_id: &str, issue: Value) -> Self {
        self.issues.insert(issue_id.to_owned(), Ok(issue));
        self
    }

    pub fn with_issue_error(mut self, issue_id: &str, error: RemoteError) -> Self {
        self.issues.insert(issue_id.to_owned(), Err(error));
        self
    }

    pub fn with_work_item_list(mut self, response: RemoteResult<Value>) -> Self {
        self.work_item_list = Some(response);
        self
    }

    pub fn with_create_responses(self, responses: Vec<RemoteResult<Value>>) -> Self {
        Self {
            create_responses: Mutex::new(responses.into()),
            ..self
        }
    }

    pub fn with_update_response(mut self, response: RemoteResult<Value>) -> Self {
        self.update_response = Some(response);
        self
    }

    pub async fn recorded(&self) -> Vec<TrackerCall> {
        self.calls.lock().await.clone()
    }

    pub async fn count(&self, predicate: impl Fn(&TrackerCall) -> bool) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    async fn record(&self, call: TrackerCall) {
        self.calls.lock().await.push(call);
    }
}

pub(crate) fn status(status: u16, body: &str) -> RemoteError {
    RemoteError::Status {
        status,
        body: body.to_owned(),
    }
}

/// Issue payload carrying a project and the given custom fields.
pub(crate) fn issue_with_fields(project_id: &str, custom_fields: Value) -> Value {
    json!({
        "id": "2-17",
        "project": { "id": project_id, "shortName": "DEVOPS", "name": "DevOps" },
        "customFields": custom_fields,
    })
}

pub(crate) fn state_field(name: &str, state: &str, resolved: bool) -> Value {
    json!({
        "$type": "StateIssueCustomField",
        "name": name,
        "value": { "$type": "StateBundleElement", "name": state, "isResolved": resolved },
    })
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn fetch_issue(&self, issue_id: &str, fields: &str) -> RemoteResult<Value> {
        self.record(TrackerCall::FetchIssue {
            issue_id: issue_id.to_owned(),
            fields: fields.to_owned(),
        })
        .await;
        self.issues
            .get(issue_id)
            .cloned()
            .unwrap_or_else(|| Err(status(404, "Issue not found")))
    }

    async fn list_work_items(
        &self,
        issue_id: &str,
        _fields: &str,
        top: Option<u32>,
    ) -> RemoteResult<Value> {
        self.record(TrackerCall::ListWorkItems {
            issue_id: issue_id.to_owned(),
            top,
        })
        .await;
        self.work_item_list.clone().unwrap_or_else(|| Ok(json!([])))
    }

    async fn fetch_work_item(
        &self,
        issue_id: &str,
        work_item_id: &str,
        _fields: &str,
    ) -> RemoteResult<Value> {
        self.record(TrackerCall::FetchWorkItem {
            issue_id: issue_id.to_owned(),
            work_item_id: work_item_id.to_owned(),
        })
        .await;
        Ok(json!({ "id": work_item_id, "text": "existing" }))
    }

    async fn create_work_item(
        &self,
        issue_id: &str,
        payload: &Value,
        _fields: &str,
    ) -> RemoteResult<Value> {
        self.record(TrackerCall::CreateWorkItem {
            issue_id: issue_id.to_owned(),
            payload: payload.clone(),
        })
        .await;
        self.create_responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "id": "8-1" })))
    }

    async fn update_work_item(
        &self,
        _issue_id: &str,
        work_item_id: &str,
        payload: &Value,
        _fields: &str,
    ) -> RemoteResult<Value> {
        self.record(TrackerCall::UpdateWorkItem {
            work_item_id: work_item_id.to_owned(),
            payload: payload.clone(),
        })
        .await;
        self.update_response.clone().unwrap_or_else(|| {
            Ok(json!({ "id": work_item_id, "text": payload.get("text").cloned() }))
        })
    }

    async fn delete_work_item(&self, _issue_id: &str, work_item_id: &str) -> RemoteResult<()> {
        self.record(TrackerCall::DeleteWorkItem {
            work_item_id: work_item_id.to_owned(),
        })
        .await;
        Ok(())
    }

    async fn search_issues(&self, query: &str, limit: u32, _fields: &str) -> RemoteResult<Value> {
        self.record(TrackerCall::SearchIssues {
            query: query.to_owned(),
            limit,
        })
        .await;
        Ok(json!([{ "idReadable": "DEVOPS-1" }]))
    }

    async fn fetch_project(&self, project_id: &str, _fields: &str) -> RemoteResult<Value> {
        self.record(TrackerCall::FetchProject {
            project_id: project_id.to_owned(),
        })
        .await;
        Ok(json!({ "id": "0-5", "shortName": project_id }))
    }

    async fn fetch_current_user(&self, _fields: &str) -> RemoteResult<Value> {
        self.record(TrackerCall::FetchCurrentUser).await;
        Ok(json!({ "login": "robot" }))
    }
}
