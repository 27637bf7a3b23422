use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use youtrack_mcp_core::AppResult;

use crate::IssueTracker;

/// Field projection for issue reads.
pub const ISSUE_FIELDS: &str = "id,idReadable,summary,description,created,updated,\
project(id,name,shortName),reporter(id,login,name),assignee(id,login,name),\
customFields(id,name,value(name))";

/// Field projection for issue search results.
pub const ISSUE_SEARCH_FIELDS: &str = "id,idReadable,summary,created,updated,\
project(id,name,shortName),customFields(id,name,value(name))";

/// Field projection for project reads.
pub const PROJECT_FIELDS: &str = "id,name,shortName,description,archived,leader(id,login,name)";

/// Field projection for the authenticated user.
pub const USER_FIELDS: &str = "id,login,name,fullName,email";

/// Default number of issues returned by a search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// Read-only issue, project and user lookups.
#[derive(Clone)]
pub struct IssueService {
    tracker: Arc<dyn IssueTracker>,
}

impl IssueService {
    /// Creates a new issue service.
    #[must_use]
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }

    /// Fetches an issue; a missing `summary` is filled with `"Issue <id>"`.
    pub async fn get_issue(&self, issue_id: &str) -> AppResult<Value> {
        let mut issue = self.tracker.fetch_issue(issue_id, ISSUE_FIELDS).await?;

        if let Some(object) = issue.as_object_mut()
            && !object.contains_key("summary")
        {
            debug!(issue_id, "issue has no summary, using placeholder");
            object.insert(
                "summary".to_owned(),
                Value::String(format!("Issue {issue_id}")),
            );
        }

        Ok(issue)
    }

    /// Runs a tracker query and returns at most `limit` issues.
    pub async fn search_issues(&self, query: &str, limit: u32) -> AppResult<Value> {
        let issues = self
            .tracker
            .search_issues(query, limit, ISSUE_SEARCH_FIELDS)
            .await?;
        Ok(issues)
    }

    /// Fetches a project by id or short name.
    pub async fn get_project(&self, project_id: &str) -> AppResult<Value> {
        Ok(self.tracker.fetch_project(project_id, PROJECT_FIELDS).await?)
    }

    /// Fetches the user the API token belongs to.
    pub async fn get_current_user(&self) -> AppResult<Value> {
        Ok(self.tracker.fetch_current_user(USER_FIELDS).await?)
    }
}
