//! Tool surface exposed to MCP clients.
//!
//! Every tool returns a pretty-printed JSON string. Failures never escape:
//! they are rendered as `{"error": ...}`, tagged `"type": "validation_error"`
//! for denied preconditions and malformed arguments.

mod arguments;
mod catalog;


use serde::Serialize;
use serde_json::{Value, json};
use tracing::{error, info, warn};
use youtrack_mcp_application::{IssueService, WorkItemService};
use youtrack_mcp_core::{AppError, AppResult};
use youtrack_mcp_domain::NewWorkItem;

use self::arguments::{
    CreateWorkItemArguments, IssueArguments, NoArguments, ProjectArguments, SearchArguments,
    UpdateWorkItemArguments, WorkItemArguments, parse_arguments,
};

pub use self::catalog::{ToolDefinition, tool_definitions};

/// Registered tool names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    GetWorkItems,
    GetWorkItem,
    CreateWorkItem,
    UpdateWorkItem,
    DeleteWorkItem,
    GetIssue,
    SearchIssues,
    GetProject,
    GetCurrentUser,
}

impl ToolName {
    pub const ALL: [Self; 9] = [
        Self::GetWorkItems,
        Self::GetWorkItem,
        Self::CreateWorkItem,
        Self::UpdateWorkItem,
        Self::DeleteWorkItem,
        Self::GetIssue,
        Self::SearchIssues,
        Self::GetProject,
        Self::GetCurrentUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetWorkItems => "get_work_items",
            Self::GetWorkItem => "get_work_item",
            Self::CreateWorkItem => "create_work_item",
            Self::UpdateWorkItem => "update_work_item",
            Self::DeleteWorkItem => "delete_work_item",
            Self::GetIssue => "get_issue",
            Self::SearchIssues => "search_issues",
            Self::GetProject => "get_project",
            Self::GetCurrentUser => "get_current_user",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }
}

/// Dispatches tool invocations onto the application services.
#[derive(Clone)]
pub struct ToolFacade {
    work_items: WorkItemService,
    issues: IssueService,
}

impl ToolFacade {
    pub fn new(work_items: WorkItemService, issues: IssueService) -> Self {
        Self { work_items, issues }
    }

    /// Runs one tool and renders its outcome as a JSON string.
    pub async fn call(&self, tool: ToolName, arguments: Value) -> String {
        info!(tool = tool.as_str(), "executing tool");
        let outcome = self.dispatch(tool, arguments).await;
        render(tool, outcome)
    }

    async fn dispatch(&self, tool: ToolName, arguments: Value) -> AppResult<Value> {
        match tool {
            ToolName::GetWorkItems => {
                let issue_id = parse_arguments::<IssueArguments>(tool, arguments)?.issue_id()?;
                to_value(self.work_items.list_work_items(&issue_id).await?)
            }
            ToolName::GetWorkItem => {
                let (issue_id, work_item_id) =
                    parse_arguments::<WorkItemArguments>(tool, arguments)?.ids()?;
                to_value(
                    self.work_items
                        .get_work_item(&issue_id, &work_item_id)
                        .await?,
                )
            }
            ToolName::CreateWorkItem => {
                let input = NewWorkItem::try_from(parse_arguments::<CreateWorkItemArguments>(
                    tool, arguments,
                )?)?;
                to_value(self.work_items.create_work_item(input).await?)
            }
            ToolName::UpdateWorkItem => {
                let (issue_id, work_item_id, patch) =
                    parse_arguments::<UpdateWorkItemArguments>(tool, arguments)?.into_parts()?;
                to_value(
                    self.work_items
                        .update_work_item(&issue_id, &work_item_id, patch)
                        .await?,
                )
            }
            ToolName::DeleteWorkItem => {
                let (issue_id, work_item_id) =
                    parse_arguments::<WorkItemArguments>(tool, arguments)?.ids()?;
                self.work_items
                    .delete_work_item(&issue_id, &work_item_id)
                    .await?;
                Ok(json!({ "success": true, "message": "Work item deleted successfully" }))
            }
            ToolName::GetIssue => {
                let issue_id = parse_arguments::<IssueArguments>(tool, arguments)?.issue_id()?;
                self.issues.get_issue(&issue_id).await
            }
            ToolName::SearchIssues => {
                let search = parse_arguments::<SearchArguments>(tool, arguments)?;
                self.issues.search_issues(&search.query, search.limit).await
            }
            ToolName::GetProject => {
                let project_id =
                    parse_arguments::<ProjectArguments>(tool, arguments)?.project_id()?;
                self.issues.get_project(&project_id).await
            }
            ToolName::GetCurrentUser => {
                parse_arguments::<NoArguments>(tool, arguments)?;
                self.issues.get_current_user().await
            }
        }
    }
}

fn to_value(value: impl Serialize) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|error| AppError::Internal(format!("failed to encode tool result: {error}")))
}

fn render(tool: ToolName, outcome: AppResult<Value>) -> String {
    let payload = match outcome {
        Ok(value) => value,
        Err(AppError::Validation(message)) => {
            warn!(tool = tool.as_str(), error = %message, "tool rejected request");
            json!({ "error": message, "type": "validation_error" })
        }
        Err(app_error) => {
            error!(tool = tool.as_str(), error = %app_error, "tool failed");
            json!({ "error": app_error.to_string() })
        }
    };

    serde_json::to_string_pretty(&payload)
        .unwrap_or_else(|encode_error| json!({ "error": encode_error.to_string() }).to_string())
}
