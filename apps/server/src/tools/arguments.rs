use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use youtrack_mcp_application::DEFAULT_SEARCH_LIMIT;
use youtrack_mcp_core::{AppError, AppResult, NonEmptyString};
use youtrack_mcp_domain::{NewWorkItem, WorkDate, WorkDuration, WorkItemPatch};

use super::ToolName;

/// Decodes a tool's argument object; `null` counts as `{}`.
pub(super) fn parse_arguments<T>(tool: ToolName, arguments: Value) -> AppResult<T>
where
    T: DeserializeOwned,
{
    let arguments = if arguments.is_null() {
        Value::Object(Map::new())
    } else {
        arguments
    };

    serde_json::from_value(arguments).map_err(|error| {
        AppError::Validation(format!(
            "invalid arguments for tool {}: {error}",
            tool.as_str()
        ))
    })
}

fn required(name: &str, value: String) -> AppResult<String> {
    NonEmptyString::new(value)
        .map(String::from)
        .map_err(|_| AppError::Validation(format!("{name} must not be empty")))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct IssueArguments {
    issue_id: String,
}

impl IssueArguments {
    pub(super) fn issue_id(self) -> AppResult<String> {
        required("issue_id", self.issue_id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct WorkItemArguments {
    issue_id: String,
    work_item_id: String,
}

impl WorkItemArguments {
    pub(super) fn ids(self) -> AppResult<(String, String)> {
        Ok((
            required("issue_id", self.issue_id)?,
            required("work_item_id", self.work_item_id)?,
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct CreateWorkItemArguments {
    issue_id: String,
    duration: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    work_type: Option<String>,
    #[serde(default)]
    date: Option<WorkDate>,
}

impl TryFrom<CreateWorkItemArguments> for NewWorkItem {
    type Error = AppError;

    fn try_from(value: CreateWorkItemArguments) -> AppResult<Self> {
        Ok(Self {
            issue_id: required("issue_id", value.issue_id)?,
            duration: WorkDuration::parse(value.duration),
            text: value.text,
            work_type: value.work_type,
            date: value.date,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct UpdateWorkItemArguments {
    issue_id: String,
    work_item_id: String,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    work_type: Option<String>,
    #[serde(default)]
    date: Option<WorkDate>,
}

impl UpdateWorkItemArguments {
    pub(super) fn into_parts(self) -> AppResult<(String, String, WorkItemPatch)> {
        Ok((
            required("issue_id", self.issue_id)?,
            required("work_item_id", self.work_item_id)?,
            WorkItemPatch {
                duration: self.duration,
                text: self.text,
                work_type: self.work_type,
                date: self.date,
            },
        ))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct SearchArguments {
    pub(super) query: String,
    #[serde(default = "default_search_limit")]
    pub(super) limit: u32,
}

fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct ProjectArguments {
    project_id: String,
}

impl ProjectArguments {
    pub(super) fn project_id(self) -> AppResult<String> {
        required("project_id", self.project_id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct NoArguments {}
