use std::collections::BTreeMap;

use serde::Serialize;

use super::ToolName;

/// Published description of one tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameter_descriptions: BTreeMap<&'static str, &'static str>,
}

const ISSUE_ID: (&str, &str) = ("issue_id", "The issue ID or readable ID (e.g., PROJECT-123)");
const DURATION: &str = "The work duration in human-readable format (e.g., '1h 30m', '45m')";

impl ToolName {
    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.as_str(),
            description: self.description(),
            parameter_descriptions: self.parameters().iter().copied().collect(),
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::GetWorkItems => "Get work items for a specific YouTrack issue",
            Self::GetWorkItem => "Get a specific work item from a YouTrack issue",
            Self::CreateWorkItem => {
                "Create a new work item (time tracking entry) for a YouTrack issue. The issue \
                 must be an allowed parent ticket, belong to a project with time tracking \
                 enabled and not be resolved."
            }
            Self::UpdateWorkItem => "Update an existing work item in a YouTrack issue",
            Self::DeleteWorkItem => "Delete a work item from a YouTrack issue",
            Self::GetIssue => "Get information about a specific issue",
            Self::SearchIssues => "Search for issues using YouTrack query language",
            Self::GetProject => "Get information about a specific project",
            Self::GetCurrentUser => "Get information about the user the API token belongs to",
        }
    }

    fn parameters(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::GetWorkItems | Self::GetIssue => &[ISSUE_ID],
            Self::GetWorkItem => &[ISSUE_ID, ("work_item_id", "The ID of the work item")],
            Self::CreateWorkItem => &[
                ISSUE_ID,
                ("duration", DURATION),
                ("text", "Optional description of the work"),
                ("work_type", "Optional work type ID"),
                ("date", "Optional work date as epoch milliseconds or YYYY-MM-DD"),
            ],
            Self::UpdateWorkItem => &[
                ISSUE_ID,
                ("work_item_id", "The ID of the work item to update"),
                ("duration", DURATION),
                ("text", "The new description of the work"),
                ("work_type", "The new work type ID"),
                ("date", "The new work date as epoch milliseconds or YYYY-MM-DD"),
            ],
            Self::DeleteWorkItem => &[
                ISSUE_ID,
                ("work_item_id", "The ID of the work item to delete"),
            ],
            Self::SearchIssues => &[
                (
                    "query",
                    "YouTrack search query (e.g., 'project: MyProject state: Open')",
                ),
                ("limit", "Maximum number of issues to return (default: 10)"),
            ],
            Self::GetProject => &[("project_id", "The project ID or short name")],
            Self::GetCurrentUser => &[],
        }
    }
}

/// Definitions for every registered tool, keyed by name.
pub fn tool_definitions() -> BTreeMap<&'static str, ToolDefinition> {
    ToolName::ALL
        .into_iter()
        .map(|tool| (tool.as_str(), tool.definition()))
        .collect()
}
