use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};
use youtrack_mcp_core::RemoteError;
use youtrack_mcp_domain::ProbeVerdict;

use crate::IssueTracker;

/// Field projection naming the project that owns an issue.
pub const PROJECT_PROJECTION: &str = "project(id,shortName,name)";

#[derive(Debug, Deserialize)]
struct IssueProject {
    #[serde(default)]
    project: Option<ProjectRef>,
}

#[derive(Debug, Deserialize)]
struct ProjectRef {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "shortName")]
    short_name: Option<String>,
}

impl ProjectRef {
    fn key(self) -> Option<String> {
        self.id
            .filter(|id| !id.is_empty())
            .or(self.short_name.filter(|name| !name.is_empty()))
    }
}

/// Determines whether time tracking is enabled for an issue's project.
///
/// The tracker exposes no direct flag, so the probe reads a single work item
/// of the issue: a read is accepted only when time tracking is on, and the
/// tracker answers `400 Bad Request` when it is off.
#[derive(Clone)]
pub struct ProjectCapabilityProbe {
    tracker: Arc<dyn IssueTracker>,
}

impl ProjectCapabilityProbe {
    /// Creates a probe over the tracker port.
    #[must_use]
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }

    /// Checks whether work items can be recorded in the issue's project.
    ///
    /// Lookup failures become [`ProbeVerdict::Indeterminate`]; this never errors.
    pub async fn check_time_tracking_enabled(&self, issue_id: &str) -> ProbeVerdict {
        let project = match self.resolve_project(issue_id).await {
            Ok(Some(project)) => project,
            Ok(None) => {
                return ProbeVerdict::negated(format!(
                    "Could not determine project for issue {issue_id}"
                ));
            }
            Err(error) => {
                warn!(issue_id, error = %error, "project lookup failed");
                return ProbeVerdict::indeterminate(format!(
                    "Could not determine project for issue {issue_id}: {error}"
                ));
            }
        };

        let verdict = match self.tracker.list_work_items(issue_id, "id", Some(1)).await {
            Ok(_) => ProbeVerdict::affirmed(format!(
                "Time tracking is enabled for project {project}"
            )),
            Err(error) if error.is_bad_request() => ProbeVerdict::negated(format!(
                "Time tracking is disabled for project {project}"
            )),
            Err(error) => {
                warn!(issue_id, project = %project, error = %error, "time tracking probe failed");
                ProbeVerdict::indeterminate(format!(
                    "Could not verify time tracking for project {project}: {error}"
                ))
            }
        };

        debug!(issue_id, project = %project, verdict = ?verdict, "time tracking probed");
        verdict
    }

    async fn resolve_project(&self, issue_id: &str) -> Result<Option<String>, RemoteError> {
        let issue = self.tracker.fetch_issue(issue_id, PROJECT_PROJECTION).await?;
        let issue: IssueProject =
            serde_json::from_value(issue).map_err(|error| RemoteError::Decode(error.to_string()))?;

        Ok(issue.project.and_then(ProjectRef::key))
    }
}
