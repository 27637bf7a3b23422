use std::sync::Arc;

use tracing::{info, warn};
use youtrack_mcp_core::{AppError, AppResult};
use youtrack_mcp_domain::{AllowList, IndeterminatePolicy};

use crate::{IssueStateProbe, IssueTracker, ProjectCapabilityProbe};

/// How inconclusive probe lookups are read during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationPolicy {
    /// Reading of an inconclusive time tracking probe. Negated denies creation.
    pub unknown_capability: IndeterminatePolicy,
    /// Reading of an inconclusive resolution probe. Affirmed denies creation.
    pub unknown_resolution: IndeterminatePolicy,
}

/// Gate that decides whether a work item may be created on a parent ticket.
///
/// Checks run cheapest first and stop at the first denial:
/// allow-list (local), time tracking (one round trip), resolution (one more).
#[derive(Clone)]
pub struct WorkItemValidator {
    allow_list: Arc<AllowList>,
    capability_probe: ProjectCapabilityProbe,
    state_probe: IssueStateProbe,
    policy: ValidationPolicy,
}

impl WorkItemValidator {
    /// Creates a validator for an allow-list fixed at startup.
    #[must_use]
    pub fn new(
        tracker: Arc<dyn IssueTracker>,
        allow_list: AllowList,
        policy: ValidationPolicy,
    ) -> Self {
        Self {
            allow_list: Arc::new(allow_list),
            capability_probe: ProjectCapabilityProbe::new(tracker.clone()),
            state_probe: IssueStateProbe::new(tracker),
            policy,
        }
    }

    /// Validates that a work item may be created on `issue_id`.
    ///
    /// Denials are [`AppError::Validation`] with a caller-facing message.
    pub async fn validate_for_creation(&self, issue_id: &str) -> AppResult<()> {
        self.check_allow_list(issue_id)?;

        let capability = self
            .capability_probe
            .check_time_tracking_enabled(issue_id)
            .await;
        if !capability.holds(self.policy.unknown_capability) {
            warn!(issue_id, reason = capability.reason(), "work item denied by time tracking check");
            return Err(AppError::Validation(format!(
                "Cannot create work item for issue {issue_id}: {}",
                capability.reason()
            )));
        }

        let resolution = self.state_probe.check_resolved(issue_id).await;
        if resolution.holds(self.policy.unknown_resolution) {
            warn!(issue_id, reason = resolution.reason(), "work item denied for resolved issue");
            return Err(AppError::Validation(format!(
                "Cannot create work item for resolved issue {issue_id}: {}",
                resolution.reason()
            )));
        }

        info!(issue_id, "work item creation validated");
        Ok(())
    }

    /// Checks the local allow-list only; no remote calls.
    pub fn check_allow_list(&self, issue_id: &str) -> AppResult<()> {
        if self.allow_list.is_allowed(issue_id) {
            return Ok(());
        }

        warn!(issue_id, "work item denied by parent ticket allow-list");
        let message = match self.allow_list.as_ref() {
            AllowList::DenyAll { reason } => format!(
                "Issue {issue_id} is not an allowed parent ticket. \
                 The parent ticket allow-list could not be read: {reason}"
            ),
            allow_list => format!(
                "Issue {issue_id} is not an allowed parent ticket. Allowed parent tickets: {}",
                allow_list.tickets().join(", ")
            ),
        };

        Err(AppError::Validation(message))
    }
}
