use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};
use youtrack_mcp_core::{AppError, AppResult, RemoteError};
use youtrack_mcp_domain::{
    DurationEncoding, NewWorkItem, WORK_ITEM_FIELDS, WorkItem, WorkItemPatch,
};

use crate::{IssueTracker, WorkItemValidator};

#[cfg(test)]
mod tests;

/// Application service for work items (time-tracking entries).
///
/// Only creation is gated by the [`WorkItemValidator`]; reads, updates and
/// deletes pass straight through to the tracker.
#[derive(Clone)]
pub struct WorkItemService {
    tracker: Arc<dyn IssueTracker>,
    validator: WorkItemValidator,
}

impl WorkItemService {
    /// Creates a new work item service.
    #[must_use]
    pub fn new(tracker: Arc<dyn IssueTracker>, validator: WorkItemValidator) -> Self {
        Self { tracker, validator }
    }

    /// Lists work items recorded on an issue.
    pub async fn list_work_items(&self, issue_id: &str) -> AppResult<Vec<WorkItem>> {
        let items = self
            .tracker
            .list_work_items(issue_id, WORK_ITEM_FIELDS, None)
            .await?;
        decode(items)
    }

    /// Fetches one work item.
    pub async fn get_work_item(&self, issue_id: &str, work_item_id: &str) -> AppResult<WorkItem> {
        let item = self
            .tracker
            .fetch_work_item(issue_id, work_item_id, WORK_ITEM_FIELDS)
            .await?;
        decode(item)
    }

    /// Validates the parent issue, then creates the work item.
    ///
    /// The duration is offered in each [`DurationEncoding`] in turn. Only a
    /// `400 Bad Request` moves on to the next encoding; any other failure is
    /// returned immediately.
    pub async fn create_work_item(&self, input: NewWorkItem) -> AppResult<WorkItem> {
        self.validator
            .validate_for_creation(input.issue_id.as_str())
            .await?;

        let attempts = DurationEncoding::FALLBACK_ORDER.len();
        let mut last_rejection: Option<RemoteError> = None;

        for (index, encoding) in DurationEncoding::FALLBACK_ORDER.into_iter().enumerate() {
            let attempt = index + 1;
            let payload = input.payload(encoding);

            match self
                .tracker
                .create_work_item(input.issue_id.as_str(), &payload, WORK_ITEM_FIELDS)
                .await
            {
                Ok(created) => {
                    info!(
                        issue_id = %input.issue_id,
                        attempt,
                        encoding = encoding.as_str(),
                        minutes = input.duration.minutes(),
                        "work item created"
                    );
                    return Ok(accepted_work_item(created));
                }
                Err(error) if error.is_bad_request() => {
                    warn!(
                        issue_id = %input.issue_id,
                        attempt,
                        encoding = encoding.as_str(),
                        error = %error,
                        "tracker rejected work item payload"
                    );
                    last_rejection = Some(error);
                }
                Err(error) => {
                    warn!(
                        issue_id = %input.issue_id,
                        attempt,
                        encoding = encoding.as_str(),
                        error = %error,
                        "work item creation failed"
                    );
                    return Err(AppError::Remote(format!(
                        "Failed to create work item for issue {}: {error}",
                        input.issue_id
                    )));
                }
            }
        }

        let detail = last_rejection
            .map(|error| error.to_string())
            .unwrap_or_else(|| "no payload encoding was attempted".to_owned());
        Err(AppError::Remote(format!(
            "Failed to create work item for issue {} after {attempts} attempts: {detail}",
            input.issue_id
        )))
    }

    /// Applies a partial update; an empty patch just fetches the work item.
    pub async fn update_work_item(
        &self,
        issue_id: &str,
        work_item_id: &str,
        patch: WorkItemPatch,
    ) -> AppResult<WorkItem> {
        let Some(payload) = patch.payload() else {
            return self.get_work_item(issue_id, work_item_id).await;
        };

        let updated = self
            .tracker
            .update_work_item(issue_id, work_item_id, &payload, WORK_ITEM_FIELDS)
            .await?;
        info!(issue_id, work_item_id, "work item updated");
        Ok(accepted_work_item(updated))
    }

    /// Deletes a work item.
    pub async fn delete_work_item(&self, issue_id: &str, work_item_id: &str) -> AppResult<()> {
        self.tracker
            .delete_work_item(issue_id, work_item_id)
            .await?;
        info!(issue_id, work_item_id, "work item deleted");
        Ok(())
    }
}

fn decode<T>(value: Value) -> AppResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(value)
        .map_err(|error| AppError::from(RemoteError::Decode(error.to_string())))
}

/// Reads the body of a write the tracker already accepted.
///
/// An empty or unexpected body never turns a stored write into a failure.
fn accepted_work_item(value: Value) -> WorkItem {
    if value.is_null() {
        return WorkItem::default();
    }
    serde_json::from_value(value).unwrap_or_else(|error| {
        warn!(error = %error, "accepted work item response could not be decoded");
        WorkItem::default()
    })
}
