use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use youtrack_mcp_core::RemoteError;
use youtrack_mcp_domain::ProbeVerdict;

use crate::IssueTracker;

/// Field projection that exposes each custom field's resolved-state flag.
pub const STATE_FIELDS_PROJECTION: &str = "customFields(name,$type,value(name,isResolved))";

const STATE_FIELD_TYPE_SUFFIX: &str = "StateIssueCustomField";

#[derive(Debug, Deserialize)]
struct IssueCustomFields {
    #[serde(default, rename = "customFields")]
    custom_fields: Vec<CustomField>,
}

#[derive(Debug, Deserialize)]
struct CustomField {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "$type")]
    kind: Option<String>,
    #[serde(default)]
    value: Value,
}

impl CustomField {
    fn is_state_field(&self) -> bool {
        self.kind
            .as_deref()
            .is_some_and(|kind| kind.ends_with(STATE_FIELD_TYPE_SUFFIX))
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

/// Classifies an issue as resolved or open from its state custom fields.
#[derive(Clone)]
pub struct IssueStateProbe {
    tracker: Arc<dyn IssueTracker>,
}

impl IssueStateProbe {
    /// Creates a probe over the tracker port.
    #[must_use]
    pub fn new(tracker: Arc<dyn IssueTracker>) -> Self {
        Self { tracker }
    }

    /// Checks whether every state field of the issue is resolved.
    ///
    /// Lookup failures become [`ProbeVerdict::Indeterminate`]; this never errors.
    pub async fn check_resolved(&self, issue_id: &str) -> ProbeVerdict {
        let verdict = match self.fetch_custom_fields(issue_id).await {
            Ok(fields) => classify_state_fields(&fields.custom_fields),
            Err(error) => {
                warn!(issue_id, error = %error, "issue resolution lookup failed");
                ProbeVerdict::indeterminate(format!("Error checking issue resolution: {error}"))
            }
        };

        debug!(issue_id, verdict = ?verdict, "issue resolution probed");
        verdict
    }

    async fn fetch_custom_fields(&self, issue_id: &str) -> Result<IssueCustomFields, RemoteError> {
        let issue = self
            .tracker
            .fetch_issue(issue_id, STATE_FIELDS_PROJECTION)
            .await?;

        serde_json::from_value(issue).map_err(|error| RemoteError::Decode(error.to_string()))
    }
}

fn classify_state_fields(custom_fields: &[CustomField]) -> ProbeVerdict {
    let mut state_fields = custom_fields
        .iter()
        .filter(|field| field.is_state_field())
        .peekable();

    if state_fields.peek().is_none() {
        return ProbeVerdict::negated("No state fields found for the issue");
    }

    for field in state_fields {
        if field.value.is_null() {
            return ProbeVerdict::negated(format!(
                "State field '{}' has no value",
                field.display_name()
            ));
        }

        let is_resolved = field
            .value
            .get("isResolved")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        if !is_resolved {
            let state = field
                .value
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            return ProbeVerdict::negated(format!(
                "State field '{}' is in unresolved state '{state}'",
                field.display_name()
            ));
        }
    }

    ProbeVerdict::affirmed("All state fields are resolved")
}
