//! Work items (time-tracking entries) as exchanged with the tracker.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::{DurationEncoding, WorkDate, WorkDuration};

/// Field projection requested for every work item read.
pub const WORK_ITEM_FIELDS: &str = "id,issue(id,idReadable),author(id,login,name),\
creator(id,login,name),text,duration(minutes,presentation),date,type(id,name),created,updated";

/// Work item record owned by the tracker.
///
/// Unknown members returned by the tracker are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    /// Tracker-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Parent issue reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<Value>,
    /// User the time is booked for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Value>,
    /// User who created the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Value>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Duration as returned by the tracker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    /// Work date in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
    /// Work type reference.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub work_type: Option<Value>,
    /// Creation timestamp in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    /// Last update timestamp in epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    /// Remaining members the tracker returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Input for creating a work item on a parent issue.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkItem {
    /// Parent issue identifier or readable key.
    pub issue_id: String,
    /// Duration to book.
    pub duration: WorkDuration,
    /// Optional description.
    pub text: Option<String>,
    /// Optional work type identifier.
    pub work_type: Option<String>,
    /// Optional work date.
    pub date: Option<WorkDate>,
}

impl NewWorkItem {
    /// Builds the create payload using one duration encoding.
    ///
    /// Empty `text` and `work_type` values are omitted.
    #[must_use]
    pub fn payload(&self, encoding: DurationEncoding) -> Value {
        let mut payload = Map::new();
        payload.insert("duration".to_owned(), encoding.encode(&self.duration));

        if let Some(text) = self.text.as_deref().filter(|text| !text.is_empty()) {
            payload.insert("text".to_owned(), Value::String(text.to_owned()));
        }
        if let Some(work_type) = self.work_type.as_deref().filter(|value| !value.is_empty()) {
            payload.insert("type".to_owned(), json!({ "id": work_type }));
        }
        if let Some(date) = self.date {
            payload.insert("date".to_owned(), json!(date.as_millis()));
        }

        Value::Object(payload)
    }
}

/// Partial update of an existing work item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkItemPatch {
    /// New duration in human-readable form.
    pub duration: Option<String>,
    /// New description; an empty string clears it.
    pub text: Option<String>,
    /// New work type identifier.
    pub work_type: Option<String>,
    /// New work date.
    pub date: Option<WorkDate>,
}

impl WorkItemPatch {
    /// Builds the update payload, or `None` when nothing would change.
    #[must_use]
    pub fn payload(&self) -> Option<Value> {
        let mut payload = Map::new();

        if let Some(duration) = self.duration.as_deref().filter(|value| !value.is_empty()) {
            payload.insert("duration".to_owned(), json!({ "presentation": duration }));
        }
        if let Some(text) = &self.text {
            payload.insert("text".to_owned(), Value::String(text.clone()));
        }
        if let Some(work_type) = self.work_type.as_deref().filter(|value| !value.is_empty()) {
            payload.insert("type".to_owned(), json!({ "id": work_type }));
        }
        if let Some(date) = self.date {
            payload.insert("date".to_owned(), json!(date.as_millis()));
        }

        (!payload.is_empty()).then_some(Value::Object(payload))
    }
}
