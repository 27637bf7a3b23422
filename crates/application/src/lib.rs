//! Application services and ports.

#![forbid(unsafe_code)]

mod issue_service;
mod issue_state_probe;
mod project_capability_probe;
mod tracker_ports;
mod work_item_service;
mod work_item_validator;

#[cfg(test)]
mod test_support;

pub use issue_service::{
    DEFAULT_SEARCH_LIMIT, ISSUE_FIELDS, ISSUE_SEARCH_FIELDS, IssueService, PROJECT_FIELDS,
    USER_FIELDS,
};
pub use issue_state_probe::{IssueStateProbe, STATE_FIELDS_PROJECTION};
pub use project_capability_probe::{PROJECT_PROJECTION, ProjectCapabilityProbe};
pub use tracker_ports::IssueTracker;
pub use work_item_service::WorkItemService;
pub use work_item_validator::{ValidationPolicy, WorkItemValidator};
