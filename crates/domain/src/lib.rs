//! Domain types and invariants for tracker work items.

#![forbid(unsafe_code)]

mod allow_list;
mod duration;
mod verdict;
mod work_date;
mod work_item;

pub use allow_list::{AllowList, AllowListSource, MalformedAllowListPolicy};
pub use duration::{
    DEFAULT_DURATION_MINUTES, DurationEncoding, WorkDuration, parse_duration_minutes,
};
pub use verdict::{IndeterminatePolicy, ProbeVerdict};
pub use work_date::WorkDate;
pub use work_item::{NewWorkItem, WORK_ITEM_FIELDS, WorkItem, WorkItemPatch};
