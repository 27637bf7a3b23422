//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod file_allow_list_loader;
mod youtrack_http_client;

pub use file_allow_list_loader::{DEFAULT_ALLOW_LIST_PATH, FileAllowListLoader};
pub use youtrack_http_client::{
    DEFAULT_REQUEST_TIMEOUT, YouTrackClientConfig, YouTrackHttpClient,
};
