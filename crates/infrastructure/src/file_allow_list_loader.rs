use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};
use youtrack_mcp_domain::AllowListSource;

/// Default allow-list location, relative to the working directory.
pub const DEFAULT_ALLOW_LIST_PATH: &str = "parent-ticket.json";

#[derive(Debug, Deserialize)]
struct AllowListDocument {
    #[serde(default)]
    tickets: Vec<String>,
}

/// Reads the parent-ticket allow-list from a JSON file of the form
/// `{"tickets": ["DEVOPS-1", ...]}`.
#[derive(Debug, Clone)]
pub struct FileAllowListLoader {
    path: PathBuf,
}

impl FileAllowListLoader {
    /// Creates a loader for the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the file once. A missing `tickets` key is an empty list.
    #[must_use]
    pub fn load(&self) -> AllowListSource {
        let path = self.path.display();
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(read_error) if read_error.kind() == ErrorKind::NotFound => {
                info!(%path, "no parent ticket file found, all parent tickets are allowed");
                return AllowListSource::Missing;
            }
            Err(read_error) => {
                error!(%path, error = %read_error, "failed to read parent ticket file");
                return AllowListSource::Unreadable(read_error.to_string());
            }
        };

        match serde_json::from_str::<AllowListDocument>(&contents) {
            Ok(document) => {
                info!(%path, count = document.tickets.len(), "loaded parent tickets");
                AllowListSource::Tickets(document.tickets)
            }
            Err(parse_error) => {
                error!(%path, error = %parse_error, "failed to parse parent ticket file");
                AllowListSource::Unreadable(parse_error.to_string())
            }
        }
    }
}

impl Default for FileAllowListLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOW_LIST_PATH)
    }
}
