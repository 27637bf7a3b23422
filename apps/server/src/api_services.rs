use std::sync::Arc;

use tracing::{info, warn};
use youtrack_mcp_application::{IssueService, IssueTracker, WorkItemService, WorkItemValidator};
use youtrack_mcp_domain::{AllowList, AllowListSource};
use youtrack_mcp_infrastructure::FileAllowListLoader;

use crate::api_config::ApiConfig;
use crate::state::AppState;
use crate::tools::ToolFacade;

/// Reads the parent-ticket allow-list once for the process lifetime.
pub fn load_allow_list(config: &ApiConfig) -> AllowList {
    let source = FileAllowListLoader::new(config.parent_tickets_file.clone()).load();
    if let AllowListSource::Unreadable(reason) = &source {
        warn!(
            path = %config.parent_tickets_file.display(),
            policy = ?config.allow_list_policy,
            %reason,
            "parent ticket file is unreadable"
        );
    }

    let allow_list = AllowList::from_source(source, config.allow_list_policy);
    match &allow_list {
        AllowList::Unrestricted => info!("all parent tickets are allowed"),
        AllowList::Restricted(tickets) => {
            info!(count = tickets.len(), tickets = ?tickets, "parent tickets restricted");
        }
        AllowList::DenyAll { .. } => warn!("work item creation is denied for every ticket"),
    }

    allow_list
}

pub fn build_app_state(config: &ApiConfig, tracker: Arc<dyn IssueTracker>) -> AppState {
    let validator = WorkItemValidator::new(
        tracker.clone(),
        load_allow_list(config),
        config.validation_policy,
    );

    AppState {
        tools: ToolFacade::new(
            WorkItemService::new(tracker.clone(), validator),
            IssueService::new(tracker),
        ),
        server_name: config.server_name.clone(),
        server_description: config.server_description.clone(),
    }
}
