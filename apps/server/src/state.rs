use crate::tools::ToolFacade;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub tools: ToolFacade,
    pub server_name: String,
    pub server_description: String,
}
