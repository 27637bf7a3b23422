use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use youtrack_mcp_core::AppError;

use crate::dto::{ToolCallRequest, ToolCallResponse, ToolListResponse};
use crate::error::ApiResult;
use crate::state::AppState;
use crate::tools::{ToolName, tool_definitions};

pub async fn list_tools_handler() -> Json<ToolListResponse> {
    Json(ToolListResponse {
        tools: tool_definitions(),
    })
}

pub async fn call_tool_handler(
    State(state): State<AppState>,
    Path(tool_name): Path<String>,
    payload: Result<Json<ToolCallRequest>, JsonRejection>,
) -> ApiResult<Json<ToolCallResponse>> {
    let tool = ToolName::parse(&tool_name)
        .ok_or_else(|| AppError::NotFound(format!("Tool '{tool_name}' not found")))?;
    let Json(payload) = payload?;

    let result = state.tools.call(tool, payload.arguments).await;
    Ok(Json(ToolCallResponse { result }))
}
