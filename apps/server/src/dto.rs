use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::tools::ToolDefinition;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: String,
    pub description: String,
}

/// Registered tools keyed by name.
#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    pub tools: BTreeMap<&'static str, ToolDefinition>,
}

/// Incoming payload for a tool invocation.
#[derive(Debug, Deserialize)]
pub struct ToolCallRequest {
    #[serde(default = "empty_arguments")]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(Map::new())
}

/// Tool output as a JSON-encoded string.
#[derive(Debug, Serialize)]
pub struct ToolCallResponse {
    pub result: String,
}
