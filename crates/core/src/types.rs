/// JSON key the workflow definition is sent under when creating a workflow.
///
/// The name does not describe the payload, but the remote endpoint
/// expects it verbatim.
pub const WORKFLOW_PAYLOAD_KEY: &str = "certificate";

/// Header carrying the n8n API key on every request.
pub const API_KEY_HEADER: &str = "X-N8N-API-KEY";

/// Desired workflow, forwarded to n8n without inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSpec {
    pub definition: String,
}

impl WorkflowSpec {
    pub fn new(definition: impl Into<String>) -> Self {
        Self {
            definition: definition.into(),
        }
    }

    /// Request body for the create call: `{"certificate": <definition>}`.
    pub fn to_payload(&self) -> serde_json::Value {
        let mut body = serde_json::Map::with_capacity(1);
        body.insert(
            WORKFLOW_PAYLOAD_KEY.to_string(),
            serde_json::Value::String(self.definition.clone()),
        );
        serde_json::Value::Object(body)
    }
}

/// Server-assigned identifier of a created workflow.
///
/// Valid from a successful create until the matching delete.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkflowHandle {
    pub id: String,
}

impl WorkflowHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl std::fmt::Display for WorkflowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}
