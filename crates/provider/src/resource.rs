//! The `workflow` resource and its lifecycle handlers.

use std::sync::Arc;

use async_trait::async_trait;
use opaasn8n_client::WorkflowApi;
use opaasn8n_core::types::{WorkflowHandle, WorkflowSpec};

use crate::diagnostics::{Diagnostic, Diagnostics, Operation};
use crate::schema::{Attribute, Schema};

/// Suffix appended to the provider type name to form the resource type.
pub const WORKFLOW_RESOURCE_SUFFIX: &str = "_workflow";

/// Lifecycle handlers every managed resource exposes.
#[async_trait]
pub trait Resource: Send + Sync {
    /// User-declared desired state.
    type Plan: Send + Sync;
    /// Recorded state after a successful create.
    type State: Send + Sync;

    fn type_name(&self, provider_type_name: &str) -> String;

    fn schema(&self) -> Schema;

    async fn create(&self, plan: &Self::Plan) -> Result<Self::State, Diagnostics>;

    async fn read(&self, state: Self::State) -> Result<Self::State, Diagnostics>;

    async fn update(&self, plan: &Self::Plan, state: Self::State)
        -> Result<Self::State, Diagnostics>;

    async fn delete(&self, state: &Self::State) -> Result<(), Diagnostics>;
}

/// Desired workflow as declared by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowPlan {
    pub workflow: String,
}

/// Recorded state of a created workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowState {
    pub id: String,
    pub workflow: String,
}

impl WorkflowState {
    pub fn handle(&self) -> WorkflowHandle {
        WorkflowHandle::new(self.id.clone())
    }
}

/// n8n workflow resource.
///
/// Only create and delete reach n8n. Read and update return the state they
/// are given.
#[derive(Clone, Default)]
pub struct WorkflowResource {
    client: Option<Arc<dyn WorkflowApi>>,
}

impl WorkflowResource {
    /// An unconfigured resource. Every remote call reports
    /// "Unconfigured provider".
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Arc<dyn WorkflowApi>) -> Self {
        Self {
            client: Some(client),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&Arc<dyn WorkflowApi>, Diagnostics> {
        self.client.as_ref().ok_or_else(|| {
            Diagnostic::error(
                "Unconfigured provider",
                "The workflow resource was used before the provider was configured.",
            )
            .into()
        })
    }
}

impl std::fmt::Debug for WorkflowResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowResource")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[async_trait]
impl Resource for WorkflowResource {
    type Plan = WorkflowPlan;
    type State = WorkflowState;

    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}{WORKFLOW_RESOURCE_SUFFIX}")
    }

    fn schema(&self) -> Schema {
        Schema::new(vec![
            Attribute::computed_string("id", "Identifier assigned by n8n."),
            Attribute::required_string("workflow", "Workflow definition sent to n8n.")
                .requires_replace(),
        ])
    }

    async fn create(&self, plan: &WorkflowPlan) -> Result<WorkflowState, Diagnostics> {
        let client = self.client()?;

        let handle = client
            .create_workflow(&WorkflowSpec::new(plan.workflow.clone()))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create n8n workflow");
                Diagnostics::from_api_error(Operation::Create, &e)
            })?;

        tracing::info!(workflow_id = %handle.id, "Created n8n workflow");

        Ok(WorkflowState {
            id: handle.id,
            workflow: plan.workflow.clone(),
        })
    }

    async fn read(&self, state: WorkflowState) -> Result<WorkflowState, Diagnostics> {
        Ok(state)
    }

    async fn update(
        &self,
        plan: &WorkflowPlan,
        state: WorkflowState,
    ) -> Result<WorkflowState, Diagnostics> {
        // `workflow` requires replacement, so a real change never lands here.
        Ok(WorkflowState {
            id: state.id,
            workflow: plan.workflow.clone(),
        })
    }

    async fn delete(&self, state: &WorkflowState) -> Result<(), Diagnostics> {
        let client = self.client()?;

        client.delete_workflow(&state.handle()).await.map_err(|e| {
            tracing::error!(workflow_id = %state.id, error = %e, "Failed to delete n8n workflow");
            Diagnostics::from_api_error(Operation::Delete, &e)
        })?;

        tracing::info!(workflow_id = %state.id, "Deleted n8n workflow");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
