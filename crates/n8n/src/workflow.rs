//! Workflow lifecycle trait implemented by the REST client.

use async_trait::async_trait;
use opaasn8n_core::types::{WorkflowHandle, WorkflowSpec};

use crate::api::{N8nApi, N8nApiError};

/// Create and delete workflows on a remote n8n instance.
///
/// There is no read or update: a changed definition means deleting the
/// old workflow and creating a new one.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    async fn create_workflow(&self, spec: &WorkflowSpec) -> Result<WorkflowHandle, N8nApiError>;

    async fn delete_workflow(&self, handle: &WorkflowHandle) -> Result<(), N8nApiError>;
}

#[async_trait]
impl WorkflowApi for N8nApi {
    async fn create_workflow(&self, spec: &WorkflowSpec) -> Result<WorkflowHandle, N8nApiError> {
        N8nApi::create_workflow(self, spec).await
    }

    async fn delete_workflow(&self, handle: &WorkflowHandle) -> Result<(), N8nApiError> {
        N8nApi::delete_workflow(self, handle).await
    }
}
