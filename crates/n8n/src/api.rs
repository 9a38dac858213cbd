//! REST API client for the n8n workflow endpoints.
//!
//! Wraps the workflow creation and deletion calls using [`reqwest`].
//! Every response body is read to completion before the status is
//! classified, so connections are released on error paths as well.

use std::fmt;

use opaasn8n_core::config::ClientConfig;
use opaasn8n_core::types::{WorkflowHandle, WorkflowSpec, API_KEY_HEADER};
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

/// HTTP client for a single n8n workflow endpoint.
#[derive(Clone)]
pub struct N8nApi {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl fmt::Debug for N8nApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("N8nApi")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Response returned by n8n after creating a workflow.
///
/// Only `id` is read; any other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateWorkflowResponse {
    /// Server-assigned workflow identifier.
    pub id: String,
}

/// Errors from the n8n REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum N8nApiError {
    /// The underlying [`reqwest::Client`] could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The configured base URL cannot address a workflow.
    #[error("Invalid n8n URL {url:?}: {reason}")]
    InvalidUrl {
        /// The configured base URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The response arrived but its body could not be read.
    #[error("Failed to read n8n response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// n8n answered with a status other than `200 OK`.
    #[error("n8n API error ({status}): {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A `200 OK` body did not have the expected shape.
    #[error("Failed to decode n8n response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A workflow id was empty, either in a create response or as a
    /// delete target.
    #[error("Workflow id is empty")]
    MissingId,
}

impl N8nApiError {
    /// Raw response body for rejections, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// HTTP status for rejections, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl N8nApi {
    /// Create an API client with its own [`reqwest::Client`], applying the
    /// configured request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, N8nApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(N8nApiError::Client)?;
        Ok(Self::with_client(client, config))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    ///
    /// The configured timeout is not applied; the given client's settings win.
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            token: config.token().to_string(),
            base_url: config.base_url().to_string(),
        }
    }

    /// Workflow collection URL this client posts to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a workflow.
    ///
    /// Sends `POST {base_url}` with `{"certificate": <definition>}` and
    /// returns the `id` from the `200 OK` body.
    pub async fn create_workflow(&self, spec: &WorkflowSpec) -> Result<WorkflowHandle, N8nApiError> {
        let url = self.collection_url()?;
        tracing::debug!(url = %url, "Sending n8n create workflow request");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.token)
            .json(&spec.to_payload())
            .send()
            .await
            .map_err(N8nApiError::Request)?;

        let body = Self::read_ok_body(response).await?;
        let parsed: CreateWorkflowResponse = serde_json::from_str(&body)?;
        if parsed.id.is_empty() {
            return Err(N8nApiError::MissingId);
        }

        Ok(WorkflowHandle::new(parsed.id))
    }

    /// Delete a workflow.
    ///
    /// Sends `DELETE {base_url}/{id}` with an empty body. Deleting an id
    /// n8n no longer knows is reported as whatever status n8n returns.
    pub async fn delete_workflow(&self, handle: &WorkflowHandle) -> Result<(), N8nApiError> {
        let url = self.workflow_url(&handle.id)?;
        tracing::debug!(url = %url, "Sending n8n delete workflow request");

        let response = self
            .client
            .delete(url)
            .header(API_KEY_HEADER, &self.token)
            .send()
            .await
            .map_err(N8nApiError::Request)?;

        Self::read_ok_body(response).await?;
        Ok(())
    }

    // ---- private helpers ----

    fn collection_url(&self) -> Result<Url, N8nApiError> {
        Url::parse(&self.base_url).map_err(|e| N8nApiError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }

    /// `{base_url}/{id}`, with `id` appended as one percent-encoded segment.
    fn workflow_url(&self, id: &str) -> Result<Url, N8nApiError> {
        if id.is_empty() {
            return Err(N8nApiError::MissingId);
        }

        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|()| N8nApiError::InvalidUrl {
                url: self.base_url.clone(),
                reason: "URL cannot have path segments".to_string(),
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Read the full body, then require `200 OK`. Any other status becomes
    /// [`N8nApiError::Rejected`] carrying the body text.
    async fn read_ok_body(response: reqwest::Response) -> Result<String, N8nApiError> {
        let status = response.status();
        let body = response.text().await.map_err(N8nApiError::ReadBody)?;

        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "n8n rejected request");
            return Err(N8nApiError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
