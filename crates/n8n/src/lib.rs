//! n8n REST client library.
//!
//! Wraps the two workflow calls the platform needs (create and delete)
//! and exposes them behind the [`WorkflowApi`](workflow::WorkflowApi)
//! trait so lifecycle handlers can share one client.

pub mod api;
pub mod workflow;

pub use api::{N8nApi, N8nApiError};
pub use workflow::WorkflowApi;
