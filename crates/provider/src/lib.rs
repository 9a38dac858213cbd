//! Resource lifecycle layer over the n8n client.
//!
//! A [`Provider`](provider::Provider) is configured once with a token and
//! URL, builds a single shared client, and hands it to every
//! [`WorkflowResource`](resource::WorkflowResource). Failures are reported
//! as [`Diagnostics`](diagnostics::Diagnostics) rather than bare errors.

pub mod diagnostics;
pub mod provider;
pub mod resource;
pub mod schema;

pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use provider::{ConfiguredProvider, Provider, ProviderConfig, ProviderMetadata};
pub use resource::{Resource, WorkflowPlan, WorkflowResource, WorkflowState};
