//! Provider metadata, configuration, and resource registry.

use std::sync::Arc;
use std::time::Duration;

use opaasn8n_client::{N8nApi, WorkflowApi};
use opaasn8n_core::config::ClientConfig;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::resource::{Resource, WorkflowResource};
use crate::schema::{Attribute, Schema};

/// Type name every resource of this provider is prefixed with.
pub const PROVIDER_TYPE_NAME: &str = "opaasn8n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub type_name: String,
    pub version: String,
}

/// Provider block as written by the user. Missing values are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub token: Option<String>,
    pub url: Option<String>,
    /// Per-request timeout. Falls back to the client default when unset.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Unconfigured provider.
///
/// `version` is the release version, `"dev"` for local builds and
/// `"test"` under tests.
#[derive(Debug, Clone)]
pub struct Provider {
    version: String,
}

impl Provider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    pub fn schema(&self) -> Schema {
        Schema::new(vec![
            Attribute::required_string("token", "n8n API key sent as X-N8N-API-KEY.").sensitive(),
            Attribute::required_string("url", "n8n workflow collection URL."),
        ])
    }

    /// Check the provider block and build the one client every resource
    /// shares.
    ///
    /// Each missing required attribute yields its own diagnostic. Empty
    /// strings are accepted.
    pub fn configure(&self, config: ProviderConfig) -> Result<ConfiguredProvider, Diagnostics> {
        let mut diags = Diagnostics::new();

        if config.token.is_none() {
            diags.push(
                Diagnostic::error("Missing n8n API token", "The provider requires `token`.")
                    .with_attribute("token"),
            );
        }
        if config.url.is_none() {
            diags.push(
                Diagnostic::error("Missing n8n URL", "The provider requires `url`.")
                    .with_attribute("url"),
            );
        }

        if config.request_timeout_secs == Some(0) {
            diags.push(
                Diagnostic::error(
                    "Invalid request timeout",
                    "`request_timeout_secs` must be at least 1.",
                )
                .with_attribute("request_timeout_secs"),
            );
        }

        let (Some(token), Some(url)) = (config.token, config.url) else {
            return Err(diags);
        };

        if diags.has_error() {
            return Err(diags);
        }

        let mut client_config = ClientConfig::new(token, url);
        if let Some(secs) = config.request_timeout_secs {
            client_config = client_config.with_request_timeout(Duration::from_secs(secs));
        }

        let api = N8nApi::new(&client_config).map_err(|e| {
            Diagnostics::from(Diagnostic::error("Cannot build HTTP client", e.to_string()))
        })?;

        tracing::info!(
            version = %self.version,
            url = %client_config.base_url(),
            "Configured n8n provider",
        );

        Ok(ConfiguredProvider::with_client(Arc::new(api)))
    }
}

/// Provider after configuration, holding the shared client.
#[derive(Clone)]
pub struct ConfiguredProvider {
    client: Arc<dyn WorkflowApi>,
}

impl ConfiguredProvider {
    /// Wrap an already-built client, e.g. a test double.
    pub fn with_client(client: Arc<dyn WorkflowApi>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> Arc<dyn WorkflowApi> {
        Arc::clone(&self.client)
    }

    /// Resource type names this provider manages.
    pub fn resources(&self) -> Vec<String> {
        vec![WorkflowResource::new().type_name(PROVIDER_TYPE_NAME)]
    }

    /// Data source type names. There are none.
    pub fn data_sources(&self) -> Vec<String> {
        Vec::new()
    }

    /// A workflow resource sharing this provider's client.
    pub fn workflow_resource(&self) -> WorkflowResource {
        WorkflowResource::with_client(self.client())
    }
}

impl std::fmt::Debug for ConfiguredProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredProvider").finish_non_exhaustive()
    }
}
