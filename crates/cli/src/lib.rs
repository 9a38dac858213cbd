//! `opaasn8n` command-line front end.
//!
//! Argument parsing and command dispatch live here so integration tests
//! can drive them; `main.rs` only sets up logging and the runtime.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use opaasn8n_client::N8nApi;
use opaasn8n_core::config::{
    ClientConfig, DEFAULT_REQUEST_TIMEOUT_SECS, ENV_REQUEST_TIMEOUT_SECS, ENV_TOKEN, ENV_URL,
};
use opaasn8n_core::types::{WorkflowHandle, WorkflowSpec};

/// Create and delete n8n workflows
#[derive(Debug, Parser)]
#[command(name = "opaasn8n", version, about = "Create and delete n8n workflows")]
pub struct Cli {
    /// n8n API key, sent as X-N8N-API-KEY
    #[arg(long, env = ENV_TOKEN, hide_env_values = true)]
    pub token: String,

    /// Workflow collection URL, e.g. https://n8n.example.com/api/v1/workflows
    #[arg(long, env = ENV_URL)]
    pub url: String,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = ENV_REQUEST_TIMEOUT_SECS,
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Reject an empty token or a malformed URL before sending anything
    #[arg(long)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a workflow and print its id
    Create {
        #[command(flatten)]
        source: DefinitionSource,

        /// Print `{"id": ...}` instead of the bare id
        #[arg(long)]
        json: bool,
    },

    /// Delete a workflow by id
    Delete {
        /// Workflow id returned by `create`
        id: String,
    },
}

/// Where the workflow definition comes from.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct DefinitionSource {
    /// Workflow definition given inline
    #[arg(long)]
    pub workflow: Option<String>,

    /// File containing the workflow definition
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl DefinitionSource {
    pub fn load(&self) -> anyhow::Result<String> {
        match (&self.workflow, &self.file) {
            (Some(inline), _) => Ok(inline.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read workflow file {}", path.display())),
            (None, None) => anyhow::bail!("Either --workflow or --file is required"),
        }
    }
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.token.clone(), self.url.clone())
            .with_request_timeout(Duration::from_secs(self.timeout_secs))
    }
}

/// Execute the parsed command, writing user-facing output to `out`.
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    let config = cli.client_config();
    if cli.strict {
        config.validate().context("Invalid configuration")?;
    }

    let api = N8nApi::new(&config)?;

    match cli.command {
        Command::Create { source, json } => {
            let definition = source.load()?;
            let handle = api
                .create_workflow(&WorkflowSpec::new(definition))
                .await
                .context("Failed to create workflow")?;

            tracing::info!(workflow_id = %handle.id, "Workflow created");

            if json {
                writeln!(out, "{}", serde_json::json!({ "id": handle.id }))?;
            } else {
                writeln!(out, "{handle}")?;
            }
        }
        Command::Delete { id } => {
            api.delete_workflow(&WorkflowHandle::new(id.clone()))
                .await
                .with_context(|| format!("Failed to delete workflow {id}"))?;

            tracing::info!(workflow_id = %id, "Workflow deleted");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut full = vec!["opaasn8n", "--token", "t", "--url", "http://localhost"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full)
    }

    #[test]
    fn parses_create_inline() {
        let cli = parse(&["create", "--workflow", "{}"]).unwrap();
        match cli.command {
            Command::Create { source, json } => {
                assert_eq!(source.load().unwrap(), "{}");
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn create_requires_a_source() {
        assert!(parse(&["create"]).is_err());
    }

    #[test]
    fn create_rejects_both_sources() {
        assert!(parse(&["create", "--workflow", "{}", "--file", "wf.json"]).is_err());
    }

    #[test]
    fn parses_delete() {
        let cli = parse(&["--timeout-secs", "7", "delete", "abc123"]).unwrap();
        assert_eq!(cli.client_config().request_timeout(), Duration::from_secs(7));
        match cli.command {
            Command::Delete { id } => assert_eq!(id, "abc123"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(parse(&["--timeout-secs", "0", "delete", "abc123"]).is_err());
    }

    #[test]
    fn missing_file_has_context() {
        let source = DefinitionSource {
            workflow: None,
            file: Some(PathBuf::from("/definitely/not/here.json")),
        };
        let err = source.load().unwrap_err();
        assert!(err.to_string().contains("Failed to read workflow file"));
    }

    #[tokio::test]
    async fn strict_rejects_empty_token() {
        let cli = Cli::try_parse_from([
            "opaasn8n", "--token", "", "--url", "http://localhost", "--strict", "delete", "x",
        ])
        .unwrap();

        let mut out = Vec::new();
        let err = run(cli, &mut out).await.unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
        assert!(out.is_empty());
    }
}
