//! `opaasn8n` -- create and delete n8n workflows from the shell.
//!
//! # Environment variables
//!
//! | Variable                   | Required | Default | Description                        |
//! |----------------------------|----------|---------|------------------------------------|
//! | `N8N_API_TOKEN`            | yes      | --      | API key sent as `X-N8N-API-KEY`    |
//! | `N8N_URL`                  | yes      | --      | Workflow collection URL            |
//! | `N8N_REQUEST_TIMEOUT_SECS` | no       | `30`    | Per-request timeout                |
//!
//! Each can also be passed as a flag (`--token`, `--url`, `--timeout-secs`).

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use opaasn8n_cli::Cli;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "opaasn8n=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = opaasn8n_cli::run(cli, &mut std::io::stdout()).await {
        tracing::error!(error = %format!("{e:#}"), "Command failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
