use std::io::{self, BufWriter};

use msgraph_provider::{JsonLinesSink, ALL_RESOURCES};
use msgraph_provider_entra::{provider, Client, EntraConfig, EntraCredentials};
use tracing_subscriber::EnvFilter;

/// Comma-separated resource keys to sync; `*` selects every resource.
const RESOURCES_VAR: &str = "MSGRAPH_RESOURCES";

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Rows go to stdout, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,msgraph_provider=debug")),
        )
        .with_writer(io::stderr)
        .init();

    let config = EntraConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });
    let credentials = EntraCredentials::from_env().unwrap_or_else(|e| {
        eprintln!("Credentials error: {e}");
        std::process::exit(1);
    });

    let client = Client::configure(&config, credentials).unwrap_or_else(|e| {
        eprintln!("Client error: {e}");
        std::process::exit(1);
    });

    let provider = provider().unwrap_or_else(|e| {
        eprintln!("Provider error: {e}");
        std::process::exit(1);
    });

    let selection = std::env::var(RESOURCES_VAR).unwrap_or_else(|_| ALL_RESOURCES.to_string());
    let mut selection: Vec<&str> = selection
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if selection.is_empty() {
        selection.push(ALL_RESOURCES);
    }

    tracing::info!(
        tenant_id = %client.tenant_id(),
        resources = ?selection,
        "starting msgraph sync"
    );

    let mut sink = JsonLinesSink::new(BufWriter::new(io::stdout()));
    let summary = provider
        .sync(&client, &selection, &mut sink)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Sync error: {e}");
            std::process::exit(1);
        });

    if let Err(e) = sink.into_inner() {
        eprintln!("Output error: {e}");
        std::process::exit(1);
    }

    for outcome in summary.failed() {
        if let Some(ref e) = outcome.error {
            eprintln!("{} ({}) failed: {e}", outcome.resource, outcome.table);
        }
    }

    tracing::info!(rows = summary.total_rows(), "msgraph sync finished");

    if !summary.is_success() {
        std::process::exit(1);
    }
}
