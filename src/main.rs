use anyhow::Context;
use clap::Parser;
use penal_search::cli::{Cli, Commands, EngineArgs};
use penal_search::error::Result;
use penal_search::format::{render_record, render_results, render_stats};
use penal_search::search::{SearchOptions, SearchOutcome, SearchResults, Status};
use penal_search::server::RecordServer;
use penal_search::state::RecordState;
use rmcp::{ServiceExt, transport::stdio};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// JSON shape printed by `search --json`.
#[derive(Serialize)]
struct SearchReport<'a> {
    status: Status,
    #[serde(flatten)]
    results: Option<&'a SearchResults>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr to avoid interfering with MCP protocol on stdout
    penal_search::tracing::init();

    let cli = Cli::parse();
    match cli.command {
        None => serve(None, &EngineArgs::default()).await,
        Some(Commands::Serve { data, engine }) => serve(data.as_deref(), &engine).await,
        Some(Commands::Search {
            query,
            data,
            sort,
            limit,
            category,
            json,
            engine,
        }) => {
            let state = load_state(&data, &engine).await?;
            let options = SearchOptions {
                mode: sort,
                limit,
                category,
            };
            let outcome = state.search(&query, &options);
            let status = state.status_of(&outcome);

            if json {
                let report = SearchReport {
                    status,
                    results: outcome.results(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            match outcome {
                SearchOutcome::Matches(results) if !results.is_empty() => {
                    print!("{}", render_results(&results.records, true));
                    println!("\n{}", render_stats(&results.stats));
                }
                _ => println!("Status: {}", status),
            }
            Ok(())
        }
        Some(Commands::Lookup { code, data, engine }) => {
            let state = load_state(&data, &engine).await?;
            let dataset = state
                .snapshot()
                .context("dataset is not loaded")?;
            match dataset.find_by_code(&code) {
                Some(record) => println!("{}", render_record(record)),
                None => anyhow::bail!("No record with code '{}'", code),
            }
            Ok(())
        }
    }
}

/// Build engine state and load `data` into it, failing on any load error.
async fn load_state(data: &Path, engine: &EngineArgs) -> Result<RecordState> {
    let config = engine.resolve().context("invalid engine configuration")?;
    let state = RecordState::new(config);
    state
        .load_file(data)
        .await
        .with_context(|| format!("could not load dataset {}", data.display()))?;
    Ok(state)
}

async fn serve(data: Option<&Path>, engine: &EngineArgs) -> Result<()> {
    let config = engine.resolve().context("invalid engine configuration")?;
    let state = Arc::new(RecordState::new(config));

    // A failed startup load leaves the server in the error state; load_dataset can retry.
    if let Some(path) = data
        && let Err(e) = state.load_file(path).await
    {
        tracing::warn!("Startup dataset load failed: {}", e);
    }

    tracing::info!("Starting penal-search MCP server");

    let server = RecordServer::with_state(state);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;

    Ok(())
}
