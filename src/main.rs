//! Sift binary: line-oriented harness over the filtering engine.
//!
//! Reads stdin line by line. `/`-prefixed lines are commands (`/filters`,
//! `/remove <index>`, `/clear`, or any filter grammar such as `/hide sports`);
//! other lines are candidate posts, either `{"id": ..., "text": ...}` JSON or
//! bare text (which gets a generated id). Visibility decisions leave on stdout
//! as JSON lines; logs go to stderr.

use std::sync::Arc;

use futures_util::StreamExt;
use mimalloc::MiMalloc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;

use sift::config::Config;
use sift::engine::{Candidate, CommandOutcome, FeedCoordinator, FeedHandle};
use sift::filter::JsonFilterStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        batch_size = config.batch_size,
        debounce_ms = config.debounce_ms,
        filters_path = %config.filters_path.display(),
        "Sift starting"
    );

    let store = Arc::new(JsonFilterStore::new(config.filters_path.clone()));
    let (handle, mut decisions) = FeedCoordinator::spawn(config, store).await;

    let printer = tokio::spawn(async move {
        while let Some(decision) = decisions.next().await {
            match serde_json::to_string(&decision) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::error!(error = %e, "Failed to encode decision"),
            }
        }
    });

    tokio::select! {
        result = read_lines(handle.clone()) => result?,
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
        }
    }

    handle.shutdown().await.ok();
    printer.await.ok();
    tracing::info!("Sift shutdown complete");
    Ok(())
}

async fn read_lines(handle: FeedHandle) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            run_command(&handle, command).await?;
        } else {
            handle.ingest(vec![parse_candidate(line)]).await?;
        }
    }

    // Score any partial buffer before exiting so short piped sessions do not
    // wait out the debounce.
    let report = handle.flush().await?;
    tracing::info!(total = report.total, hidden = report.hidden, "Final pass at EOF");
    Ok(())
}

async fn run_command(handle: &FeedHandle, command: &str) -> anyhow::Result<()> {
    match command.trim() {
        "filters" => {
            for (index, meta) in handle.filters().await?.iter().enumerate() {
                eprintln!(
                    "{index}: {:?} {:?} (topK={}, threshold={})",
                    meta.mode, meta.query, meta.top_k, meta.threshold
                );
            }
        }
        "clear" => {
            let report = handle.clear_filters().await?;
            tracing::info!(hidden = report.hidden, "Filters cleared");
        }
        other if other.starts_with("remove ") => {
            match other["remove ".len()..].trim().parse::<usize>() {
                Ok(index) => match handle.remove_filter(index).await {
                    Ok(report) => tracing::info!(index, hidden = report.hidden, "Filter removed"),
                    Err(e) => eprintln!("error: {e}"),
                },
                Err(e) => eprintln!("error: invalid filter index: {e}"),
            }
        }
        other => match handle.command(other).await {
            Ok(CommandOutcome::Applied { filter, report }) => {
                tracing::info!(
                    query = %filter.query,
                    mode = ?filter.mode,
                    hidden = report.hidden,
                    "Filter applied"
                );
            }
            Ok(CommandOutcome::Ignored) => {
                eprintln!("no filter produced (try: hide <query>, show top <n> <query>)");
            }
            // Parse faults are the one user-visible failure class.
            Err(e) => eprintln!("error: {e}"),
        },
    }
    Ok(())
}

fn parse_candidate(line: &str) -> Candidate {
    match serde_json::from_str::<Candidate>(line) {
        Ok(candidate) => candidate,
        Err(_) => Candidate::new(uuid::Uuid::new_v4().to_string(), line),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
