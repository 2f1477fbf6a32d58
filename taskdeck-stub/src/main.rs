//! Taskdeck API stub server binary.
//!
//! Serves the in-memory task API for manual client testing.
//!
//! ```bash
//! # Run on the client's default endpoint
//! cargo run --bin taskdeck-stub -- --bind 127.0.0.1:8000
//! ```

use std::sync::Arc;

use clap::Parser;

use taskdeck_model::keyword::Keyword;
use taskdeck_stub::server;
use taskdeck_stub::store::StubStore;

#[derive(Parser, Debug)]
#[command(version, about = "In-memory stub of the taskdeck task API")]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1:8000", env = "TASKDECK_STUB_ADDR")]
    bind: String,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKDECK_STUB_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = Arc::new(StubStore::with_keywords(default_keywords()));

    match server::start_server(&cli.bind, store).await {
        Ok((addr, handle)) => {
            tracing::info!(%addr, "stub server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "stub server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start stub server");
            std::process::exit(1);
        }
    }
}

/// Keyword set served by the standalone binary.
fn default_keywords() -> Vec<Keyword> {
    vec![
        Keyword::new(1, "urgent"),
        Keyword::new(2, "home"),
        Keyword::new(3, "work"),
        Keyword::new(4, "errand"),
    ]
}
