//! ERP Client - command-line reader
//!
//! Fetches one or more API paths through the cached client and prints the
//! JSON responses.
//!
//! ```text
//! API_BASE_URL=https://erp.example.com/api API_TOKEN=... erp_client /inventory /sales?page=2
//! ```

use anyhow::{bail, Context};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use erp_client::{ApiClient, ClientConfig, RequestOptions};

/// Main entry point for the command-line reader.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the API client and start the cache sweeper
/// 4. Fetch every path given on the command line
/// 5. Log the cache statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "erp_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        bail!("usage: erp_client <path> [<path>...]");
    }

    let config = ClientConfig::from_env();
    info!(
        "Configuration loaded: base_url={}, cache_ttl={}s, timeout={}s",
        config.base_url,
        config.cache_ttl.as_secs(),
        config.request_timeout.as_secs()
    );

    let token = config.api_token.clone();
    let sweep_interval = config.sweep_interval;
    let client = ApiClient::new(config).context("failed to build API client")?;
    let sweeper = client.spawn_sweeper(sweep_interval);

    for path in &paths {
        let value: Value = client
            .request(path, RequestOptions::get(), token.as_deref())
            .await
            .with_context(|| format!("GET {} failed", path))?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    }

    sweeper.abort();

    let stats = client.cache_stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        coalesced = stats.coalesced,
        hit_rate = stats.hit_rate(),
        "done"
    );
    Ok(())
}
