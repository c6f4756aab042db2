//! Snapshot poller
//!
//! Fetches the CoinGecko market snapshot (and optionally per-coin
//! history for the top-10 list), replacing the previous realtime CSV.
//! A failed tick is logged and skipped; the next tick starts fresh.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use tracing::{error, info, warn};

use deck_core::snapshot::RealtimeSnapshot;
use deck_data::{CoinGeckoClient, SnapshotStore};

#[derive(Debug, Parser)]
#[clap(name = "coindeck-scrape", version)]
struct Cli {
    /// Directory snapshots are written under
    #[clap(long, default_value = "data")]
    data_dir: PathBuf,

    /// Coins per page requested from /coins/markets
    #[clap(long, default_value_t = 250)]
    per_page: usize,

    /// Also fetch per-coin history for the top-10 list
    #[clap(long)]
    with_history: bool,

    /// Days of history per coin
    #[clap(long, default_value_t = 30)]
    history_days: u32,

    /// Poll every N seconds instead of running once
    #[clap(long)]
    interval_secs: Option<u64>,
}

async fn scrape_once(client: &CoinGeckoClient, store: &SnapshotStore, cli: &Cli) -> Result<()> {
    let captured_at = Local::now().naive_local();
    let rows = client.markets(cli.per_page, 1).await?;
    info!(rows = rows.len(), "fetched market snapshot");

    let top10: Vec<String> = rows.iter().take(10).map(|r| r.id.clone()).collect();
    store.write_realtime(rows.clone(), captured_at)?;
    store.write_top10(&top10)?;

    if cli.with_history {
        let snapshot = RealtimeSnapshot::new(rows, None);
        let mut history = Vec::new();
        for id in &top10 {
            let ath = snapshot.row(id).map_or(0.0, |r| r.ath);
            match client.market_chart(id, cli.history_days, ath).await {
                Ok(mut rows) => history.append(&mut rows),
                Err(error) => warn!(%id, %error, "history fetch failed"),
            }
        }
        store.write_historical(&history, captured_at)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let client = CoinGeckoClient::new();
    let store = SnapshotStore::new(&cli.data_dir);

    match cli.interval_secs {
        None => scrape_once(&client, &store, &cli).await?,
        Some(secs) => {
            info!(interval_secs = secs, "polling on a schedule");
            let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
            loop {
                ticker.tick().await;
                if let Err(error) = scrape_once(&client, &store, &cli).await {
                    error!(%error, "scrape tick failed");
                }
            }
        }
    }

    Ok(())
}
