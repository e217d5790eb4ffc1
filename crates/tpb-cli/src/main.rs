//! Command-line front end for tpb-core
//!
//! ```text
//! tpb search "breaking bad" --category 205 --multipage --limit 100
//! tpb recent --json
//! tpb top --category 200
//! tpb files https://thepiratebay.org/torrent/8519467/Breaking_Bad
//! ```

use std::io::{self, Write};
use std::pin::pin;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use futures::{Stream, StreamExt};
use tpb_core::{ClientConfig, SearchOptions, Torrent, Tpb, DEFAULT_BASE_URL};
use tracing_subscriber::EnvFilter;

/// Query The Pirate Bay listings
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Site root or mirror to query
    #[arg(long, env = "TPB_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,
    /// Maximum requests per second
    #[arg(long, default_value_t = 2.0, global = true)]
    rps: f64,
    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,
    /// Retries for timeouts, connection errors and 5xx responses
    #[arg(long, default_value_t = 0, global = true)]
    retries: u32,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search torrents
    Search {
        query: String,
        #[arg(long, default_value_t = 0)]
        page: i64,
        /// Sort order code (7: seeders descending)
        #[arg(long, default_value_t = tpb_core::constants::orders::DEFAULT)]
        order: u32,
        /// Category code (0: all)
        #[arg(long, default_value_t = tpb_core::constants::categories::ALL)]
        category: u32,
        /// Keep fetching following pages
        #[arg(long)]
        multipage: bool,
        #[command(flatten)]
        output: Output,
    },
    /// Most recent uploads
    Recent {
        #[arg(long, default_value_t = 0)]
        page: i64,
        /// Keep fetching following pages
        #[arg(long)]
        multipage: bool,
        #[command(flatten)]
        output: Output,
    },
    /// Top torrents
    Top {
        /// Category code (0: all)
        #[arg(long, default_value_t = 0)]
        category: u32,
        #[command(flatten)]
        output: Output,
    },
    /// Print the description of a torrent detail page
    Info { url: String },
    /// Print the file list of a torrent detail page
    Files { url: String },
}

#[derive(Debug, Args)]
struct Output {
    /// Stop after this many torrents
    #[arg(long)]
    limit: Option<usize>,
    /// One JSON object per line instead of text blocks
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let tpb = Tpb::with_config(ClientConfig {
        base_url: cli.base_url,
        requests_per_second: cli.rps,
        timeout_secs: cli.timeout,
        max_retries: cli.retries,
        ..ClientConfig::default()
    })
    .context("invalid client configuration")?;

    match cli.cmd {
        Command::Search {
            query,
            page,
            order,
            category,
            multipage,
            output,
        } => {
            let mut search = tpb.search(
                &query,
                SearchOptions {
                    page,
                    order,
                    category,
                    multipage,
                },
            );
            print_torrents(search.items(), &output).await
        }
        Command::Recent {
            page,
            multipage,
            output,
        } => {
            let mut recent = tpb.recent(page);
            if multipage {
                recent.multipage();
            }
            print_torrents(recent.items(), &output).await
        }
        Command::Top { category, output } => {
            let mut top = tpb.top(category);
            print_torrents(top.items(), &output).await
        }
        Command::Info { url } => {
            let torrent = Torrent::from_url(&url);
            let info = torrent
                .info(tpb.client())
                .await
                .with_context(|| format!("fetching description of {url}"))?;
            println!("{info}");
            Ok(())
        }
        Command::Files { url } => {
            let torrent = Torrent::from_url(&url);
            let files = torrent
                .files(tpb.client())
                .await
                .with_context(|| format!("fetching file list of {url}"))?;
            for (name, size) in files {
                println!("{size:>12}  {name}");
            }
            Ok(())
        }
    }
}

async fn print_torrents(
    items: impl Stream<Item = tpb_core::Result<Torrent>>,
    output: &Output,
) -> anyhow::Result<()> {
    let items = items.take(output.limit.unwrap_or(usize::MAX));
    let mut items = pin!(items);
    let mut stdout = io::stdout().lock();
    let mut count = 0usize;

    while let Some(torrent) = items.next().await {
        let torrent = torrent.context("fetching listing")?;
        if output.json {
            serde_json::to_writer(&mut stdout, &torrent)?;
            writeln!(stdout)?;
        } else {
            if count > 0 {
                writeln!(stdout)?;
            }
            writeln!(stdout, "{torrent}")?;
        }
        count += 1;
    }

    tracing::info!(count, "done");
    Ok(())
}
