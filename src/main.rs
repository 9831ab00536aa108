//! # News View
//!
//! Fetches headlines from a news search API once and shows them as a
//! searchable grid of cards in the terminal, with an optional detail view.
//!
//! ## Features
//!
//! - One fetcher for several providers (SerpApi Google News, Currents,
//!   NewsAPI, or a custom endpoint described in YAML)
//! - Case-insensitive title search, recomputed on every new term
//! - Card grid with 1 to 3 columns and a detail overlay
//! - Optional JSON export of the visible articles
//!
//! ## Usage
//!
//! ```sh
//! SERPAPI_KEY=... news_view --search lisbon
//! news_view --provider newsapi --country pt -i
//! ```
//!
//! ## Flow
//!
//! 1. **Load**: a single request fills the article list; any failure leaves
//!    it empty
//! 2. **Filter**: the search term selects the visible cards
//! 3. **Render**: loading line, empty line, card grid, or detail overlay

use clap::Parser;
use std::error::Error;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod error;
mod fetcher;
mod filter;
mod models;
mod outputs;
mod providers;
mod session;
mod utils;
mod view;

use cli::Cli;
use fetcher::HttpFetcher;
use outputs::json;
use outputs::terminal::{render_page, RenderOptions};
use providers::{EndpointConfig, QueryParams};
use utils::ensure_writable_dir;
use view::NewsView;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr; stdout carries the page) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_view starting up");

    let args = Cli::parse();
    debug!(provider = ?args.provider, endpoint_file = ?args.endpoint_file, "Parsed CLI arguments");

    let endpoint = match &args.endpoint_file {
        Some(path) => {
            let endpoint = EndpointConfig::from_yaml_file(path)?;
            info!(path = %path, shape = ?endpoint.shape, "Loaded custom endpoint");
            endpoint
        }
        None => EndpointConfig::preset(args.provider),
    };

    // Not validated: a missing key turns into an API error and an empty page.
    let api_key = args
        .api_key
        .clone()
        .or_else(|| {
            endpoint
                .api_key_env
                .as_deref()
                .and_then(|var| std::env::var(var).ok())
        })
        .unwrap_or_default();
    if api_key.is_empty() {
        debug!(env = ?endpoint.api_key_env, "No API key configured");
    }

    // Early check: ensure JSON output dir is writable
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let params = QueryParams {
        api_key,
        query: args.query.clone(),
        language: args.language.clone(),
        country: args.country.clone(),
        sort_by: args.sort_by.clone(),
    };
    let fetcher = HttpFetcher::new(endpoint, params, Duration::from_secs(args.timeout_secs))?;
    debug!(?fetcher, "Fetcher ready");

    let opts = RenderOptions {
        columns: args.columns,
        width: args.width,
        ad_slot: args.ad_slot.clone(),
    };

    let mut view = NewsView::new();
    view.set_term(args.search.clone());

    let mut stdout = std::io::stdout();
    if args.interactive {
        writeln!(stdout, "{}", render_page(&view, &opts))?;
        stdout.flush()?;
    }

    view.load(&fetcher).await;

    if let Some(n) = args.open {
        if n == 0 || !view.select(n - 1) {
            warn!(card = n, visible = view.visible().len(), "Requested card is not on screen");
        }
    }

    writeln!(stdout, "{}", render_page(&view, &opts))?;

    if args.interactive {
        writeln!(stdout, "\n{}", session::HELP_TEXT)?;
        stdout.flush()?;
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        session::run(&mut view, &opts, stdin, &mut stdout).await?;
    }

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = json::write_snapshot(&view.visible(), view.term(), dir).await {
            error!(error = %e, "Failed to write JSON export");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = view.articles().len(),
        visible = view.visible().len(),
        "Execution complete"
    );

    Ok(())
}
