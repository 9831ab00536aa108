//! Command-line interface definitions for News View.
//!
//! Every option can be given as a flag; API keys can also come from the
//! environment variable each provider reads.

use clap::Parser;

use crate::providers::Provider;

/// Command-line arguments for the News View application.
///
/// # Examples
///
/// ```sh
/// # Google News through SerpApi, filtered to titles containing "rain"
/// SERPAPI_KEY=... news_view --search rain
///
/// # Currents, interactive session
/// news_view --provider currents -i
///
/// # Custom endpoint described in YAML
/// news_view --endpoint-file ./my-endpoint.yaml --columns 3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Built-in news endpoint to fetch from
    #[arg(short, long, value_enum, default_value = "serpapi")]
    pub provider: Provider,

    /// YAML file describing a custom endpoint (overrides --provider)
    #[arg(long)]
    pub endpoint_file: Option<String>,

    /// API key; defaults to the provider's environment variable
    #[arg(long)]
    pub api_key: Option<String>,

    /// Upstream query for providers that take one
    #[arg(short, long, default_value = "news")]
    pub query: String,

    /// Initial search term applied to article titles
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Language code passed to the endpoint
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Country code passed to the endpoint
    #[arg(long, default_value = "us")]
    pub country: String,

    /// Sort order passed to the endpoint
    #[arg(long, default_value = "publishedAt")]
    pub sort_by: String,

    /// Open the detail view of visible card N (1-based)
    #[arg(long)]
    pub open: Option<usize>,

    /// Read search terms and commands from stdin after loading
    #[arg(short, long)]
    pub interactive: bool,

    /// Cards per row (1-3)
    #[arg(
        long,
        default_value_t = 2,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=3)
    )]
    pub columns: usize,

    /// Page width in characters
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Text for the advertising placeholder below the header
    #[arg(long)]
    pub ad_slot: Option<String>,

    /// Directory to export the visible articles to as JSON
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,
}
