//! searchdsl: run a structured search against an Elasticsearch-compatible engine
//!
//! This is the command line entry point. Results are printed to stdout as
//! JSON, logs go to stderr.

use anyhow::Result;
use clap::Parser;
use searchdsl_rs::{
    config,
    network::HttpTransport,
    query::{
        parse_aggregation, parse_filter, parse_match, parse_sort, parse_suggestion, parse_term,
        QueryClause,
    },
    search::{
        RequestBuilder, SearchClient, SearchOptions, SortSpec, SuggestionSpec, TermsAggregation,
    },
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "searchdsl",
    version,
    about = "Run a structured search and print the decoded result"
)]
struct Cli {
    /// Path to settings file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Index to search (defaults to search.default_index)
    #[arg(short, long)]
    index: Option<String>,

    /// Full-text match clause
    #[arg(long = "match", value_name = "FIELD=TEXT", value_parser = parse_match)]
    matches: Vec<QueryClause>,

    /// Exact term clause
    #[arg(long = "term", value_name = "FIELD=VALUE", value_parser = parse_term)]
    terms: Vec<QueryClause>,

    /// Filter clause: FIELD=VALUE, FIELD<=V, FIELD>=V or FIELD:LOW..HIGH
    #[arg(long = "filter", value_name = "FILTER", value_parser = parse_filter)]
    filters: Vec<QueryClause>,

    /// Offset of the first hit
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    from: i64,

    /// Number of hits to return
    #[arg(long, allow_negative_numbers = true)]
    size: Option<i64>,

    /// Sort key, FIELD or FIELD:asc|desc
    #[arg(long, value_name = "FIELD[:ORDER]", value_parser = parse_sort)]
    sort: Vec<SortSpec>,

    /// Field to highlight
    #[arg(long, value_name = "FIELD")]
    highlight: Vec<String>,

    /// Terms aggregation, FIELD or NAME:FIELD[:SIZE]
    #[arg(long = "agg", value_name = "NAME:FIELD[:SIZE]", value_parser = parse_aggregation)]
    aggregations: Vec<TermsAggregation>,

    /// Completion suggestion
    #[arg(long, value_name = "NAME:FIELD:PREFIX[:SIZE]", value_parser = parse_suggestion)]
    suggest: Vec<SuggestionSpec>,

    /// Ask the engine to drop duplicate suggestions
    #[arg(long)]
    skip_duplicates: bool,
}

impl Cli {
    fn query(&self) -> QueryClause {
        let must = self.matches.iter().chain(&self.terms).cloned().collect();
        QueryClause::from_parts(must, self.filters.clone())
    }

    fn options(&self) -> SearchOptions {
        SearchOptions {
            from: self.from,
            size: self.size,
            sort: self.sort.clone(),
            highlight_fields: self.highlight.iter().cloned().collect(),
            aggregations: self.aggregations.clone(),
            suggestions: self
                .suggest
                .iter()
                .cloned()
                .map(|s| s.skip_duplicates(self.skip_duplicates))
                .collect(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("Starting searchdsl v{}", searchdsl_rs::VERSION);

    // Load configuration
    let settings = config::load(cli.config.as_deref())?;
    info!("Using engine at {}", settings.engine.base_url);

    let transport = HttpTransport::with_settings(&settings.engine)?;
    let client = SearchClient::new(transport)
        .with_builder(RequestBuilder::new().with_default_size(settings.search.default_size));

    let index = cli
        .index
        .clone()
        .unwrap_or_else(|| settings.search.default_index.clone());

    let result = client.execute(&cli.query(), &cli.options(), &index).await?;
    info!("{} hits (exact: {})", result.total, result.total_is_exact);

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
