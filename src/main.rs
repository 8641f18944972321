//! Domain-Crawler main entry point
//!
//! This is the command-line interface for the single-domain site mapper.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use domain_crawler::config::{load_config, validate, Config, FailurePolicy};
use domain_crawler::crawler::{crawl_with_config, HttpFetcher};
use domain_crawler::output::{print_statistics, render_banner, CrawlStatistics};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Domain-Crawler: maps every page reachable inside one domain
///
/// Starting from the seed URL, every link that stays inside the seed is
/// followed once. The resulting page tree, with links and static assets, is
/// printed to stdout.
#[derive(Parser, Debug)]
#[command(name = "domain-crawler")]
#[command(version)]
#[command(about = "A single-domain site mapper", long_about = None)]
struct Cli {
    /// Seed URL; only links starting with it are crawled
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the maximum number of concurrent fetches
    #[arg(long, value_name = "N")]
    max_concurrent: Option<usize>,

    /// Abort the whole crawl on the first fetch or parse error
    #[arg(long)]
    fail_fast: bool,

    /// Print crawl statistics after the tree
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let Some(seed) = cli.url.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        eprintln!("error: a seed URL is required");
        print_usage();
        return ExitCode::from(1);
    };

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{:#}", e);
            print_usage();
            return ExitCode::from(1);
        }
    };

    let fetcher = match HttpFetcher::new(&config.user_agent, &config.http) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            return ExitCode::from(1);
        }
    };

    match crawl_with_config(seed, Arc::new(fetcher), &config.crawler).await {
        Ok(graph) => {
            print!("{}", render_banner(seed));
            println!("{}", graph);
            if cli.stats {
                print_statistics(&CrawlStatistics::from_graph(&graph));
            }
            ExitCode::SUCCESS
        }
        Err(domain_crawler::CrawlError::InvalidSeed(e)) => {
            tracing::error!("Invalid seed URL {}: {}", seed, e);
            print_usage();
            ExitCode::from(1)
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Loads the configuration file, if any, and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(limit) = cli.max_concurrent {
        config.crawler.max_concurrent_fetches = limit;
    }
    if cli.fail_fast {
        config.crawler.failure_policy = FailurePolicy::FailFast;
    }

    validate(&config).context("Invalid command-line options")?;
    Ok(config)
}

fn print_usage() {
    eprintln!("{}", Cli::command().render_usage());
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the rendered tree on stdout stays clean.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("domain_crawler=info,warn"),
            1 => EnvFilter::new("domain_crawler=debug,info"),
            2 => EnvFilter::new("domain_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
