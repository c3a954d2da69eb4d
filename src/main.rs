// * review-sentiment CLI
// * scrape: URL -> fragments -> scored records -> CSV
// * ingest: text file (one fragment per line) -> scored records -> CSV
// * analyze: stored CSV -> distribution, per-source breakdown, word frequencies

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use review_sentiment::analysis::{analyze, AnalysisReport, View};
use review_sentiment::config::constants::FILE_SOURCE_TAG;
use review_sentiment::config::AppConfig;
use review_sentiment::engine::{ingest_file, scrape, ScrapeOutcome, SentimentPipeline};
use review_sentiment::network::{BrowserSource, FragmentSource, StaticSource};
use review_sentiment::ops::{filter_for_verbosity, init_tracing_pretty, init_tracing_with_level, LabelTally};
use review_sentiment::persistence::{load, save, Selection};
use review_sentiment::sentiment::load_or_unavailable;

/// Review sentiment scraper and scorer
#[derive(Parser)]
#[command(name = "review-sentiment")]
#[command(version)]
#[command(about = "Scrape review text, score sentiment with two models and export CSV")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Human-readable logs instead of JSON lines
    #[arg(long, global = true)]
    pretty: bool,

    /// Hugging Face id of the 5-star classifier
    #[arg(long, global = true)]
    model_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a page and score every qualifying text sample
    Scrape {
        url: String,
        /// CSV destination; omit to skip saving
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Fetch raw HTML over HTTP instead of rendering in a browser
        #[arg(long = "static")]
        static_fetch: bool,
        /// Wait after navigation before reading the page
        #[arg(long)]
        settle_ms: Option<u64>,
    },
    /// Score a plain text file, one fragment per line
    Ingest {
        file: PathBuf,
        /// CSV destination; omit to skip saving
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Summarize a stored CSV of review records
    Analyze {
        file: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = filter_for_verbosity(cli.verbose);
    if cli.pretty {
        init_tracing_pretty(&filter);
    } else {
        init_tracing_with_level(&filter);
    }

    let mut config = AppConfig::new();
    if let Some(model_id) = cli.model_id {
        config = config.with_model_id(model_id);
    }

    match cli.command {
        Commands::Scrape {
            url,
            output,
            static_fetch,
            settle_ms,
        } => {
            if let Some(ms) = settle_ms {
                config = config.with_settle_delay_ms(ms);
            }
            run_scrape(&config, &url, output.as_deref(), static_fetch).await
        }
        Commands::Ingest { file, output } => run_ingest(&config, &file, output.as_deref()).await,
        Commands::Analyze { file, json } => run_analyze(file.as_deref(), json),
    }
}

async fn run_scrape(config: &AppConfig, url: &str, output: Option<&Path>, static_fetch: bool) -> Result<()> {
    let source: Box<dyn FragmentSource> = if static_fetch {
        Box::new(StaticSource::new().context("failed to build HTTP client")?)
    } else {
        Box::new(BrowserSource::with_config(config.browser.clone()))
    };

    let model = load_or_unavailable(&config.classifier).await;
    let pipeline = SentimentPipeline::from_config(config, model);

    let outcome = scrape(url, source.as_ref(), &pipeline)
        .await
        .with_context(|| format!("failed to scrape {url}"))?;

    persist(outcome, output)
}

async fn run_ingest(config: &AppConfig, file: &Path, output: Option<&Path>) -> Result<()> {
    let config = config.clone().with_source(FILE_SOURCE_TAG);
    let model = load_or_unavailable(&config.classifier).await;
    let pipeline = SentimentPipeline::from_config(&config, model);

    let outcome = ingest_file(file, &pipeline).with_context(|| format!("failed to ingest {}", file.display()))?;

    persist(outcome, output)
}

fn persist(outcome: ScrapeOutcome, output: Option<&Path>) -> Result<()> {
    let records = match outcome {
        ScrapeOutcome::Records(records) => records,
        ScrapeOutcome::NoData => {
            warn!("No valid review data found; nothing to save");
            return Ok(());
        }
    };

    LabelTally::from_records(&records).log_summary();

    match save(output, &records).context("failed to save records")? {
        Selection::Chosen(path) => info!(path = %path.display(), records = records.len(), "Data saved"),
        Selection::Cancelled => warn!("No output file chosen; records were not saved"),
    }
    Ok(())
}

fn run_analyze(file: Option<&Path>, json: bool) -> Result<()> {
    let table = match load(file).context("failed to load records")? {
        Selection::Chosen(table) => table,
        Selection::Cancelled => {
            warn!("No input file chosen; nothing to analyze");
            return Ok(());
        }
    };

    let report = analyze(&table);
    if json {
        println!("{}", report.to_json_pretty());
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!("Rows: {}", report.total_rows);

    match &report.sentiment_distribution {
        View::Available { data } => {
            println!("Sentiment distribution:");
            for share in data {
                println!("  {:<8} {:>6} ({:.1}%)", share.label, share.count, share.percent);
            }
        }
        View::Unavailable { reason } => println!("Sentiment distribution unavailable: {reason}"),
    }

    match &report.sentiment_by_source {
        View::Available { data } => {
            println!("Sentiment by source:");
            for row in data {
                println!(
                    "  {:<8} positive={} neutral={} negative={}",
                    row.source, row.positive, row.neutral, row.negative
                );
            }
        }
        View::Unavailable { reason } => println!("Sentiment by source unavailable: {reason}"),
    }

    match &report.word_frequencies {
        View::Available { data } => {
            println!("Top words:");
            for word in data.iter().take(20) {
                println!("  {:<16} {}", word.word, word.count);
            }
        }
        View::Unavailable { reason } => println!("Word frequencies unavailable: {reason}"),
    }
}
