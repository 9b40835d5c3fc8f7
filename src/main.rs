// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use disclosure_search::utils::logging::{format_info, format_success, format_warning};
use disclosure_search::{
    Config, HealthCheck, HealthReport, IndexComponent, JsonExporter, PgroongaIndex, QueryBuilder,
    QueryPlan, SchemaManager, SearchCriteria, SearchOutcome, SearchProgress, SearchReport,
    SearchService, TextRenderer,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "disclosure_search")]
#[command(version = "0.1.0")]
#[command(about = "Table-of-contents aware full-text search over annual securities reports", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Search passages by keyword, optionally within a table of contents path
    Search {
        /// Search keyword, passed to the index as-is
        #[arg(default_value = "")]
        keyword: String,

        /// Only passages whose breadcrumb matches this filter
        #[arg(short, long, default_value = "")]
        breadcrumb: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Print snippets with the index's HTML markers untouched
        #[arg(long)]
        raw: bool,

        /// Also write the JSON report to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Check the database connection and the PGroonga schema
    Verify,

    /// Show document and passage counts
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    disclosure_search::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config_path = if cli.config.exists() {
        Some(cli.config.as_path())
    } else {
        warn!(
            "Config file {} not found, using defaults and environment",
            cli.config.display()
        );
        None
    };
    let config = Config::load(config_path).context("Failed to load configuration")?;

    match cli.command {
        Commands::Search {
            keyword,
            breadcrumb,
            format,
            raw,
            output,
        } => {
            let criteria = SearchCriteria::new(keyword, breadcrumb);
            cmd_search(&config, &criteria, format, raw, output, cli.color).await?;
        }
        Commands::Verify => {
            cmd_verify(&config).await?;
        }
        Commands::Stats => {
            cmd_stats(&config).await?;
        }
    }

    Ok(())
}

async fn cmd_search(
    config: &Config,
    criteria: &SearchCriteria,
    format: OutputFormat,
    raw: bool,
    output: Option<PathBuf>,
    color: bool,
) -> Result<()> {
    let renderer = TextRenderer::new(config.search.disclosure_base_url.clone(), color).raw(raw);

    if QueryBuilder::from_criteria(criteria) == QueryPlan::EntryForm {
        print!("{}", renderer.render(&SearchOutcome::EntryForm));
        return Ok(());
    }

    info!("Searching for: {}", criteria.keyword);

    let index = PgroongaIndex::connect(&config.database, &config.search)
        .await
        .context("Failed to connect to the search index")?;

    let mut service = SearchService::new(index);
    let progress = match format {
        OutputFormat::Text => {
            let progress = Arc::new(SearchProgress::new(color));
            service = service.with_progress(progress.clone());
            Some(progress)
        }
        OutputFormat::Json => None,
    };

    let interrupted = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    let outcome = service.run_until(criteria, interrupted).await;

    if let Some(progress) = &progress {
        progress.finish();
        let stats = progress.get_stats();
        info!(
            "Received {} passages for {} documents in {}ms ({:.1} per document)",
            stats.passages_received,
            stats.documents_assembled,
            stats.duration_ms,
            stats.passages_per_document()
        );
    }

    let outcome = outcome.context("Search failed")?;

    let report = SearchReport::new(criteria, &outcome, &config.search.disclosure_base_url);

    match format {
        OutputFormat::Text => print!("{}", renderer.render(&outcome)),
        OutputFormat::Json => println!("{}", report.to_json(true)?),
    }

    if let Some(output) = output {
        let path = JsonExporter::export_to_file(&report, &output, true)?;
        eprintln!("{}", format_success(&format!("Report written to {}", path.display())));
    }

    Ok(())
}

async fn cmd_verify(config: &Config) -> Result<()> {
    info!("Verifying index connection and schema");

    let dsn = config.database.dsn.as_str();
    let mut checks = Vec::new();

    let started = Instant::now();
    let index = match PgroongaIndex::connect(&config.database, &config.search).await {
        Ok(index) => index,
        Err(e) => {
            checks.push(HealthCheck::unhealthy(IndexComponent::Connection, e.to_string(), started.elapsed()));
            print!("{}", HealthReport::new(dsn, checks).format());
            return Err(anyhow::anyhow!("Index unavailable"));
        }
    };

    match index.ping().await {
        Ok(_) => checks.push(HealthCheck::healthy(IndexComponent::Connection, started.elapsed())),
        Err(e) => checks.push(HealthCheck::unhealthy(IndexComponent::Connection, e.to_string(), started.elapsed())),
    }

    let started = Instant::now();
    match SchemaManager::new(&index).inspect().await {
        Ok(schema) if schema.is_complete() => {
            checks.push(HealthCheck::healthy(IndexComponent::Schema, started.elapsed()))
        }
        Ok(schema) => checks.push(HealthCheck::degraded(
            IndexComponent::Schema,
            format!("missing {}", schema.missing().join(", ")),
            started.elapsed(),
        )),
        Err(e) => checks.push(HealthCheck::unhealthy(IndexComponent::Schema, e.to_string(), started.elapsed())),
    }

    let report = HealthReport::new(dsn, checks);
    print!("{}", report.format());

    if !report.is_searchable() {
        return Err(anyhow::anyhow!("Index verification failed"));
    }

    Ok(())
}

async fn cmd_stats(config: &Config) -> Result<()> {
    info!("Gathering statistics");

    let index = PgroongaIndex::connect(&config.database, &config.search)
        .await
        .context("Failed to connect to the search index")?;

    if !SchemaManager::new(&index).verify_schema().await? {
        eprintln!(
            "{}",
            format_warning("Schema incomplete, run `disclosure_search verify` for details")
        );
        return Ok(());
    }

    let documents = index.document_count().await?;
    let passages = index.passage_count().await?;

    println!("{}", format_info(&format!("Documents: {}", documents)));
    println!("{}", format_info(&format!("Passages:  {}", passages)));

    Ok(())
}
