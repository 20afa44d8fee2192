//! labmetrics - research activity indicator CLI
//!
//! Thin front-end over the library: computes indicator tables from an
//! organization snapshot, resolves conference/journal rankings, and
//! inspects or resets the persisted indicator cache.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use labmetrics::cache::{IndicatorCacheRecord, CACHE_AGE_UNBOUNDED};
use labmetrics::config::{resolve_config, EngineConfig};
use labmetrics::models::Organization;
use labmetrics::services::{
    ConferenceRankingTable, CorePortalClient, IndicatorService, JournalRankingCatalog,
};

/// Command-line arguments for labmetrics
#[derive(Parser, Debug)]
#[command(name = "labmetrics")]
#[command(about = "Research activity indicators for laboratory records")]
#[command(version)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute indicators for an organization snapshot
    Compute {
        /// JSON snapshot of the organization
        #[arg(long)]
        snapshot: PathBuf,

        /// First year of the range, inclusive
        #[arg(long)]
        from: i32,

        /// Last year of the range, inclusive
        #[arg(long)]
        to: i32,

        /// Restrict output to these indicator keys (repeatable)
        #[arg(long = "indicator")]
        indicators: Vec<String>,

        /// Print merged scalars instead of per-year tables
        #[arg(long)]
        scalar: bool,
    },

    /// Resolve a conference rank for a target year
    ConferenceRank {
        /// Conference identifier (acronym)
        identifier: String,

        /// Target year
        #[arg(long)]
        year: i32,

        /// Offline ranking table; the online portal is queried when absent
        #[arg(long)]
        table: Option<PathBuf>,
    },

    /// Look a journal up in a quartile catalog file
    JournalRank {
        /// Journal source identifier
        source_id: String,

        /// Catalog year the CSV file covers
        #[arg(long)]
        year: i32,

        /// Catalog CSV file
        #[arg(long)]
        csv: PathBuf,

        /// Subject area; the best quartile is reported when absent
        #[arg(long)]
        subject: Option<String>,
    },

    /// Inspect or reset the persisted indicator cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug)]
enum CacheAction {
    /// Print staleness, visible keys and cached values
    Show {
        /// Cache file; falls back to the configured cache_file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Clear date, values and buffer together
    Reset {
        /// Cache file; falls back to the configured cache_file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "labmetrics=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = resolve_config(args.config.as_deref()).context("resolving configuration")?;

    info!("Starting labmetrics {}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Compute {
            snapshot,
            from,
            to,
            indicators,
            scalar,
        } => run_compute(&snapshot, from, to, &indicators, scalar),
        Command::ConferenceRank {
            identifier,
            year,
            table,
        } => run_conference_rank(&config, &identifier, year, table.as_deref()).await,
        Command::JournalRank {
            source_id,
            year,
            csv,
            subject,
        } => run_journal_rank(&source_id, year, &csv, subject.as_deref()),
        Command::Cache { action } => run_cache(&config, action),
    }
}

fn run_compute(
    snapshot: &Path,
    from: i32,
    to: i32,
    indicator_keys: &[String],
    scalar: bool,
) -> Result<()> {
    let text = std::fs::read_to_string(snapshot)
        .with_context(|| format!("reading snapshot {}", snapshot.display()))?;
    let organization: Organization = serde_json::from_str(&text)
        .with_context(|| format!("parsing snapshot {}", snapshot.display()))?;

    let service = IndicatorService::new();
    let table = service.indicator_table(&organization, from, to, "en");

    println!("{} ({}), {from}..={to}", organization.name, organization.acronym);
    for row in table {
        if !indicator_keys.is_empty() && !indicator_keys.contains(&row.key) {
            continue;
        }
        if scalar {
            println!("{:<32} {}", row.key, format_value(row.merged));
        } else {
            println!("{}: {}", row.key, row.label);
            if row.values.is_empty() {
                println!("  (no data)");
            }
            for (year, value) in &row.values {
                println!("  {year}  {value:.3}");
            }
        }
    }
    Ok(())
}

async fn run_conference_rank(
    config: &EngineConfig,
    identifier: &str,
    year: i32,
    table: Option<&Path>,
) -> Result<()> {
    let ranking = match table {
        Some(path) => {
            let table = ConferenceRankingTable::from_csv_file(path)
                .with_context(|| format!("loading ranking table {}", path.display()))?;
            table.ranking_for(identifier, year)?
        }
        None => {
            let client = CorePortalClient::new(config)?;
            client.ranking_for(identifier, year).await?
        }
    };
    println!("{identifier} ({year}): {ranking}");
    Ok(())
}

fn run_journal_rank(source_id: &str, year: i32, csv: &Path, subject: Option<&str>) -> Result<()> {
    let catalog = JournalRankingCatalog::from_csv_file(year, csv)
        .with_context(|| format!("loading journal catalog {}", csv.display()))?;

    let quartile = match subject {
        Some(subject) => catalog.quartile(source_id, subject)?,
        None => catalog.best_quartile(source_id)?,
    };
    let scope = subject.unwrap_or("best");
    println!("{source_id} ({year}, {scope}): {quartile}");
    if let Some(impact) = catalog.impact_factor(source_id)? {
        println!("impact factor: {impact}");
    }
    Ok(())
}

fn run_cache(config: &EngineConfig, action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Show { file } => {
            let path = cache_path(config, file)?;
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading cache {}", path.display()))?;
            let mut record: IndicatorCacheRecord = serde_json::from_str(&text)
                .with_context(|| format!("parsing cache {}", path.display()))?;

            let age = record.cache_age_days(Utc::now().date_naive());
            if age == CACHE_AGE_UNBOUNDED {
                println!("age: unbounded (never computed)");
            } else {
                println!("age: {age} days");
            }
            let keys = record.visible_key_list().join(", ");
            println!(
                "visible keys: {}",
                if keys.is_empty() { "(none)" } else { keys.as_str() }
            );
            for (key, value) in record.cached_values() {
                println!("{key:<32} {value:.3}");
            }
            Ok(())
        }
        CacheAction::Reset { file } => {
            let path = cache_path(config, file)?;
            let mut record = match std::fs::read_to_string(&path) {
                Ok(text) => serde_json::from_str(&text)
                    .with_context(|| format!("parsing cache {}", path.display()))?,
                Err(_) => IndicatorCacheRecord::new(),
            };
            record.reset_cached_values();
            let json = serde_json::to_string_pretty(&record)?;
            std::fs::write(&path, json)
                .with_context(|| format!("writing cache {}", path.display()))?;
            println!("cache reset: {}", path.display());
            Ok(())
        }
    }
}

fn cache_path(config: &EngineConfig, arg: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path);
    }
    if let Some(path) = &config.cache_file {
        return Ok(path.clone());
    }
    bail!("no cache file given; pass --file or set cache_file in the config")
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.3}"),
        None => "-".to_string(),
    }
}
