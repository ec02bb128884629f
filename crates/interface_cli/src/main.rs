//! Fund NAV Crawler Binary
//!
//! Fetches a fund's NAV history from the remote source and stores every new
//! record. The first run for a fund loads its whole history; later runs only
//! fetch from the latest stored date on.
//!
//! # Usage
//!
//! ```bash
//! fund-crawl -c 000962
//! fund-crawl -c 000962 --db-host db --db-password secret --max-pages 50
//! ```
//!
//! Database settings come from `DB_*` environment variables (or a `.env`
//! file); flags override them. Exit code 1 means the database could not be
//! reached.

mod cli;

use std::process;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::FundCode;
use domain_fund::Crawler;
use infra_db::{create_pool, run_migrations, DatabaseConfig, PgNavStore};
use infra_source::{SinaNavSource, SourceConfig};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let fund_code = FundCode::parse(&cli.code).context("invalid fund code")?;
    let db_config = cli.database_config(DatabaseConfig::from_env().context("invalid DB_* configuration")?);
    let source_config = cli.source_config(SourceConfig::from_env().context("invalid SOURCE_* configuration")?);

    let pool = match create_pool(db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!(error = %e, "Database connection failed");
            process::exit(1);
        }
    };
    run_migrations(&pool).await?;

    let store = PgNavStore::new(pool);
    let source = SinaNavSource::new(source_config)?;
    let today = Local::now().date_naive();

    let report = match Crawler::new(&source, &store)
        .with_config(cli.crawl_config())
        .crawl(&fund_code, today)
        .await
    {
        Ok(report) => report,
        Err(e) => {
            error!(fund_code = %fund_code, error = %e, "Crawl aborted");
            process::exit(1);
        }
    };

    info!(
        fund_code = %report.fund_code,
        pages = report.pages_with_data,
        inserted = report.records_inserted,
        existing = report.records_existing,
        failed = report.records_failed,
        complete = report.is_complete(),
        "Crawl finished"
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` wins over `--log-level`.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
