//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `geolite2_store` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - JSON output and exit codes
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::process;

use geolite2_store::config::{Cli, Command};
use geolite2_store::initialization::{init_client, init_logger_with};
use geolite2_store::{init_db_pool, Config, GeoError, GeoLite2, Loader, RemoteFetcher};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // This allows setting MAXMIND_LICENSE_KEY in .env without exporting it manually
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = cli.config();
    if let Err(e) = run(cli.command, &config).await {
        eprintln!("geolite2_store error: {:#}", e);
        // Context layers still downcast to the underlying GeoError.
        let code = e
            .downcast_ref::<GeoError>()
            .map(|g| g.category().exit_code())
            .unwrap_or(1);
        process::exit(code);
    }
    Ok(())
}

async fn run(command: Command, config: &Config) -> Result<()> {
    let pool = init_db_pool(config)
        .await
        .map_err(GeoError::from)
        .with_context(|| format!("Failed to open store at {}", config.db_path.display()))?;

    let geo = GeoLite2::new(pool.clone(), config);

    match command {
        Command::LoadLocal {
            asn,
            city,
            country,
            fresh,
        } => {
            let loader = Loader::new(pool);
            if fresh {
                loader.reset().await.context("Failed to drop existing data")?;
            }
            let reports = loader
                .load_local(&asn, &city, &country)
                .await
                .context("Local load failed")?;
            print_json(&reports)
        }
        Command::LoadRemote { fresh, .. } => {
            let client = init_client(config).context("Failed to initialize HTTP client")?;
            let fetcher = RemoteFetcher::new(config, client)?;
            let loader = Loader::new(pool);
            if fresh {
                loader.reset().await.context("Failed to drop existing data")?;
            }
            let reports = loader
                .load_remote(&fetcher)
                .await
                .with_context(|| {
                    format!(
                        "Remote load failed (staging in {})",
                        fetcher.staging_dir().display()
                    )
                })?;
            print_json(&reports)
        }
        Command::Lookup { kind, ip } => {
            let record = geo
                .lookup_by_address(kind, &ip)
                .await
                .with_context(|| format!("{} lookup of {} failed", kind, ip))?;
            print_json(&record)
        }
        Command::AsnNumber { number } => print_json(&geo.blocks_by_asn_number(number).await?),
        Command::AsnName { name } => print_json(&geo.blocks_by_asn_name(&name).await?),
        Command::Organizations => print_json(&geo.organizations().await?),
        Command::CityCode {
            locale,
            country,
            subdivision,
        } => print_json(
            &geo.lookup_by_region(locale, &country, Some(&subdivision))
                .await?,
        ),
        Command::CountryCode { locale, code } => {
            print_json(&geo.blocks_by_country_code(locale, &code).await?)
        }
        Command::ContinentCode { locale, code } => {
            print_json(&geo.blocks_by_continent_code(locale, &code).await?)
        }
        Command::History { limit } => print_json(&geo.load_history(limit).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize result")?
    );
    Ok(())
}
