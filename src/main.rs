//! locdb CLI - Command-line interface for the postal code coordinate store

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use locdb::config::{self, LocdbConfig};
use locdb::import::{self, ImportOptions};
use locdb::storage::LocationStore;
use locdb::ui::{self, Icons, Spinner};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "locdb")]
#[command(version)]
#[command(about = "Postal code to coordinate lookups backed by a local SQLite database")]
#[command(long_about = r#"
locdb loads postal code reference data into a local SQLite database and
answers coordinate lookups by country code and postal code.

Example usage:
  locdb import --country GB --file GB.txt
  locdb lookup GB "SW1W 0NY"
  locdb counts
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Import a tab-separated postal code file for one country
    Import {
        /// Two character ISO country code
        #[arg(long)]
        country: String,

        /// Path to the tab-separated postal code file
        #[arg(short, long)]
        file: PathBuf,

        /// Keep the country's existing rows instead of replacing them
        #[arg(long)]
        keep_existing: bool,

        /// Import every row of the file, not only rows of --country
        #[arg(long)]
        all_rows: bool,

        /// Accept a file without rows for --country (empties the country unless --keep-existing)
        #[arg(long)]
        allow_empty: bool,
    },

    /// Find the coordinates of a postal code
    Lookup {
        /// Two character ISO country code
        country: String,

        /// Postal code, matched exactly
        postal_code: String,
    },

    /// Show the number of postal codes per country
    Counts,

    /// Show statistics about the database
    Stats,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            ui::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let loaded = config::load_config(cli.config.as_deref())?;
    let settings = loaded.clone().unwrap_or_default();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(settings.log_level.as_deref().unwrap_or("info"))
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if loaded.is_none() {
        tracing::debug!("No config file found, using defaults");
    }

    let database = cli
        .database
        .clone()
        .unwrap_or_else(|| settings.database_path());

    match cli.command {
        Commands::Init { force } => {
            let path = cli.config.clone().unwrap_or_else(config::default_config_path);
            let defaults = LocdbConfig {
                database: Some(database.to_string_lossy().to_string()),
                log_level: Some("info".to_string()),
            };
            config::write_config(&path, &defaults, force)?;
            ui::success(&format!("Wrote config to {}", path.display()));
        }

        Commands::Import {
            country,
            file,
            keep_existing,
            all_rows,
            allow_empty,
        } => {
            if !cli.json {
                ui::header(Icons::GLOBE, &format!("Importing {} from {}", country, file.display()));
            }
            let options = ImportOptions {
                erase_first: !keep_existing,
                all_rows,
                allow_empty,
            };
            let records = import::load_country_records(&file, &country, &options)
                .with_context(|| format!("Failed to import {}", file.display()))?;

            if records.is_empty() {
                ui::warn(&format!("No rows for {} in {}", country, file.display()));
            }

            config::ensure_db_dir(&database)?;
            let mut store = open_store(&database)?;

            let spinner = Spinner::new(&format!("Writing {} rows...", records.len()));
            let result = import::ingest_records(&mut store, &records, &country, &options);
            spinner.finish_and_clear();
            let summary = result?;
            store.close()?;

            if cli.json {
                let data = serde_json::json!({
                    "country_code": country,
                    "inserted": summary.inserted,
                    "country_total": summary.country_total,
                    "first_use": summary.first_use,
                });
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                ui::success(&format!("Imported {} rows for {}", summary.inserted, country));
                ui::info("Rows stored for country", &summary.country_total.to_string());
                if summary.first_use {
                    ui::info("Database initialized", &database.display().to_string());
                }
            }
        }

        Commands::Lookup {
            country,
            postal_code,
        } => {
            let mut store = open_store(&database)?;
            let found = store.find_coordinates(&country, &postal_code)?;
            store.close()?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            }

            match found {
                Some(coords) => {
                    if !cli.json {
                        ui::found(Icons::PIN, &coords.to_string());
                    }
                }
                None => {
                    if !cli.json {
                        ui::not_found(&format!("No coordinates for {} {}", country, postal_code));
                    }
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::Counts => {
            let mut store = open_store(&database)?;
            let counts = store.count_by_country()?;
            store.close()?;

            if cli.json {
                let sorted: BTreeMap<_, _> = counts.into_iter().collect();
                println!("{}", serde_json::to_string_pretty(&sorted)?);
            } else if counts.is_empty() {
                ui::not_found("No postal codes stored yet.");
            } else {
                ui::header(Icons::STATS, "Postal codes by country");
                println!("{}", ui::counts_table(&counts));
            }
        }

        Commands::Stats => {
            let mut store = open_store(&database)?;
            let stats = store.stats()?;
            store.close()?;

            if cli.json {
                let data = serde_json::json!({
                    "path": stats.path.display().to_string(),
                    "initialized": !stats.first_use,
                    "indexed": stats.indexed,
                    "rows": stats.rows,
                    "countries": stats.countries,
                });
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                let path = stats.path.display().to_string();
                let initialized = (!stats.first_use).to_string();
                let indexed = stats.indexed.to_string();
                let rows = stats.rows.to_string();
                let countries = stats.countries.to_string();

                ui::header(Icons::DATABASE, &format!("locdb statistics ({})", ui::dim(&path)));
                println!(
                    "{}",
                    ui::stats_table(&[
                        ("Initialized", initialized.as_str()),
                        ("Postal code index", indexed.as_str()),
                        ("Postal codes", rows.as_str()),
                        ("Countries", countries.as_str()),
                    ])
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_store(database: &Path) -> anyhow::Result<LocationStore> {
    let span = tracing::info_span!("store", db = %database.display());
    let mut store = LocationStore::with_span(span);
    store
        .connect(database)
        .with_context(|| format!("Failed to open database {}", database.display()))?;
    Ok(store)
}
