//! Command-line interface to fetch, extract, and analyze the national
//! COVID-19 open dataset.

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use covid19mx::analysis::{CaseFilter, EvolutionSeries};
use covid19mx::catalog;
use covid19mx::config::Config;
use covid19mx::download::DEFAULT_CHUNK_SIZE;
use covid19mx::output::{self, OutputFormat};
use covid19mx::sources::SourceDataHandler;

/// Evolution of the COVID-19 pandemic in Mexico.
#[derive(Parser)]
#[command(name = "covid19mx")]
#[command(about = "Evolution of the COVID-19 pandemic in Mexico", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "COVID19MX_CONFIG")]
    config: Option<PathBuf>,

    /// Directory where data is downloaded and extracted
    #[arg(short, long, env = "COVID19MX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Download the case dataset and data dictionary archives
    Fetch {
        /// Do not download the data dictionary archive
        #[arg(long)]
        skip_dictionary: bool,

        /// Size in bytes of each downloaded part
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,
    },

    /// Extract the downloaded archives into the data directory
    Extract,

    /// Compute the evolution time series from the extracted dataset
    Analyze {
        /// Path of the extracted case CSV (defaults to searching the data
        /// directory)
        csv: Option<PathBuf>,

        /// Federal entity code of residence (see `states`)
        #[arg(long)]
        state: Option<u32>,

        /// First symptom-onset date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last symptom-onset date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,

        /// Only print the last N days of the series
        #[arg(long)]
        tail: Option<usize>,
    },

    /// List the federal entity catalog
    States,

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command {
        Commands::Fetch {
            skip_dictionary,
            chunk_size,
        } => fetch(config, skip_dictionary, chunk_size).await,
        Commands::Extract => extract(config),
        Commands::Analyze {
            csv,
            state,
            from,
            to,
            output,
            tail,
        } => analyze(config, csv, CaseFilter { state, from, to }, output, tail),
        Commands::States => {
            list_states();
            Ok(())
        }
        Commands::Config => {
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

async fn fetch(config: Config, skip_dictionary: bool, chunk_size: usize) -> anyhow::Result<()> {
    let data_dir = config.data_dir.clone();
    let handler = SourceDataHandler::new(config, &data_dir);

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})")?
            .progress_chars("##-"),
    );
    let written = handler
        .download_covid_data(chunk_size, |chunk| {
            if chunk.file_size > 0 && progress.length() != Some(chunk.file_size) {
                progress.set_length(chunk.file_size);
            }
            progress.inc(chunk.chunk_size as u64);
        })
        .await
        .context("downloading the case archive")?;
    progress.finish_and_clear();
    output::print_success(&format!(
        "downloaded {written} bytes to {}",
        handler.zipped_covid_data_file().display()
    ));

    if !skip_dictionary {
        let written = handler
            .download_data_dictionary()
            .await
            .context("downloading the dictionary archive")?;
        output::print_success(&format!(
            "downloaded {written} bytes to {}",
            handler.zipped_data_dictionary_file().display()
        ));
    }
    Ok(())
}

fn extract(config: Config) -> anyhow::Result<()> {
    let data_dir = config.data_dir.clone();
    let mut handler = SourceDataHandler::new(config, &data_dir);

    let case_file = handler
        .extract_covid_data()
        .context("extracting the case archive")?
        .to_path_buf();
    output::print_success(&format!("extracted {}", case_file.display()));

    if handler.zipped_data_dictionary_file().exists() {
        let files = handler
            .extract_data_dictionary()
            .context("extracting the dictionary archive")?;
        output::print_success(&format!("extracted {} dictionary files", files.len()));
    } else {
        output::print_error("no dictionary archive found; run `covid19mx fetch` first");
    }
    Ok(())
}

fn analyze(
    config: Config,
    csv: Option<PathBuf>,
    filter: CaseFilter,
    format: OutputFormat,
    tail: Option<usize>,
) -> anyhow::Result<()> {
    if let Some(code) = filter.state {
        if !catalog::is_state(code) {
            bail!("unknown state code {code}; run `covid19mx states` for the catalog");
        }
        if let Some(name) = catalog::entity_name(code) {
            println!("{name}");
        }
    }

    let csv_path = match csv {
        Some(path) => path,
        None => {
            let data_dir = config.data_dir.clone();
            SourceDataHandler::new(config, &data_dir).find_covid_data_file()?
        }
    };

    let series = EvolutionSeries::from_csv_path(&csv_path, &filter)
        .with_context(|| format!("reading the case dataset at {}", csv_path.display()))?;
    output::print_series(&series, format, tail)?;
    output::print_summary(&series);
    Ok(())
}

fn list_states() {
    let mut entries: Vec<_> = catalog::ENTIDADES.iter().collect();
    entries.sort_by_key(|(code, _)| **code);
    for (code, name) in entries {
        println!("{code:>3}  {name}");
    }
}
