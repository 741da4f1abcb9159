mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::history::HistoryKind;
use commands::validate::ValidateOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "srsv")]
#[command(version, about = "SRS rule-sheet validator CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate data sheets against an SRS rule workbook
    Validate {
        /// Path to the SRS rule file (CSV, Excel/ODS, YAML, TOML or a directory of CSV files)
        srs: String,

        /// Path to the data file (CSV, Excel/ODS workbook or a directory of CSV files)
        data: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Ask the model to explain failed validations
        #[arg(long)]
        explain: bool,

        /// Ask the model to summarize every data sheet
        #[arg(long)]
        summarize: bool,

        /// History directory (overrides the config file)
        #[arg(long, conflicts_with = "no_store")]
        store: Option<String>,

        /// Do not record the run
        #[arg(long)]
        no_store: bool,

        /// Sheet name similarity cutoff between 0 and 1
        #[arg(long)]
        cutoff: Option<f64>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Check SRS rule sheets without validating data
    Check {
        /// Path to the SRS rule file
        srs: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show recorded uploads, validation results or model responses
    History {
        /// What to list
        #[arg(short, long, value_enum, default_value = "files")]
        kind: HistoryKind,

        /// Only show records for this upload id
        #[arg(long)]
        file_id: Option<String>,

        /// Maximum number of records
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// History directory (overrides the config file)
        #[arg(long)]
        store: Option<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Write the stored content of the --file-id upload to stdout
        #[arg(long, requires = "file_id")]
        dump: bool,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logs go to stderr so JSON reports on stdout stay parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Validate {
            srs,
            data,
            format,
            explain,
            summarize,
            store,
            no_store,
            cutoff,
            config,
        } => {
            commands::validate::execute(ValidateOptions {
                srs_path: &srs,
                data_path: &data,
                format: &format,
                explain,
                summarize,
                store_dir: store.as_deref(),
                no_store,
                cutoff,
                config_path: config.as_deref(),
            })
            .await
        }

        Commands::Check { srs, format } => commands::check::execute(&srs, &format),

        Commands::History {
            kind,
            file_id,
            limit,
            store,
            format,
            dump,
            config,
        } => commands::history::execute(
            kind,
            file_id.as_deref(),
            limit,
            store.as_deref(),
            &format,
            dump,
            config.as_deref(),
        ),
    }
}
