//! SQWRL command-line interface

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqwrl_cli::output::{
    builtin_listing, format_builtins, format_error, format_json, format_report, setup_colors,
};
use sqwrl_cli::{ColorMode, OutputFormat, Script, ScriptRunner};
use sqwrl_temporal::{DatetimeStringProcessor, Granularity};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// SQWRL command-line tool
#[derive(Parser)]
#[command(name = "sqwrl")]
#[command(author, version, about = "SQWRL collection engine tools", long_about = None)]
struct Cli {
    /// Log engine activity (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Colored output
    #[arg(long, global = true, value_enum, default_value = "auto")]
    color: ColorMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a JSON script of built-in invocations
    Run {
        /// Script file
        script: PathBuf,
    },
    /// List the SQWRL built-ins
    Builtins,
    /// Normalize a partial datetime string
    Normalize {
        /// Datetime, possibly partial (e.g. 1988-02)
        datetime: String,
        /// Granularity to strip to
        #[arg(short, long, default_value = "milliseconds")]
        granularity: Granularity,
        /// Pad to the latest instant instead of the earliest
        #[arg(long)]
        round_up: bool,
        /// Use the JDBC layout (space between date and time)
        #[arg(long)]
        jdbc: bool,
    },
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();
    init_logging(cli.verbose);
    setup_colors(cli.color);

    if let Err(error) = execute(cli) {
        eprintln!("{}", format_error(&error));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run { script } => {
            let script = Script::from_path(&script)?;
            let report = ScriptRunner::new().run(&script)?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_json(&report)?),
                OutputFormat::Table => print!("{}", format_report(&report)),
            }
        }
        Commands::Builtins => {
            let listing = builtin_listing();
            match cli.format {
                OutputFormat::Json => println!("{}", format_json(&listing)?),
                OutputFormat::Table => print!("{}", format_builtins(&listing)),
            }
        }
        Commands::Normalize {
            datetime,
            granularity,
            round_up,
            jdbc,
        } => {
            let processor = if jdbc {
                DatetimeStringProcessor::jdbc()
            } else {
                DatetimeStringProcessor::xsd()
            };
            let normalized = processor
                .normalize(&datetime, granularity, round_up)
                .with_context(|| format!("Cannot normalize {}", datetime))?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_json(&normalized)?),
                OutputFormat::Table => println!("{}", normalized),
            }
        }
    }
    Ok(())
}
