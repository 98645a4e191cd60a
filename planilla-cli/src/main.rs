use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use planilla_core::Formation;

mod commands;
mod config;
mod error;
mod lineup_file;

use config::Config;
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "planilla")]
#[command(about = "Planilla - match-day lineup sheets")]
#[command(version)]
#[command(long_about = "
Planilla lays out a starting eleven on a pitch for a chosen formation and
exports the printable lineup sheet as PNG, PDF or SVG.

Examples:
  planilla init --out lineup.toml
  planilla export --lineup lineup.toml --format all --out-dir out/
  planilla export --lineup lineup.json --formation 4-3-3
  planilla layout --lineup lineup.toml --formation 3-5-2
  planilla formations
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export the lineup sheet to PNG/PDF/SVG
    Export {
        /// Lineup file (.toml or .json)
        #[arg(long, required = true)]
        lineup: PathBuf,

        /// Output format (defaults to [output].formats from the configuration)
        #[arg(long)]
        format: Option<FormatArg>,

        /// Override the lineup's formation (e.g. 4-3-3)
        #[arg(long)]
        formation: Option<Formation>,

        /// Output directory (defaults to [output].dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Print the starters with their positions for the formation as JSON
    Layout {
        /// Lineup file (.toml or .json)
        #[arg(long, required = true)]
        lineup: PathBuf,

        /// Override the lineup's formation
        #[arg(long)]
        formation: Option<Formation>,
    },

    /// List the available formations and their positions
    Formations,

    /// Write a starting lineup file
    Init {
        /// Output file (.toml or .json)
        #[arg(short, long, default_value = "lineup.toml")]
        out: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show or write configuration
    Config {
        /// Print an example configuration
        #[arg(long)]
        example: bool,

        /// Write the example configuration to this file instead of printing it
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Png,
    Pdf,
    Svg,
    All,
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Export { lineup, format, formation, out_dir } => {
            commands::export::execute(&config, lineup, format, formation, out_dir).await?;
        }

        Commands::Layout { lineup, formation } => {
            commands::layout::execute(lineup, formation)?;
        }

        Commands::Formations => commands::formations::execute(),

        Commands::Init { out, force } => {
            commands::init::execute(&out, force)?;
        }

        Commands::Config { example, out } => match out {
            Some(path) => {
                Config::default().save_to_file(&path)?;
                println!("Wrote example configuration to {}", path.display());
            }
            None if example => print!("{}", Config::example_toml()?),
            None => print!("{}", toml::to_string_pretty(&config).map_err(CliError::from)?),
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet)?;

    if let Err(err) = run(cli).await {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            print_error_and_exit(cli_err);
        }
        return Err(err);
    }

    Ok(())
}
