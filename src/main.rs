mod convert;
mod error;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use icsfix_core::{ConvertMode, FixerConfig};
use tracing::debug;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "icsfix")]
#[command(version, about = "Rewrite UTC event times in a calendar export as America/New_York local time")]
struct Cli {
    /// Calendar export to read
    input: PathBuf,

    /// Where to write the converted calendar (must end in .ics)
    output: PathBuf,

    /// How to convert times (defaults to the configured mode)
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Timezone profile to convert into (e.g. "America/New_York")
    #[arg(long)]
    zone: Option<String>,

    /// Log each converted event to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Month-of-stamp offset, hour wraps without changing the date
    Compatible,
    /// Real UTC to local conversion, including date changes
    Exact,
}

impl From<Mode> for ConvertMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Compatible => ConvertMode::Compatible,
            Mode::Exact => ConvertMode::Exact,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CliError>() {
                Some(cli_err) => eprintln!("Error: {cli_err}"),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::from(error::exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let source = convert::open(&cli.input, &cli.output)?;

    let mut config = FixerConfig::load()?;
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if let Some(zone) = cli.zone {
        config.zone = zone;
    }

    logging::init(&config.log_level, cli.verbose);
    debug!(?config, "Configuration loaded");

    let zone = config.zone_profile()?;
    convert::run(source, &cli.input, &cli.output, zone, config.mode)?;

    println!("Converted calendar written to {}", cli.output.display());
    Ok(())
}
