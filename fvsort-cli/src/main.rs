//! fvsort command-line entry point

use anyhow::Result;
use clap::Parser;
use fvsort_cli::commands::Commands;

/// Sort dictionary entries by a site's custom alphabet
#[derive(Debug, Parser)]
#[command(name = "fvsort", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress progress output and logging
    #[arg(short, long, global = true)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    log::debug!("Arguments: {:?}", cli);
    cli.command.execute(cli.quiet)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}
