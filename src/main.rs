use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use glasstock::config::DEFAULT_CONFIG_FILE;
use glasstock::telemetry;

mod cli;

/// Glass-stock inventory
///
/// Keeps the shop's glass stock in a worksheet (one CSV file per worksheet
/// in the configured data directory). Every row has a stable id, so edits,
/// imports, and deletes always hit the right record no matter how the grid
/// is sorted or filtered.
///
/// QUICK START:
///
///   glasstock import levering.csv       # append rows from a CSV file
///   glasstock list --search float       # show matching rows
///   glasstock set 3fa9c2 Quantity=4     # edit a record by id prefix
///   glasstock delete 3fa9c2 71be04      # delete after confirmation
///
/// CONFIGURATION:
///
///   glasstock.toml in the current directory (or --config):
///
///   [store]
///   backend = "csv-dir"        # or "memory"
///   path = "data"
///   worksheet = "Blad1"
///   cache_ttl_seconds = 0      # 0 = cache until the next write
///
///   [access]
///   password = "..."           # optional shared password
///
/// Set GLASSTOCK_PASSWORD to skip the password prompt. Set GLASSTOCK_LOG
/// (e.g. info, debug) for diagnostics on stderr, and GLASSTOCK_LOG_FORMAT=json
/// for JSON log lines.
#[derive(Parser)]
#[command(name = "glasstock")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(
    after_help = "See 'glasstock <command> --help' for more information on a specific command."
)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, env = "GLASSTOCK_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: cli::InventoryCommands,
}

fn main() -> ExitCode {
    telemetry::init();
    let cli = Cli::parse();

    match cli::run(cli.command, &cli.config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
