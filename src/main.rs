//! ipflag: public IP country monitor
//!
//! Entry point for the ipflag application.

use ipflag::config::{Cli, Command, ConfigError, ValidatedConfig, field, write_default_config};
use ipflag::status::{FileStatusStore, StatusStore};
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand
    if let Some(Command::Init { output }) = &cli.command {
        return handle_init(output);
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);

    if cli.is_status() {
        return handle_status(&config);
    }

    tracing::info!("{config}");

    run_application(config)
}

/// Handles the `init` subcommand.
fn handle_init(output: &std::path::Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Configuration template written to: {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Handles the `status` subcommand.
fn handle_status(config: &ValidatedConfig) -> ExitCode {
    let Some(ref path) = config.status_file else {
        let e = ConfigError::missing(
            field::STATUS_FILE,
            "Use --status-file or set monitor.status_file in config file",
        );
        eprintln!("Configuration error: {e}");
        print_config_hint(&e);
        return exit_code::CONFIG_ERROR;
    };

    let (text, readable) = run::render_status(FileStatusStore::new(path).load());
    println!("{text}");

    if readable {
        exit_code::SUCCESS
    } else {
        exit_code::runtime_error()
    }
}

/// Runs the main application with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(config: ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(config)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("Application error: {e}");
            exit_code::runtime_error()
        }
    }
}
