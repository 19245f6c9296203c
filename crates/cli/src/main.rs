#![forbid(unsafe_code)]

use clap::error::ErrorKind;
use std::io::IsTerminal;
use std::process::ExitCode;
use tlr_cli::error::USAGE_EXIT_CODE;
use tlr_cli::{CliArgs, ReplaceConfig, RunError, USAGE, logging, run};

fn main() -> ExitCode {
    let args = match CliArgs::try_parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(USAGE_EXIT_CODE),
            };
        }
    };

    let config = match ReplaceConfig::from_args(args) {
        Ok(config) => config,
        Err(missing) => {
            let err = RunError::Usage(missing.to_string());
            eprintln!("{err}");
            eprintln!("Usage");
            eprintln!("{USAGE}");
            return ExitCode::from(err.exit_code());
        }
    };

    logging::init_logging(config.log_filter.as_deref());
    if !config.color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    match run(&config, &mut stdin.lock(), &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(kind = err.kind(), error = %err, "run failed");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
