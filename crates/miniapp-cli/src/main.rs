//! Mini-program page builder CLI.

use std::io::{self, IsTerminal};

use clap::Parser;

mod cli;
mod commands;
mod logging;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{run_generate, run_palette};
use crate::logging::{init_logging, LogConfig, LogFormat};

fn main() {
    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli));

    let exit_code = match &cli.command {
        Command::Generate(args) => match run_generate(args) {
            Ok(summary) => {
                let verb = if args.dry_run { "would write" } else { "wrote" };
                println!("{} pages, {verb} {} files:", summary.pages, summary.written.len());
                for path in &summary.written {
                    println!("  {}", path.display());
                }
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Palette => match run_palette() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        with_ansi: io::stderr().is_terminal(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        ..LogConfig::default()
    }
}
