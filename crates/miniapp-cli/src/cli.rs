//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Parser)]
#[command(
    name = "miniapp",
    version,
    about = "Generate uni-app mini-program sources from page builder projects"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the source bundle for an exported project file.
    Generate(GenerateArgs),

    /// List the built-in component palette.
    Palette,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Exported project JSON.
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,

    /// Output directory (created if missing).
    #[arg(long = "out", short = 'o', value_name = "DIR", default_value = "dist")]
    pub out: PathBuf,

    /// Path template for page files, e.g. `src/{{path}}.vue`.
    #[arg(long = "page-path", value_name = "TEMPLATE")]
    pub page_path: Option<String>,

    /// Print the paths that would be written without writing them.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
