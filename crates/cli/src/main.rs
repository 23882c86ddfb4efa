mod classify;
mod replay;
mod validate;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// MulmoScript validation and edit-history toolkit.
#[derive(Parser)]
#[command(
    name = "mulmo",
    version,
    about = "MulmoScript validation and edit-history toolkit"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Log diagnostics (unrouted issues, history moves) to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a script against the MulmoScript schema
    Validate {
        /// Path to the script JSON file
        script: PathBuf,
    },

    /// Classify an exported validation issue list into editor messages
    Classify {
        /// Path to a JSON array of issues, or an object with an `issues` array
        issues: PathBuf,
    },

    /// Replay edits, undos and redos against a script
    History {
        /// Path to the initial script JSON file
        script: PathBuf,
        /// Path to the JSON array of operations to replay
        #[arg(long)]
        ops: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Validate { script } => {
            validate::cmd_validate(&script, cli.output, cli.quiet);
        }
        Commands::Classify { issues } => {
            classify::cmd_classify(&issues, cli.output, cli.quiet);
        }
        Commands::History { script, ops } => {
            replay::cmd_history(&script, &ops, cli.output, cli.quiet);
        }
    }
}

/// `RUST_LOG` takes precedence; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}

pub(crate) fn to_pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("serialization error: {}", e))
}
