mod commands;

use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, LevelFilter};

/// Output format for error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// MSON to Refract converter and JSON Schema generator.
#[derive(Debug, Parser)]
#[command(
    name = "refract",
    version,
    about = "MSON to Refract converter and JSON Schema generator"
)]
struct Cli {
    /// Error output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Print JSON on a single line instead of pretty-printing it
    #[arg(long, global = true)]
    compact: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert an MSON data structure (JSON AST) to Refract
    Refract {
        /// Path to the MSON data structure JSON file
        file: PathBuf,
    },

    /// Render a serialized Refract element as JSON Schema
    Schema {
        /// Path to the Refract element JSON file
        file: PathBuf,
    },

    /// Convert an MSON data structure and render it as JSON Schema
    ConvertSchema {
        /// Path to the MSON data structure JSON file
        file: PathBuf,
    },

    /// Serialize a blueprint (JSON AST) as the legacy AST document
    Ast {
        /// Path to the blueprint JSON file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            cli.log_level
        );
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!(command:? = cli.command; "Parsed arguments");

    let result = match &cli.command {
        Commands::Refract { file } => commands::refract::cmd_refract(file),
        Commands::Schema { file } => commands::schema::cmd_schema(file),
        Commands::ConvertSchema { file } => commands::schema::cmd_convert_schema(file),
        Commands::Ast { file } => commands::ast::cmd_ast(file),
    };

    match result {
        Ok(document) => print_json(&document, cli.compact),
        Err(msg) => {
            report_error(&msg, cli.output);
            process::exit(1);
        }
    }
}

fn print_json(document: &serde_json::Value, compact: bool) {
    let text = if compact {
        serde_json::to_string(document)
    } else {
        serde_json::to_string_pretty(document)
    };
    println!(
        "{}",
        text.unwrap_or_else(|e| format!("serialization error: {}", e))
    );
}

/// Read and parse a JSON input file.
pub(crate) fn load_json(path: &Path) -> Result<serde_json::Value, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("error reading file '{}': {}", path.display(), e))?;
    serde_json::from_str(&text)
        .map_err(|e| format!("error parsing JSON in '{}': {}", path.display(), e))
}

pub(crate) fn report_error(msg: &str, output: OutputFormat) {
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
