//! nodematch CLI - rule-driven node enrichment.

mod commands;
mod display;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nodematch")]
#[command(about = "Add attributes and tags to nodes whose attributes match a set of rules", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Apply the configured enhancers to a JSON node file
    ///
    /// Examples:
    ///   nodematch apply nodes.json
    ///   nodematch apply --config ops.toml nodes.json --output json
    Apply {
        /// JSON array of nodes: [{"name": ..., "attributes": {...}, "tags": [...]}]
        nodes: PathBuf,

        /// Configuration file path
        #[arg(long, default_value = nodematch_config::ConfigLoader::DEFAULT_FILE_NAME)]
        config: PathBuf,

        /// Project name passed to enhancers
        #[arg(long, default_value = "default")]
        project: String,

        /// Output format
        #[arg(short, long = "output", value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Evaluate rules against ad-hoc attributes
    ///
    /// Examples:
    ///   nodematch check --rules 'env==prod' --attr env=prod
    ///   nodematch check --rules @rules.txt --attr region=eu-west-1 --add 'dc=${region}' --substitute
    Check(commands::CheckArgs),

    /// Load, validate and compile a configuration file
    Validate {
        /// Configuration file path
        #[arg(long, default_value = nodematch_config::ConfigLoader::DEFAULT_FILE_NAME)]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Apply {
            nodes,
            config,
            project,
            format,
        } => commands::run_apply(&nodes, &config, &project, format),
        Command::Check(args) => commands::run_check(args),
        Command::Validate { config } => commands::run_validate(&config),
    }
}
