use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use opsnotes_bedrock::BedrockConfig;

/// Command line of the `opsnotes` binary.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract a structured record from ops notes
    Analyze(AnalyzeArgs),
    /// Print the JSON Schema of the output record
    Schema {
        /// Pretty-print the schema
        #[arg(long)]
        pretty: bool,
    },
}

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

/// Arguments of `opsnotes analyze`.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Read notes from this file instead of stdin
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Pretty-print the output record
    #[arg(long)]
    pub pretty: bool,

    /// Log attempt history and metrics after the run
    #[arg(long)]
    pub report: bool,

    /// AWS region (overrides AWS_REGION)
    #[arg(long)]
    pub region: Option<String>,

    /// Bedrock model id (overrides NOVA_MODEL_ID)
    #[arg(long)]
    pub model_id: Option<String>,

    /// Bedrock Runtime base URL (overrides BEDROCK_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,
}

impl AnalyzeArgs {
    /// Environment configuration with command-line overrides applied.
    #[must_use]
    pub fn bedrock_config(&self, base: BedrockConfig) -> BedrockConfig {
        let mut config = base;
        if let Some(region) = &self.region {
            config = config.with_region(region.clone());
        }
        if let Some(model_id) = &self.model_id {
            config = config.with_model_id(model_id.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        config
    }
}
