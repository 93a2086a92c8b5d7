//! CLI parse: clap types for angleshot. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// angleshot - re-render one photo from several camera angles
#[derive(Parser)]
#[command(name = "angleshot")]
#[command(about = "Re-render one photo from several camera angles with a generative image model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config/ lookup and default output location)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate re-rendered variants of a photo
    Generate {
        /// Source photo (JPG or PNG, at most 10MB)
        image: PathBuf,
        /// Number of variants (1-10); defaults to generation.default_count
        #[arg(long, short = 'n')]
        count: Option<usize>,
        /// Output directory for generated images
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Do not write images to disk
        #[arg(long)]
        no_save: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the camera angle catalog
    Angles {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the effective configuration (API key masked)
    Config {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}
