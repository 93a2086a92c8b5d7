//! CLI command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string recorded on command log events (e.g. "generate", "angles").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Generate { .. } => "generate",
        Commands::Angles { .. } => "angles",
        Commands::Config { .. } => "config",
    }
}
