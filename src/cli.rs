//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::{map_error, GENERATION_FAILED_MESSAGE};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_angles, format_config, format_generate_json, format_generate_text,
    format_progress_line,
};
pub use route::RunContext;
