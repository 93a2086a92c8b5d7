//! Integration tests for angleshot

mod angle_selection;
mod cli_generate;
mod fan_out;
mod test_utils;
