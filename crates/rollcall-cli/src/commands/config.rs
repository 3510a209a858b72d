use rollcall_core::config::{load_config, validate_config, PipelineConfig};
use rollcall_core::error::RollcallError;
use std::path::PathBuf;

use crate::output;

pub fn run(config_file: Option<PathBuf>) -> Result<bool, RollcallError> {
    let config = match config_file {
        Some(ref path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    validate_config(&config)?;
    output::json::print(&config)?;
    Ok(true)
}
