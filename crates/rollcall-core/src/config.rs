use crate::error::RollcallError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SHEET_NAME: &str = "Combined_Data";
pub const DEFAULT_STAGING_PATH: &str = "output_combined.xlsx";
pub const DEFAULT_OUTPUT_PATH: &str = "output_highlighted_with_chart.xlsx";
/// Rows 1-3 are reserved above the header by convention of the source layout.
pub const DEFAULT_HEADER_ROW: u32 = 4;
pub const DEFAULT_NAME_COLUMN: u16 = 1;
/// Rows strictly below this percentage are flagged.
pub const DEFAULT_THRESHOLD: f64 = 80.0;
/// Solid yellow.
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "FFFF00";
pub const DEFAULT_CHART_OFFSET_COLUMNS: u16 = 3;
pub const DEFAULT_CHART_OFFSET_ROWS: u32 = 5;
/// Last addressable row and column of an xlsx worksheet, 1-based.
pub const MAX_ROW: u32 = 1_048_576;
pub const MAX_COLUMN: u16 = 16_384;

/// Everything a pipeline run needs besides its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Where uploads are saved. A temporary directory is used when unset.
    pub upload_dir: Option<PathBuf>,
    pub staging_path: PathBuf,
    pub output_path: PathBuf,
    pub sheet_name: String,
    /// 1-based row holding the column labels.
    pub header_row: u32,
    /// 1-based column holding student names.
    pub name_column: u16,
    pub threshold: f64,
    /// Six hex digits, RRGGBB.
    pub highlight_color: String,
    pub chart_offset_columns: u16,
    pub chart_offset_rows: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            upload_dir: None,
            staging_path: PathBuf::from(DEFAULT_STAGING_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            header_row: DEFAULT_HEADER_ROW,
            name_column: DEFAULT_NAME_COLUMN,
            threshold: DEFAULT_THRESHOLD,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            chart_offset_columns: DEFAULT_CHART_OFFSET_COLUMNS,
            chart_offset_rows: DEFAULT_CHART_OFFSET_ROWS,
        }
    }
}

impl PipelineConfig {
    /// Default config with both artifacts placed inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        PipelineConfig {
            staging_path: dir.join(DEFAULT_STAGING_PATH),
            output_path: dir.join(DEFAULT_OUTPUT_PATH),
            ..Default::default()
        }
    }

    /// Highlight color as a 24-bit RGB value.
    pub fn highlight_rgb(&self) -> Result<u32, RollcallError> {
        parse_hex_color(&self.highlight_color)
    }
}

/// Load a config from a JSON file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<PipelineConfig, RollcallError> {
    let content = std::fs::read_to_string(path).map_err(|e| RollcallError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse a config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<PipelineConfig, RollcallError> {
    let config: PipelineConfig =
        serde_json::from_str(json).map_err(|e| RollcallError::ConfigLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that a config is usable.
pub fn validate_config(config: &PipelineConfig) -> Result<(), RollcallError> {
    if !(1..=MAX_ROW).contains(&config.header_row) {
        return Err(RollcallError::ConfigInvalid(format!(
            "header_row must be between 1 and {MAX_ROW}, got {}",
            config.header_row
        )));
    }
    if !(1..=MAX_COLUMN).contains(&config.name_column) {
        return Err(RollcallError::ConfigInvalid(format!(
            "name_column must be between 1 and {MAX_COLUMN}, got {}",
            config.name_column
        )));
    }
    // The subject column is at least 1, so any larger offset leaves the sheet
    if config.chart_offset_columns >= MAX_COLUMN {
        return Err(RollcallError::ConfigInvalid(format!(
            "chart_offset_columns must be below {MAX_COLUMN}, got {}",
            config.chart_offset_columns
        )));
    }
    if config
        .header_row
        .checked_add(config.chart_offset_rows)
        .map_or(true, |row| row > MAX_ROW)
    {
        return Err(RollcallError::ConfigInvalid(format!(
            "chart_offset_rows {} places the chart below row {MAX_ROW}",
            config.chart_offset_rows
        )));
    }
    if !config.threshold.is_finite() {
        return Err(RollcallError::ConfigInvalid(format!(
            "threshold must be a finite number, got {}",
            config.threshold
        )));
    }
    if config.sheet_name.trim().is_empty() {
        return Err(RollcallError::ConfigInvalid(
            "sheet_name must not be empty".into(),
        ));
    }
    if config.staging_path == config.output_path {
        return Err(RollcallError::ConfigInvalid(
            "staging_path and output_path must differ".into(),
        ));
    }
    parse_hex_color(&config.highlight_color)?;
    Ok(())
}

fn parse_hex_color(s: &str) -> Result<u32, RollcallError> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(RollcallError::ConfigInvalid(format!(
            "highlight_color '{s}' is not a RRGGBB hex color"
        )));
    }
    u32::from_str_radix(hex, 16)
        .map_err(|e| RollcallError::ConfigInvalid(format!("highlight_color '{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PipelineConfig::default();
        validate_config(&config).unwrap();
        assert_eq!(config.highlight_rgb().unwrap(), 0xFFFF00);
        assert_eq!(config.header_row, 4);
        assert_eq!(config.threshold, 80.0);
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config = parse_config(r#"{"threshold": 75.5}"#, Path::new("test.json")).unwrap();
        assert_eq!(config.threshold, 75.5);
        assert_eq!(config.sheet_name, "Combined_Data");
        assert_eq!(config.name_column, 1);
    }

    #[test]
    fn zero_header_row_rejected() {
        let err = parse_config(r#"{"header_row": 0}"#, Path::new("test.json")).unwrap_err();
        assert!(matches!(err, RollcallError::ConfigInvalid(_)));
    }

    #[test]
    fn chart_offsets_must_stay_on_the_sheet() {
        let err = parse_config(r#"{"chart_offset_columns": 65535}"#, Path::new("test.json"))
            .unwrap_err();
        assert!(matches!(err, RollcallError::ConfigInvalid(_)));

        let err = parse_config(r#"{"chart_offset_rows": 4294967295}"#, Path::new("test.json"))
            .unwrap_err();
        assert!(matches!(err, RollcallError::ConfigInvalid(_)));

        let edge = PipelineConfig {
            header_row: MAX_ROW - 5,
            chart_offset_rows: 5,
            chart_offset_columns: MAX_COLUMN - 1,
            ..Default::default()
        };
        validate_config(&edge).unwrap();
    }

    #[test]
    fn bad_color_rejected() {
        let config = PipelineConfig {
            highlight_color: "yellow".into(),
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn hash_prefixed_color_accepted() {
        assert_eq!(parse_hex_color("#00FF00").unwrap(), 0x00FF00);
    }

    #[test]
    fn malformed_json_is_load_error() {
        let err = parse_config("{", Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, RollcallError::ConfigLoad { .. }));
    }
}
