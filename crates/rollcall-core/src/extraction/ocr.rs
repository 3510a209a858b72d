use crate::error::RollcallError;
use crate::extraction::OcrOracle;
use crate::model::{CellValue, RawTable};
use std::path::Path;
use std::process::Command;

/// OCR backend using the tesseract command-line tool.
pub struct TesseractOcr;

impl TesseractOcr {
    pub fn new() -> Self {
        TesseractOcr
    }

    /// Check if tesseract is available on the system.
    pub fn is_available() -> bool {
        Command::new("tesseract")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrOracle for TesseractOcr {
    fn image_to_text(&self, path: &Path) -> Result<String, RollcallError> {
        let output = Command::new("tesseract")
            .arg(path)
            .arg("stdout")
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RollcallError::ToolNotFound {
                        tool: "tesseract",
                        package: "tesseract-ocr",
                    }
                } else {
                    RollcallError::Extraction(format!("tesseract failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(RollcallError::ToolFailed {
                tool: "tesseract",
                code,
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn backend_name(&self) -> &str {
        "tesseract"
    }
}

/// Approximate a table from OCR text: one row per non-blank line, one cell
/// per whitespace-separated token. Rows may differ in length.
pub fn tokenize_text(text: &str) -> RawTable {
    let rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().map(CellValue::text).collect())
        .collect();
    RawTable::new(rows)
}
