use crate::error::RollcallError;
use crate::extraction::table::find_tables;
use crate::extraction::PdfTableOracle;
use crate::model::RawTable;
use std::path::Path;
use std::process::Command;

/// PDF table backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` to preserve whitespace alignment of tables.
pub struct PdftotextTables;

impl PdftotextTables {
    pub fn new() -> Self {
        PdftotextTables
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextTables {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfTableOracle for PdftotextTables {
    fn extract_tables(&self, path: &Path) -> Result<Vec<RawTable>, RollcallError> {
        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(path)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RollcallError::ToolNotFound {
                        tool: "pdftotext",
                        package: "poppler-utils",
                    }
                } else {
                    RollcallError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(RollcallError::ToolFailed {
                tool: "pdftotext",
                code,
                stderr,
            });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(find_tables(&split_pages(&text)))
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split pdftotext output into pages (form feed \x0c is the page separator).
fn split_pages(text: &str) -> Vec<Vec<String>> {
    text.split('\x0c')
        .map(|page| page.lines().map(|l| l.to_string()).collect::<Vec<_>>())
        .filter(|lines| !lines.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_split_pages() {
        let text = "Name  Math\nAlice  75%\n\x0cName  Math\nBob  85%\n\x0c";
        let pages = split_pages(text);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1], vec!["Name  Math".to_string(), "Bob  85%".to_string()]);
    }

    #[test]
    fn test_layout_text_to_tables() {
        let text = "Class 3B\n\n  Name     Math\n  Alice    75%\n\x0c  Bob      85%\n";
        let tables = find_tables(&split_pages(text));
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows.len(), 2);
        assert_eq!(tables[1].rows[0][0], CellValue::text("Bob"));
    }
}
