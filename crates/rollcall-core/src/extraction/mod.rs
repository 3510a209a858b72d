pub mod ocr;
pub mod pdftotext;
pub mod table;
pub mod xlsx;

use crate::error::RollcallError;
use crate::model::{CombinedTable, RawTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Input format, chosen from the declared extension only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Pdf,
    Image,
    Spreadsheet,
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Option<FileKind> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "jpeg" | "jpg" | "png" => Some(FileKind::Image),
            "xlsx" => Some(FileKind::Spreadsheet),
            _ => None,
        }
    }

    /// Resolve from the extension of a path's final component, such as `report.PDF`.
    ///
    /// Names without an extension have no kind, including dotfiles like `.xlsx`.
    pub fn from_path(path: &Path) -> Option<FileKind> {
        FileKind::from_extension(path.extension()?.to_str()?)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Pdf => write!(f, "pdf"),
            FileKind::Image => write!(f, "image"),
            FileKind::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

/// Backend that finds tables on every page of a PDF.
pub trait PdfTableOracle: Send + Sync {
    fn extract_tables(&self, path: &Path) -> Result<Vec<RawTable>, RollcallError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Backend that turns an image into plain text.
pub trait OcrOracle: Send + Sync {
    fn image_to_text(&self, path: &Path) -> Result<String, RollcallError>;

    fn backend_name(&self) -> &str;
}

/// Backend that reads every sheet of a workbook, in sheet order.
pub trait SpreadsheetOracle: Send + Sync {
    fn read_sheets(&self, path: &Path) -> Result<Vec<RawTable>, RollcallError>;

    fn backend_name(&self) -> &str;
}

/// One extractor per supported format. Exactly one runs per file.
pub struct Extractors {
    pdf: Box<dyn PdfTableOracle>,
    ocr: Box<dyn OcrOracle>,
    spreadsheet: Box<dyn SpreadsheetOracle>,
}

impl Extractors {
    pub fn new(
        pdf: Box<dyn PdfTableOracle>,
        ocr: Box<dyn OcrOracle>,
        spreadsheet: Box<dyn SpreadsheetOracle>,
    ) -> Self {
        Extractors {
            pdf,
            ocr,
            spreadsheet,
        }
    }

    /// pdftotext, tesseract and calamine.
    pub fn system() -> Self {
        Extractors::new(
            Box::new(pdftotext::PdftotextTables::new()),
            Box::new(ocr::TesseractOcr::new()),
            Box::new(xlsx::CalamineReader::new()),
        )
    }

    /// Extract and combine all tables in `path`.
    ///
    /// Oracle failures are logged and reported as `None`, the same as a file
    /// with no tables.
    pub fn extract(&self, kind: FileKind, path: &Path) -> Option<CombinedTable> {
        let tables = match kind {
            FileKind::Pdf => self.run(self.pdf.backend_name(), || self.pdf.extract_tables(path)),
            FileKind::Image => self.run(self.ocr.backend_name(), || {
                self.ocr
                    .image_to_text(path)
                    .map(|text| vec![ocr::tokenize_text(&text)])
            }),
            FileKind::Spreadsheet => self.run(self.spreadsheet.backend_name(), || {
                self.spreadsheet.read_sheets(path)
            }),
        }?;

        let combined = CombinedTable::concat(tables);
        debug!(
            kind = %kind,
            rows = combined.rows.len(),
            columns = combined.width(),
            "combined extracted tables"
        );
        if combined.is_empty() {
            None
        } else {
            Some(combined)
        }
    }

    fn run<F>(&self, backend: &str, f: F) -> Option<Vec<RawTable>>
    where
        F: FnOnce() -> Result<Vec<RawTable>, RollcallError>,
    {
        match f() {
            Ok(tables) if tables.is_empty() => {
                debug!(backend, "extractor returned no tables");
                None
            }
            Ok(tables) => {
                debug!(backend, tables = tables.len(), "extractor returned tables");
                Some(tables)
            }
            Err(e) => {
                warn!(backend, error = %e, "extraction failed, treating as no data");
                None
            }
        }
    }
}

impl Default for Extractors {
    fn default() -> Self {
        Self::system()
    }
}
