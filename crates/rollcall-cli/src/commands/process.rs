use rollcall_core::config::{load_config, PipelineConfig};
use rollcall_core::error::RollcallError;
use rollcall_core::extraction::ocr::TesseractOcr;
use rollcall_core::extraction::pdftotext::PdftotextTables;
use rollcall_core::extraction::{Extractors, FileKind};
use rollcall_core::request::UploadedFile;
use rollcall_core::storage::UploadStore;
use rollcall_core::{handle, process_upload, Response, Upload};
use std::path::{Path, PathBuf};

use crate::output;

/// Returns `Ok(false)` when the request was rejected.
pub fn run(
    input_file: PathBuf,
    subject: Option<String>,
    config_file: Option<PathBuf>,
    output_format: &str,
) -> Result<bool, RollcallError> {
    let config = match config_file {
        Some(ref path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    let store = UploadStore::from_config(config.upload_dir.as_deref())?;
    let extractors = Extractors::system();
    warn_missing_backend(&input_file);

    let file = match input_file.file_name() {
        Some(name) => Some(UploadedFile {
            filename: name.to_string_lossy().into_owned(),
            bytes: std::fs::read(&input_file)?,
        }),
        None => None,
    };
    let upload = Upload { file, subject };

    match output_format {
        "json" => match process_upload(&upload, &config, &store, &extractors) {
            Ok(report) => {
                output::json::print(&report)?;
                Ok(true)
            }
            Err(e) => {
                output::json::print(&Response::from_error(&e))?;
                Ok(false)
            }
        },
        _ => {
            let response = handle(&upload, &config, &store, &extractors);
            if response.is_success() {
                println!("{}", response.message);
            } else {
                eprintln!("{} ({})", response.message, response.status);
            }
            Ok(response.is_success())
        }
    }
}

/// Extraction failures are reported as "no data", so say up front when a
/// backend binary is missing.
fn warn_missing_backend(input_file: &Path) {
    match FileKind::from_path(input_file) {
        Some(FileKind::Pdf) if !PdftotextTables::is_available() => {
            eprintln!("warning: pdftotext not found; PDF tables cannot be extracted");
        }
        Some(FileKind::Image) if !TesseractOcr::is_available() => {
            eprintln!("warning: tesseract not found; images cannot be read");
        }
        _ => {}
    }
}
