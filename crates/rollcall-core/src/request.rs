use crate::config::{validate_config, PipelineConfig};
use crate::error::RollcallError;
use crate::extraction::{Extractors, FileKind};
use crate::model::AttendanceReport;
use crate::storage::UploadStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{error, info};

/// A file part as received at the boundary.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// The form fields of one processing request. Absent fields are `None`.
#[derive(Debug, Clone, Default)]
pub struct Upload {
    pub file: Option<UploadedFile>,
    pub subject: Option<String>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>, subject: impl Into<String>) -> Self {
        Upload {
            file: Some(UploadedFile {
                filename: filename.into(),
                bytes,
            }),
            subject: Some(subject.into()),
        }
    }
}

/// Status and message returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub message: String,
}

impl Response {
    pub fn completed(output_path: &Path) -> Self {
        Response {
            status: 200,
            message: format!(
                "Highlighting and chart creation completed. Check {}",
                output_path.display()
            ),
        }
    }

    pub fn from_error(err: &RollcallError) -> Self {
        let message = if err.is_user_error() {
            err.to_string()
        } else {
            format!("Internal error: {err}")
        };
        Response {
            status: err.status(),
            message,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Validate an upload, save it to `store`, and run the pipeline on it.
pub fn process_upload(
    upload: &Upload,
    config: &PipelineConfig,
    store: &UploadStore,
    extractors: &Extractors,
) -> Result<AttendanceReport, RollcallError> {
    let (Some(file), Some(subject)) = (&upload.file, &upload.subject) else {
        return Err(RollcallError::MissingField);
    };

    // Same rule the pipeline dispatches on, so anything saved is routable
    if FileKind::from_path(Path::new(&file.filename)).is_none() {
        return Err(RollcallError::InvalidFileType);
    }
    validate_config(config)?;

    let path = store.save(&file.filename, &file.bytes)?;
    info!(file = %path.display(), subject = %subject, "upload saved");
    crate::process_file(&path, subject, config, extractors)
}

/// Run one request end to end and report the outcome as a [`Response`].
pub fn handle(
    upload: &Upload,
    config: &PipelineConfig,
    store: &UploadStore,
    extractors: &Extractors,
) -> Response {
    match process_upload(upload, config, store, extractors) {
        Ok(report) => Response::completed(&report.output_path),
        Err(e) => {
            if !e.is_user_error() {
                error!(error = %e, "request failed");
            }
            Response::from_error(&e)
        }
    }
}
