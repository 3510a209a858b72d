use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RollcallError {
    #[error("File or subject name missing")]
    MissingField,

    #[error("Invalid file type")]
    InvalidFileType,

    #[error("No valid data found in the file")]
    NoData,

    #[error("Subject {subject} not found")]
    SubjectNotFound { subject: String },

    #[error("table extraction failed: {0}")]
    Extraction(String),

    #[error("{tool} not found. Install it: brew install {package} (macOS) or apt install {package} (Linux)")]
    ToolNotFound {
        tool: &'static str,
        package: &'static str,
    },

    #[error("{tool} failed with exit code {code}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        code: i32,
        stderr: String,
    },

    #[error("sheet '{sheet}' not found in {path}")]
    SheetMissing { sheet: String, path: PathBuf },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("xlsx read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("xlsx write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),
}

impl RollcallError {
    /// Whether the failure was caused by the caller's input rather than the system.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            RollcallError::MissingField
                | RollcallError::InvalidFileType
                | RollcallError::NoData
                | RollcallError::SubjectNotFound { .. }
        )
    }

    /// HTTP-style status code reported at the request boundary.
    pub fn status(&self) -> u16 {
        if self.is_user_error() {
            400
        } else {
            500
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_map_to_400() {
        assert_eq!(RollcallError::NoData.status(), 400);
        assert_eq!(
            RollcallError::SubjectNotFound {
                subject: "history".into()
            }
            .status(),
            400
        );
        assert_eq!(RollcallError::ConfigInvalid("x".into()).status(), 500);
    }

    #[test]
    fn subject_not_found_message() {
        let e = RollcallError::SubjectNotFound {
            subject: "history".into(),
        };
        assert_eq!(e.to_string(), "Subject history not found");
    }
}
