pub mod classify;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod report;
pub mod request;
pub mod sheet;
pub mod storage;

use config::{validate_config, PipelineConfig};
use error::RollcallError;
use extraction::{Extractors, FileKind};
use model::{AttendanceReport, CombinedTable};
use parsing::{normalize_label, resolve_subject_column};
use std::path::Path;
use tracing::info;

pub use request::{handle, process_upload, Response, Upload};

/// Extract and combine every table in a file, dispatching on its extension.
pub fn extract_file(path: &Path, extractors: &Extractors) -> Result<CombinedTable, RollcallError> {
    let kind = FileKind::from_path(path).ok_or(RollcallError::InvalidFileType)?;
    extractors.extract(kind, path).ok_or(RollcallError::NoData)
}

/// Main API entry point: flag students below the attendance threshold for `subject`.
///
/// Writes the combined table to the staging workbook, reads it back, resolves
/// the subject column in the header row, classifies each data row, and writes
/// the highlighted workbook with a bar chart to `config.output_path`.
pub fn process_file(
    path: &Path,
    subject: &str,
    config: &PipelineConfig,
    extractors: &Extractors,
) -> Result<AttendanceReport, RollcallError> {
    validate_config(config)?;
    let highlight_rgb = config.highlight_rgb()?;

    let table = extract_file(path, extractors)?;
    info!(
        file = %path.display(),
        rows = table.rows.len(),
        "extracted combined table"
    );

    report::writer::write_staging(&table, &config.sheet_name, &config.staging_path)?;
    let sheet = sheet::read_sheet(&config.staging_path, &config.sheet_name)?;

    let subject = normalize_label(subject);
    let subject_column = resolve_subject_column(&sheet, config.header_row, &subject)
        .ok_or_else(|| RollcallError::SubjectNotFound {
            subject: subject.clone(),
        })?;

    let records =
        classify::classify_column(&sheet, config.header_row, subject_column, config.threshold);
    let annotation = report::annotate(&sheet, &records, subject_column, &subject, config)?;
    report::writer::write_annotated(&sheet, &annotation, highlight_rgb, &config.output_path)?;

    let flagged = records.iter().filter(|r| r.flagged).count();
    info!(
        subject = %subject,
        column = subject_column,
        rows = records.len(),
        flagged,
        output = %config.output_path.display(),
        "annotated attendance report"
    );

    Ok(AttendanceReport {
        subject,
        subject_column,
        records,
        highlights: annotation.highlights,
        chart: annotation.chart,
        output_path: config.output_path.clone(),
    })
}
