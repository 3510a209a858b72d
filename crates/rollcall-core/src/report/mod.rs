pub mod writer;

use crate::config::{PipelineConfig, MAX_COLUMN, MAX_ROW};
use crate::error::RollcallError;
use crate::model::{AttendanceRecord, ChartSpec, ColumnRange, Highlight};
use crate::parsing::normalize_label;
use crate::sheet::Sheet;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Styling and chart to apply to the combined sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub highlights: Vec<Highlight>,
    pub chart: Option<ChartSpec>,
}

impl Annotation {
    pub fn is_highlighted(&self, row: u32, column: u16) -> bool {
        self.highlights
            .iter()
            .any(|h| h.row == row && h.column == column)
    }
}

/// Plan highlights and chart for a classified subject column.
pub fn annotate(
    sheet: &Sheet,
    records: &[AttendanceRecord],
    subject_column: u16,
    subject: &str,
    config: &PipelineConfig,
) -> Result<Annotation, RollcallError> {
    Ok(Annotation {
        highlights: highlights(records, config.name_column, subject_column),
        chart: build_chart(sheet, subject_column, subject, config)?,
    })
}

/// Name cell and subject cell of every flagged row, in row order.
pub fn highlights(
    records: &[AttendanceRecord],
    name_column: u16,
    subject_column: u16,
) -> Vec<Highlight> {
    let mut out = Vec::new();
    for record in records.iter().filter(|r| r.flagged) {
        out.push(Highlight {
            row: record.row,
            column: name_column,
        });
        if subject_column != name_column {
            out.push(Highlight {
                row: record.row,
                column: subject_column,
            });
        }
    }
    out
}

/// Bar chart over the subject column, or `None` when there are no data rows.
///
/// Fails when the configured offsets put the anchor outside the worksheet.
pub fn build_chart(
    sheet: &Sheet,
    subject_column: u16,
    subject: &str,
    config: &PipelineConfig,
) -> Result<Option<ChartSpec>, RollcallError> {
    let header_row = config.header_row;
    let last_row = sheet.max_row();
    if last_row <= header_row {
        warn!(
            header_row,
            last_row, "no data rows below the header, skipping chart"
        );
        return Ok(None);
    }

    let anchor_row = header_row
        .checked_add(config.chart_offset_rows)
        .filter(|row| *row <= MAX_ROW)
        .ok_or_else(|| {
            RollcallError::ConfigInvalid(format!(
                "chart anchor row {header_row} + {} is past row {MAX_ROW}",
                config.chart_offset_rows
            ))
        })?;
    let anchor_column = subject_column
        .checked_add(config.chart_offset_columns)
        .filter(|column| *column <= MAX_COLUMN)
        .ok_or_else(|| {
            RollcallError::ConfigInvalid(format!(
                "chart anchor column {subject_column} + {} is past column {MAX_COLUMN}",
                config.chart_offset_columns
            ))
        })?;

    Ok(Some(ChartSpec {
        title: chart_title(subject),
        x_axis_title: "Students".to_string(),
        y_axis_title: "Attendance (%)".to_string(),
        data: ColumnRange {
            column: subject_column,
            first_row: header_row,
            last_row,
        },
        categories: ColumnRange {
            column: config.name_column,
            first_row: header_row + 1,
            last_row,
        },
        anchor_row,
        anchor_column,
    }))
}

pub fn chart_title(subject: &str) -> String {
    format!("Attendance Bar Chart - {}", capitalize(&normalize_label(subject)))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn record(row: u32, flagged: bool) -> AttendanceRecord {
        AttendanceRecord {
            row,
            raw_value: CellValue::Empty,
            percentage: None,
            flagged,
        }
    }

    fn sheet(data_rows: usize) -> Sheet {
        let mut rows: Vec<Vec<CellValue>> =
            vec![vec![], vec![], vec![], vec!["Name".into(), "ID".into(), "Math".into()]];
        for i in 0..data_rows {
            rows.push(vec![
                CellValue::text(format!("S{i}")),
                CellValue::from(i as i32),
                "70%".into(),
            ]);
        }
        Sheet::new("Combined_Data", rows)
    }

    #[test]
    fn test_flagged_rows_get_both_cells() {
        let records = vec![record(5, true), record(6, false), record(7, true)];
        let hs = highlights(&records, 1, 3);
        assert_eq!(
            hs,
            vec![
                Highlight { row: 5, column: 1 },
                Highlight { row: 5, column: 3 },
                Highlight { row: 7, column: 1 },
                Highlight { row: 7, column: 3 },
            ]
        );
    }

    #[test]
    fn test_subject_in_name_column_highlighted_once() {
        let hs = highlights(&[record(5, true)], 1, 1);
        assert_eq!(hs, vec![Highlight { row: 5, column: 1 }]);
    }

    #[test]
    fn test_chart_ranges_and_anchor() {
        let chart = build_chart(&sheet(2), 3, "math", &PipelineConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(chart.title, "Attendance Bar Chart - Math");
        assert_eq!(
            chart.data,
            ColumnRange {
                column: 3,
                first_row: 4,
                last_row: 6
            }
        );
        assert_eq!(
            chart.categories,
            ColumnRange {
                column: 1,
                first_row: 5,
                last_row: 6
            }
        );
        assert_eq!(chart.anchor_column, 6);
        assert_eq!(chart.anchor_row, 9);
        assert_eq!(chart.anchor_cell(), "F9");
    }

    #[test]
    fn test_no_chart_without_data_rows() {
        let chart = build_chart(&sheet(0), 3, "math", &PipelineConfig::default()).unwrap();
        assert!(chart.is_none());
    }

    #[test]
    fn test_anchor_past_last_column_is_an_error() {
        let config = PipelineConfig {
            chart_offset_columns: MAX_COLUMN - 1,
            ..Default::default()
        };
        assert_eq!(
            build_chart(&sheet(1), 1, "math", &config).unwrap().unwrap().anchor_column,
            MAX_COLUMN
        );
        let err = build_chart(&sheet(1), 2, "math", &config).unwrap_err();
        assert!(matches!(err, RollcallError::ConfigInvalid(_)));
    }

    #[test]
    fn test_chart_title_normalizes_subject() {
        assert_eq!(chart_title("  SCIENCE "), "Attendance Bar Chart - Science");
        assert_eq!(chart_title(""), "Attendance Bar Chart - ");
    }

    #[test]
    fn test_annotation_lookup() {
        let a = annotate(&sheet(1), &[record(5, true)], 3, "math", &PipelineConfig::default())
            .unwrap();
        assert!(a.is_highlighted(5, 1));
        assert!(a.is_highlighted(5, 3));
        assert!(!a.is_highlighted(5, 2));
    }
}
