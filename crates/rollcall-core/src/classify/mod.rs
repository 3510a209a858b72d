use crate::model::AttendanceRecord;
use crate::parsing::parse_percentage;
use crate::sheet::Sheet;

/// A row is flagged when its attendance is strictly below the threshold.
pub fn is_below_threshold(percentage: f64, threshold: f64) -> bool {
    percentage < threshold
}

/// Classify every row below `header_row` in `column`, up to the sheet's last row.
///
/// Cells that do not parse as a number produce a record with no percentage
/// and are never flagged.
pub fn classify_column(
    sheet: &Sheet,
    header_row: u32,
    column: u16,
    threshold: f64,
) -> Vec<AttendanceRecord> {
    (header_row + 1..=sheet.max_row())
        .map(|row| {
            let raw_value = sheet.cell(row, column).clone();
            let percentage = parse_percentage(&raw_value);
            let flagged = percentage.is_some_and(|p| is_below_threshold(p, threshold));
            AttendanceRecord {
                row,
                raw_value,
                percentage,
                flagged,
            }
        })
        .collect()
}
