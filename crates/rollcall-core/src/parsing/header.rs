use crate::sheet::Sheet;

/// Normalize a column label or requested subject for comparison.
pub fn normalize_label(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Find the 1-based column in `header_row` whose label matches `subject`.
///
/// Labels are compared after trimming and lowercasing; the leftmost match
/// wins. Non-text and blank header cells never match.
pub fn resolve_subject_column(sheet: &Sheet, header_row: u32, subject: &str) -> Option<u16> {
    let wanted = normalize_label(subject);

    sheet
        .row(header_row)
        .iter()
        .enumerate()
        .find_map(|(i, cell)| {
            let label = cell.as_text()?;
            if label.trim().is_empty() {
                return None;
            }
            (normalize_label(label) == wanted).then_some(i as u16 + 1)
        })
}
