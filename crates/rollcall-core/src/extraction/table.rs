use crate::model::{CellValue, RawTable};

/// Reconstruct tables from `pdftotext -layout` output.
///
/// pdftotext -layout preserves column alignment using spaces, so a table row
/// is a line that breaks into two or more cells on gaps of 2+ whitespace
/// characters. A table is a run of such lines; any other line ends it.
pub fn find_tables(pages: &[Vec<String>]) -> Vec<RawTable> {
    let mut tables = Vec::new();

    for lines in pages {
        let mut current: Vec<Vec<CellValue>> = Vec::new();

        for line in lines {
            let segments = split_by_whitespace_gaps(line);
            if segments.len() >= 2 {
                current.push(segments.into_iter().map(CellValue::text).collect());
            } else if !current.is_empty() {
                tables.push(RawTable::new(std::mem::take(&mut current)));
            }
        }

        // Tables never continue across a page break
        if !current.is_empty() {
            tables.push(RawTable::new(current));
        }
    }

    tables
}

/// Split a line by gaps of 2+ whitespace characters.
pub fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut end = 0;
    let mut space_count = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start.take() {
                    segments.push(&line[s..end]);
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            space_count = 0;
            end = i + c.len_utf8();
        }
    }

    if let Some(s) = start {
        segments.push(&line[s..end]);
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(ls: &[&str]) -> Vec<String> {
        ls.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_by_whitespace_gaps() {
        let segments = split_by_whitespace_gaps("  Alice Smith     75%     90 %");
        assert_eq!(segments, vec!["Alice Smith", "75%", "90 %"]);
    }

    #[test]
    fn test_split_keeps_single_spaces() {
        assert_eq!(split_by_whitespace_gaps("Student attendance"), vec!["Student attendance"]);
        assert!(split_by_whitespace_gaps("   ").is_empty());
    }

    #[test]
    fn test_split_non_ascii() {
        let segments = split_by_whitespace_gaps("Åsa Ström   82 %");
        assert_eq!(segments, vec!["Åsa Ström", "82 %"]);
    }

    #[test]
    fn test_find_tables_single_region() {
        let pages = vec![lines(&[
            "Attendance summary",
            "  Name        ID    Math",
            "  Alice       1     75%",
            "  Bob         2     85%",
            "",
            "Footer",
        ])];

        let tables = find_tables(&pages);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 3);
        assert_eq!(tables[0].rows[1][2], CellValue::text("75%"));
    }

    #[test]
    fn test_find_tables_multiple_regions_and_pages() {
        let pages = vec![
            lines(&["A  B", "1  2", "", "C  D"]),
            lines(&["E  F", "Page 2"]),
        ];
        let tables = find_tables(&pages);
        assert_eq!(tables.len(), 3);
        assert_eq!(tables[1].rows, vec![vec![CellValue::text("C"), CellValue::text("D")]]);
        assert_eq!(tables[2].rows.len(), 1);
    }

    #[test]
    fn test_find_tables_none() {
        let pages = vec![lines(&["Just prose here.", "More prose."])];
        assert!(find_tables(&pages).is_empty());
    }
}
