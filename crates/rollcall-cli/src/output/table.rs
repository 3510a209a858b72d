use rollcall_core::model::CombinedTable;

/// Render a combined table as aligned text, one line per row, prefixed with
/// its 1-based sheet row.
pub fn format_table(table: &CombinedTable) -> String {
    let width = table.width();
    let mut col_widths = vec![0usize; width];
    let rendered: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();

    for row in &rendered {
        for (i, cell) in row.iter().enumerate() {
            col_widths[i] = col_widths[i].max(cell.chars().count());
        }
    }

    let row_label_width = table.rows.len().to_string().len();
    let mut out = String::new();
    for (r, row) in rendered.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<w$}", cell, w = col_widths[i]))
            .collect();
        let line = format!("{:>lw$} | {}", r + 1, cells.join("  "), lw = row_label_width);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
