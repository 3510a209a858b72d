use rust_xlsxwriter::{
    Chart, ChartType, ColNum, Color, Format, FormatPattern, RowNum, Workbook, Worksheet, XlsxError,
};

use crate::error::RollcallError;
use crate::model::{CellValue, ChartSpec, CombinedTable};
use crate::report::Annotation;
use crate::sheet::Sheet;
use std::path::Path;
use tracing::debug;

/// Write the combined table to a single-sheet workbook, starting at row 1.
pub fn write_staging(
    table: &CombinedTable,
    sheet_name: &str,
    path: &Path,
) -> Result<(), RollcallError> {
    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;
        for (r, row) in table.rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                write_cell(worksheet, r as RowNum, c as ColNum, value, None)?;
            }
        }
    }
    workbook.save(path)?;
    debug!(path = %path.display(), rows = table.rows.len(), "wrote staging workbook");
    Ok(())
}

/// Write the sheet with highlight fills and the chart, overwriting `path`.
pub fn write_annotated(
    sheet: &Sheet,
    annotation: &Annotation,
    highlight_rgb: u32,
    path: &Path,
) -> Result<(), RollcallError> {
    let highlight = Format::new()
        .set_background_color(Color::RGB(highlight_rgb))
        .set_pattern(FormatPattern::Solid);

    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (row, column, value) in sheet.cells() {
            if !annotation.is_highlighted(row, column) {
                write_cell(worksheet, row - 1, column - 1, value, None)?;
            }
        }
        // Highlighted cells may be blank, so they are written separately
        for h in &annotation.highlights {
            let value = sheet.cell(h.row, h.column);
            write_cell(worksheet, h.row - 1, h.column - 1, value, Some(&highlight))?;
        }

        if let Some(ref spec) = annotation.chart {
            let chart = build_chart(&sheet.name, spec);
            worksheet.insert_chart(spec.anchor_row - 1, spec.anchor_column - 1, &chart)?;
            debug!(anchor = %spec.anchor_cell(), "inserted chart");
        }
    }
    workbook.save(path)?;
    debug!(
        path = %path.display(),
        highlights = annotation.highlights.len(),
        chart = annotation.chart.is_some(),
        "wrote annotated workbook"
    );
    Ok(())
}

fn build_chart(sheet_name: &str, spec: &ChartSpec) -> Chart {
    let data = spec.data;
    let categories = spec.categories;
    let data_col = data.column - 1;
    let category_col = categories.column - 1;

    let mut chart = Chart::new(ChartType::Column);
    chart.title().set_name(spec.title.as_str());
    chart.x_axis().set_name(spec.x_axis_title.as_str());
    chart.y_axis().set_name(spec.y_axis_title.as_str());

    // The header cell names the series; values start on the row below it
    chart
        .add_series()
        .set_name((sheet_name, data.first_row - 1, data_col))
        .set_values((sheet_name, data.first_row, data_col, data.last_row - 1, data_col))
        .set_categories((
            sheet_name,
            categories.first_row - 1,
            category_col,
            categories.last_row - 1,
            category_col,
        ));
    chart
}

/// Write one cell at 0-based coordinates. Empty cells are only written when styled.
fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: &CellValue,
    format: Option<&Format>,
) -> Result<(), XlsxError> {
    match (value, format) {
        (CellValue::Empty, None) => {}
        (CellValue::Empty, Some(f)) => {
            worksheet.write_blank(row, col, f)?;
        }
        (CellValue::Text(s), None) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        (CellValue::Text(s), Some(f)) => {
            worksheet.write_string_with_format(row, col, s.as_str(), f)?;
        }
        (CellValue::Number(n), f) if !n.is_finite() => {
            let text = n.to_string();
            match f {
                Some(f) => worksheet.write_string_with_format(row, col, text.as_str(), f)?,
                None => worksheet.write_string(row, col, text.as_str())?,
            };
        }
        (CellValue::Number(n), None) => {
            worksheet.write_number(row, col, *n)?;
        }
        (CellValue::Number(n), Some(f)) => {
            worksheet.write_number_with_format(row, col, *n, f)?;
        }
        (CellValue::Bool(b), None) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        (CellValue::Bool(b), Some(f)) => {
            worksheet.write_boolean_with_format(row, col, *b, f)?;
        }
    }
    Ok(())
}
