use rollcall_core::error::RollcallError;
use rollcall_core::extract_file;
use rollcall_core::extraction::Extractors;
use std::path::PathBuf;

use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<bool, RollcallError> {
    let table = extract_file(&input_file, &Extractors::system())?;

    match output_format {
        "json" => output::json::print(&table)?,
        _ => println!("{}", output::table::format_table(&table)),
    }
    eprintln!(
        "Extracted {} row(s), {} column(s)",
        table.rows.len(),
        table.width()
    );

    Ok(true)
}
