// Small dev utility: print one sheet of a spreadsheet row by row.
//
// Usage:
//   cargo run --bin sheet_dump -- [--json-log] <file.xlsx|file.csv> [sheet_name]

use anyhow::{anyhow, Context, Result};
use excel_record::{codec_for_path, logging, Sheet};
use std::fs;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1).peekable();
    if args.peek().map(String::as_str) == Some("--json-log") {
        args.next();
        logging::init_json();
    } else {
        logging::init();
    }

    let path = args.next().ok_or_else(|| {
        anyhow!("usage: sheet_dump [--json-log] <file.xlsx|file.csv> [sheet_name]")
    })?;
    let sheet_name = args.next();

    let codec = codec_for_path(&path)?;
    let bytes = fs::read(&path).with_context(|| format!("failed to read {}", path))?;
    let workbook = codec.read_workbook(&bytes)?;

    let names: Vec<&str> = workbook.sheets().iter().map(Sheet::name).collect();
    println!("sheets={:?}", names);

    let sheet = match sheet_name.as_deref() {
        Some(name) => workbook
            .sheet_by_name(name)
            .ok_or_else(|| anyhow!("sheet not found: {}", name))?,
        None => workbook
            .first_sheet()
            .ok_or_else(|| anyhow!("workbook has no sheets"))?,
    };

    for (row_idx, row) in sheet.rows() {
        let cells: Vec<String> = (0..row.width())
            .map(|col| row.cell(col).map(ToString::to_string).unwrap_or_default())
            .collect();
        println!("{:>5} | {}", row_idx, cells.join(" | "));
    }

    Ok(())
}
