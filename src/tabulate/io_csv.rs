// Primitives for reading CSV files.

use crate::tabulate::{
    io_common::{ensure_input_exists, unreadable},
    *,
};

/// Reads a CSV table. The first record is the header. Records may have any
/// length, the validator reports short and long rows.
pub fn read_csv_table(path: &str) -> CliResult<RawTable> {
    ensure_input_exists(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| unreadable(path, e))?;

    let header: Vec<String> = rdr
        .headers()
        .map_err(|e| unreadable(path, e))?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_csv_table: header: {:?}", header);

    let mut records: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.map_err(|e| unreadable(path, e))?;
        debug!("read_csv_table: {:?} {:?}", lineno, line);
        records.push(line.iter().map(|s| s.to_string()).collect());
    }
    info!(
        "read_csv_table: read {:?} rows from {:?}",
        records.len(),
        path
    );
    Ok(RawTable::new(header, records))
}
