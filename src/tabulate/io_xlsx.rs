use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::tabulate::{
    io_common::{ensure_input_exists, unreadable},
    *,
};

/// Reads the first worksheet of an Excel file, or the worksheet with the
/// given name. The first row is the header.
pub fn read_excel_table(path: &str, worksheet_name: Option<&str>) -> CliResult<RawTable> {
    ensure_input_exists(path)?;
    debug!(
        "read_excel_table: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| unreadable(path, e))?;

    let wrange_o = match worksheet_name {
        Some(name) => workbook.worksheet_range(name),
        None => workbook.worksheet_range_at(0),
    };
    let wrange = match wrange_o {
        Some(r) => r.map_err(|e| unreadable(path, e))?,
        None => {
            return Err(unreadable(
                path,
                format!(
                    "worksheet {} not found",
                    worksheet_name.unwrap_or("#1")
                ),
            ))
        }
    };

    let mut rows = wrange.rows();
    let header: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(read_cell).collect())
        .unwrap_or_default();
    debug!("read_excel_table: header: {:?}", header);

    let records: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(read_cell).collect())
        .collect();
    info!(
        "read_excel_table: read {:?} rows from {:?}",
        records.len(),
        path
    );
    Ok(RawTable::new(header, records))
}

// Numbers are rendered the way they would appear in a CSV export.
fn read_cell(cell: &DataType) -> String {
    match cell {
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::String(s) => s.clone(),
        DataType::Bool(b) => b.to_string(),
        DataType::Empty => "".to_string(),
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_workbook() -> String {
        format!("{}/demos/mobiles.xlsx", env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn cells_as_text() {
        assert_eq!(read_cell(&DataType::Int(250)), "250");
        assert_eq!(read_cell(&DataType::Float(16.0)), "16");
        assert_eq!(read_cell(&DataType::Float(0.25)), "0.25");
        assert_eq!(read_cell(&DataType::String("M1".to_string())), "M1");
        assert_eq!(read_cell(&DataType::Empty), "");
    }

    #[test]
    fn worksheet_by_name() {
        let t = read_excel_table(&demo_workbook(), Some("Scores")).unwrap();
        assert_eq!(t.header, vec!["Model", "Price", "Storage", "Camera", "Looks"]);
        assert_eq!(t.records.len(), 5);
        assert_eq!(t.records[0], vec!["M1", "250", "16", "12", "5"]);
        let csv_table = crate::tabulate::io_csv::read_csv_table(&format!(
            "{}/demos/mobiles.csv",
            env!("CARGO_MANIFEST_DIR")
        ))
        .unwrap();
        assert_eq!(t, csv_table);
    }

    #[test]
    fn first_worksheet_by_default() {
        let t = read_excel_table(&demo_workbook(), None).unwrap();
        assert_eq!(t.header, vec!["About"]);
        assert_eq!(t.records.len(), 1);
    }

    #[test]
    fn unknown_worksheet() {
        let err = read_excel_table(&demo_workbook(), Some("Sheet9")).unwrap_err();
        assert!(matches!(
            err,
            TopsisCliError::Core {
                source: TopsisError::UnreadableInput { .. }
            }
        ));
        assert!(err.to_string().contains("Sheet9"));
    }

    #[test]
    fn missing_workbook() {
        assert!(matches!(
            read_excel_table("/definitely/not/here.xlsx", None),
            Err(TopsisCliError::Core {
                source: TopsisError::InputNotFound { .. }
            })
        ));
    }
}
