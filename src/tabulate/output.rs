use std::io::Write;

use crate::tabulate::{config_reader::OutputTarget, io_common::normalize_text, *};

pub const SCORE_COLUMN: &str = "Topsis Score";
pub const RANK_COLUMN: &str = "Rank";

/// The input table with the score and the rank appended to every row.
pub fn assemble_output(table: &RawTable, result: &TopsisResult) -> RawTable {
    let mut header = table.header.clone();
    header.push(SCORE_COLUMN.to_string());
    header.push(RANK_COLUMN.to_string());

    let records = table
        .records
        .iter()
        .zip(result.scores.iter().zip(result.ranks.iter()))
        .map(|(record, (score, rank))| {
            let mut r = record.clone();
            r.push(score.to_string());
            r.push(rank.to_string());
            r
        })
        .collect();
    RawTable::new(header, records)
}

pub fn to_csv_string(table: &RawTable) -> CliResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(&table.header)
        .context(SerializingCsvSnafu {})?;
    for record in table.records.iter() {
        wtr.write_record(record).context(SerializingCsvSnafu {})?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| e.into_error())
        .context(BufferingCsvSnafu {})?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_output(csv_text: &str, target: &OutputTarget) -> CliResult<()> {
    match target {
        OutputTarget::Stdout => {
            let mut out = std::io::stdout();
            out.write_all(csv_text.as_bytes())
                .context(WritingOutputSnafu { path: "stdout" })?;
        }
        OutputTarget::File(path) => {
            fs::write(path, csv_text).context(WritingOutputSnafu { path })?;
            info!("write_output: results saved to {:?}", path);
        }
    }
    Ok(())
}

/// A plain-text table of the results, one alternative per line.
pub fn format_results(labels: &[String], result: &TopsisResult) -> String {
    let width = labels
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once("Alternative".len()))
        .max()
        .unwrap_or(0);
    let mut s = String::new();
    s.push_str("      TOPSIS RESULTS\n");
    s.push_str("-----------------------------\n");
    s.push_str(&format!(
        "{:<width$}  {:>12}  {:>4}\n",
        "Alternative",
        SCORE_COLUMN,
        RANK_COLUMN,
        width = width
    ));
    for ((label, score), rank) in labels
        .iter()
        .zip(result.scores.iter())
        .zip(result.ranks.iter())
    {
        s.push_str(&format!(
            "{:<width$}  {:>12.6}  {:>4}\n",
            label,
            score,
            rank,
            width = width
        ));
    }
    s
}

/// Compares the produced CSV with a reference file. Differences are
/// printed line by line.
pub fn check_reference(csv_text: &str, reference_path: &str) -> CliResult<()> {
    let reference = fs::read_to_string(reference_path).context(OpeningReferenceSnafu {
        path: reference_path,
    })?;
    let expected = normalize_text(&reference);
    let actual = normalize_text(csv_text);
    if expected != actual {
        warn!("Found differences with the reference file {:?}", reference_path);
        print_diff(expected.as_str(), actual.as_str(), "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("check_reference: output matches {:?}", reference_path);
    Ok(())
}
