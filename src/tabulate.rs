use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use topsis_core::validate::{validate_table, RawTable};
use topsis_core::*;

use std::fs;
use std::path::Path;

use text_diff::print_diff;

use crate::tabulate::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;
pub mod output;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TopsisCliError {
    #[snafu(context(false), display("{source}"))]
    Core { source: TopsisError },

    #[snafu(display("Error opening configuration file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration file {path}: {source}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("The {name} in the configuration file must be a string or a list"))]
    ConfigList { name: String },
    #[snafu(display("Cannot find the directory of the configuration file {path}"))]
    MissingParentDir { path: String },
    #[snafu(display(
        "Missing {name}. Usage: topsis <InputFile> <Weights> <Impacts> (see topsis --help)"
    ))]
    MissingArgument { name: String },
    #[snafu(display("Input type {provider:?} is not supported (expected csv or xlsx)"))]
    UnknownProvider { provider: String },
    #[snafu(display(
        "Zero column policy {policy:?} is not supported (expected reject or zero-fill)"
    ))]
    UnknownPolicy { policy: String },

    #[snafu(display("Error serializing the result table"))]
    SerializingCsv { source: csv::Error },
    #[snafu(display("Error serializing the result table"))]
    BufferingCsv { source: std::io::Error },
    #[snafu(display("Error writing the result to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening reference file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the computed result and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type CliResult<T> = Result<T, TopsisCliError>;

/// What a run produced.
#[derive(PartialEq, Debug, Clone)]
pub struct RunOutcome {
    pub result: TopsisResult,
    pub output: RawTable,
    pub csv_text: String,
}

fn read_table(settings: &RunSettings) -> CliResult<RawTable> {
    info!(
        "Attempting to read input file {:?} ({:?})",
        settings.input_path, settings.provider
    );
    match settings.provider {
        InputProvider::Csv => io_csv::read_csv_table(&settings.input_path),
        InputProvider::Xlsx => io_xlsx::read_excel_table(
            &settings.input_path,
            settings.excel_worksheet_name.as_deref(),
        ),
    }
}

/// Reads the input, ranks the alternatives and writes the result.
pub fn run_topsis(settings: &RunSettings) -> CliResult<RunOutcome> {
    info!("settings: {:?}", settings);
    let table = read_table(settings)?;

    let input = validate_table(&table, &settings.weights, &settings.impacts)?;
    let result = compute_with_rules(&input.matrix, &input.weights, &input.impacts, &settings.rules)?;
    debug!("run_topsis: result: {:?}", result);

    let output_table = output::assemble_output(&table, &result);
    let csv_text = output::to_csv_string(&output_table)?;
    output::write_output(&csv_text, &settings.output)?;

    if settings.print_results {
        println!("{}", output::format_results(&input.matrix.labels(), &result));
        if let OutputTarget::File(path) = &settings.output {
            println!("Results saved to {:?}", path);
        }
    }

    // The reference result, if provided for comparison
    if let Some(reference_path) = &settings.reference {
        output::check_reference(&csv_text, reference_path)?;
    }

    Ok(RunOutcome {
        result,
        output: output_table,
        csv_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const GOLDEN_CSV: &str = "Model,Price,Storage,Camera,Looks
A,250,16,12,5
B,200,16,8,3
C,300,32,16,4
D,275,32,8,4
E,225,16,16,2
";

    fn settings(dir: &TempDir, weights: &str, impacts: &str) -> RunSettings {
        let input = dir.path().join("data.csv");
        fs::write(&input, GOLDEN_CSV).unwrap();
        RunSettings {
            input_path: input.display().to_string(),
            provider: InputProvider::Csv,
            excel_worksheet_name: None,
            weights: weights.to_string(),
            impacts: impacts.to_string(),
            rules: TopsisRules::DEFAULT_RULES,
            output: OutputTarget::File(dir.path().join("result.csv").display().to_string()),
            print_results: false,
            reference: None,
        }
    }

    #[test]
    fn golden_run() {
        let dir = TempDir::new().unwrap();
        let s = settings(&dir, "0.25,0.25,0.25,0.25", "+,+,+,-");
        let outcome = run_topsis(&s).unwrap();
        assert_eq!(outcome.result.ranks, vec![5, 4, 1, 3, 2]);

        let written = fs::read_to_string(dir.path().join("result.csv")).unwrap();
        assert_eq!(written, outcome.csv_text);
        let mut lines = written.lines();
        assert_eq!(
            lines.next(),
            Some("Model,Price,Storage,Camera,Looks,Topsis Score,Rank")
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("A,250,16,12,5,0.2524470436585"));
        assert!(first.ends_with(",5"));
        assert_eq!(written.lines().count(), 6);
    }

    #[test]
    fn reference_round_trip() {
        let dir = TempDir::new().unwrap();
        let s = settings(&dir, "1,1,1,1", "+,+,+,-");
        let first = run_topsis(&s).unwrap();
        let reference = dir.path().join("expected.csv");
        fs::write(&reference, &first.csv_text).unwrap();

        let checked = RunSettings {
            reference: Some(reference.display().to_string()),
            ..s.clone()
        };
        run_topsis(&checked).unwrap();

        let other = RunSettings {
            impacts: "+,+,+,+".to_string(),
            ..checked
        };
        assert!(matches!(
            run_topsis(&other),
            Err(TopsisCliError::ReferenceMismatch { .. })
        ));
    }

    #[test]
    fn validation_errors_are_reported() {
        let dir = TempDir::new().unwrap();
        let s = settings(&dir, "1,2", "+,+,+,-");
        assert!(matches!(
            run_topsis(&s),
            Err(TopsisCliError::Core {
                source: TopsisError::WeightCountMismatch {
                    expected: 4,
                    found: 2
                }
            })
        ));
        let s = settings(&dir, "1,1,1,1", "+,*,-,+");
        assert!(matches!(
            run_topsis(&s),
            Err(TopsisCliError::Core {
                source: TopsisError::InvalidImpactSymbol { .. }
            })
        ));
        // Nothing is written on failure.
        assert!(!dir.path().join("result.csv").exists());
    }

    #[test]
    fn missing_input_file() {
        let dir = TempDir::new().unwrap();
        let s = RunSettings {
            input_path: dir.path().join("missing.csv").display().to_string(),
            ..settings(&dir, "1,1,1,1", "+,+,+,-")
        };
        let err = run_topsis(&s).unwrap_err();
        assert!(matches!(
            err,
            TopsisCliError::Core {
                source: TopsisError::InputNotFound { .. }
            }
        ));
        assert!(err.to_string().starts_with("Input file not found"));
    }

    #[test]
    fn demo_config() {
        let dir = TempDir::new().unwrap();
        let args = crate::args::Args {
            config: Some(format!(
                "{}/demos/mobiles.json",
                env!("CARGO_MANIFEST_DIR")
            )),
            out: Some(dir.path().join("out.csv").display().to_string()),
            quiet: true,
            ..Default::default()
        };
        let s = resolve_settings(&args).unwrap();
        assert!(s.input_path.ends_with("mobiles.csv"));
        let outcome = run_topsis(&s).unwrap();
        assert_eq!(outcome.result.ranks, vec![5, 4, 1, 3, 2]);
        assert_eq!(outcome.output.records[2][0], "M3");
    }

    #[test]
    fn excel_input() {
        let dir = TempDir::new().unwrap();
        let s = RunSettings {
            input_path: format!("{}/demos/mobiles.xlsx", env!("CARGO_MANIFEST_DIR")),
            provider: InputProvider::Xlsx,
            excel_worksheet_name: Some("Scores".to_string()),
            ..settings(&dir, "0.25,0.25,0.25,0.25", "+,+,+,-")
        };
        let outcome = run_topsis(&s).unwrap();
        assert_eq!(outcome.result.ranks, vec![5, 4, 1, 3, 2]);
        assert!(outcome
            .csv_text
            .starts_with("Model,Price,Storage,Camera,Looks,Topsis Score,Rank\nM1,250,16,12,5,"));
    }

    #[test]
    fn short_csv_row_is_missing_data() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("short.csv");
        fs::write(&input, "Name,A,B,C\nx,1,2,3\ny,4,5\n").unwrap();
        let s = RunSettings {
            input_path: input.display().to_string(),
            ..settings(&dir, "1,1,1", "+,+,+")
        };
        assert!(matches!(
            run_topsis(&s),
            Err(TopsisCliError::Core {
                source: TopsisError::NonNumericData { row: 2, .. }
            })
        ));
    }

    #[test]
    fn zero_column_policy() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("zeros.csv");
        fs::write(&input, "Name,A,B\nx,1,0\ny,3,0\n").unwrap();
        let s = RunSettings {
            input_path: input.display().to_string(),
            ..settings(&dir, "1,1", "+,+")
        };
        assert!(matches!(
            run_topsis(&s),
            Err(TopsisCliError::Core {
                source: TopsisError::DegenerateColumn { .. }
            })
        ));
        let filled = RunSettings {
            rules: TopsisRules {
                degenerate_column: DegenerateColumnPolicy::ZeroFill,
            },
            ..s
        };
        assert_eq!(run_topsis(&filled).unwrap().result.ranks, vec![2, 1]);
    }
}
