//! Validation of raw tables and of the textual weights and impacts.
//!
//! The checks run in a fixed order and the first failure is reported:
//! columns, cell values, weights, then impacts.

use log::debug;
use snafu::OptionExt;

use crate::config::*;

/// A table as read from a file, before any validation.
///
/// The first column holds the labels of the alternatives, the other columns
/// the criteria. Cells are kept verbatim.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawTable {
    pub header: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(header: Vec<String>, records: Vec<Vec<String>>) -> RawTable {
        RawTable { header, records }
    }

    pub fn num_columns(&self) -> usize {
        self.header.len()
    }
}

/// Everything the engine needs, validated.
#[derive(PartialEq, Debug, Clone)]
pub struct ValidatedInput {
    pub matrix: DecisionMatrix,
    pub weights: Weights,
    pub impacts: Impacts,
}

/// Validates a raw table together with the comma-separated weights and
/// impacts, e.g. `"1,1,2"` and `"+,-,+"`.
pub fn validate_table(
    table: &RawTable,
    weights: &str,
    impacts: &str,
) -> Result<ValidatedInput, TopsisError> {
    let matrix = parse_matrix(table)?;
    let weights = parse_weights(weights, matrix.num_criteria())?;
    let impacts = parse_impacts(impacts, matrix.num_criteria())?;
    debug!(
        "validate_table: {:?} alternatives, weights: {:?}, impacts: {:?}",
        matrix.num_alternatives(),
        weights,
        impacts
    );
    Ok(ValidatedInput {
        matrix,
        weights,
        impacts,
    })
}

/// Converts the criterion columns of a raw table into numbers.
pub fn parse_matrix(table: &RawTable) -> Result<DecisionMatrix, TopsisError> {
    if table.num_columns() < 3 {
        return InsufficientColumnsSnafu {
            columns: table.num_columns(),
        }
        .fail();
    }
    let criteria: Vec<String> = table.header[1..].to_vec();

    let mut alternatives: Vec<Alternative> = Vec::with_capacity(table.records.len());
    for (idx, record) in table.records.iter().enumerate() {
        // Rows are numbered from 1, not counting the header.
        let row = idx + 1;
        if record.len() > table.num_columns() {
            return RowLengthMismatchSnafu {
                label: record.first().cloned().unwrap_or_default(),
                expected: criteria.len(),
                found: record.len() - 1,
            }
            .fail();
        }
        let mut values: Vec<f64> = Vec::with_capacity(criteria.len());
        for (col, name) in criteria.iter().enumerate() {
            // A short record is treated as missing values.
            let cell = record.get(col + 1).map(|s| s.as_str()).unwrap_or("");
            let value = parse_cell(cell).context(NonNumericDataSnafu {
                row,
                column: name.clone(),
                value: cell.to_string(),
            })?;
            values.push(value);
        }
        alternatives.push(Alternative {
            label: record.first().cloned().unwrap_or_default(),
            values,
        });
    }
    DecisionMatrix::new(criteria, alternatives)
}

fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses comma-separated weights. Every token must be a number before the
/// count is checked against the number of criteria.
pub fn parse_weights(s: &str, num_criteria: usize) -> Result<Weights, TopsisError> {
    let mut weights: Vec<f64> = Vec::new();
    for token in s.split(',').map(str::trim) {
        let w = token.parse::<f64>().ok().context(WeightParseSnafu {
            token: token.to_string(),
        })?;
        weights.push(w);
    }
    if weights.len() != num_criteria {
        return WeightCountMismatchSnafu {
            expected: num_criteria,
            found: weights.len(),
        }
        .fail();
    }
    Weights::new(weights)
}

/// Parses comma-separated impacts. The count is checked before the symbols.
pub fn parse_impacts(s: &str, num_criteria: usize) -> Result<Impacts, TopsisError> {
    let tokens: Vec<&str> = s.split(',').map(str::trim).collect();
    if tokens.len() != num_criteria {
        return ImpactCountMismatchSnafu {
            expected: num_criteria,
            found: tokens.len(),
        }
        .fail();
    }
    let mut impacts: Vec<Impact> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let impact = Impact::from_symbol(token).context(InvalidImpactSymbolSnafu {
            token: token.to_string(),
        })?;
        impacts.push(impact);
    }
    Ok(Impacts::new(impacts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> RawTable {
        let mut it = rows
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect::<Vec<String>>());
        let header = it.next().unwrap();
        RawTable::new(header, it.collect())
    }

    fn fixture() -> RawTable {
        table(&[
            &["Model", "Price", "Storage", "Camera"],
            &["M1", "250", "16", "12"],
            &["M2", "200", "16", "8"],
            &["M3", "300", "32", "16"],
        ])
    }

    #[test]
    fn valid_input() {
        let v = validate_table(&fixture(), "1, 2,3", "+,-, +").unwrap();
        assert_eq!(v.matrix.num_alternatives(), 3);
        assert_eq!(v.matrix.criteria(), &["Price", "Storage", "Camera"]);
        assert_eq!(v.matrix.labels(), vec!["M1", "M2", "M3"]);
        assert_eq!(v.weights.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(
            v.impacts.as_slice(),
            &[Impact::Maximize, Impact::Minimize, Impact::Maximize]
        );
    }

    #[test]
    fn two_columns_are_not_enough() {
        let t = table(&[&["Model", "Price"], &["M1", "250"], &["M2", "200"]]);
        assert_eq!(
            validate_table(&t, "1", "+").unwrap_err(),
            TopsisError::InsufficientColumns { columns: 2 }
        );
    }

    #[test]
    fn columns_checked_before_values() {
        let t = table(&[&["Model", "Price"], &["M1", "cheap"]]);
        assert!(matches!(
            validate_table(&t, "x", "*").unwrap_err(),
            TopsisError::InsufficientColumns { .. }
        ));
    }

    #[test]
    fn non_numeric_cell() {
        let t = table(&[
            &["Model", "Price", "Storage"],
            &["M1", "250", "16"],
            &["M2", "n/a", "16"],
        ]);
        assert_eq!(
            validate_table(&t, "1,1", "+,+").unwrap_err(),
            TopsisError::NonNumericData {
                row: 2,
                column: "Price".to_string(),
                value: "n/a".to_string()
            }
        );
    }

    #[test]
    fn missing_and_infinite_cells() {
        let t = table(&[&["Model", "Price", "Storage"], &["M1", "250", ""]]);
        assert!(matches!(
            parse_matrix(&t).unwrap_err(),
            TopsisError::NonNumericData { row: 1, .. }
        ));
        let t = table(&[&["Model", "Price", "Storage"], &["M1", "250"]]);
        assert!(matches!(
            parse_matrix(&t).unwrap_err(),
            TopsisError::NonNumericData { row: 1, .. }
        ));
        let t = table(&[&["Model", "Price", "Storage"], &["M1", "inf", "3"]]);
        assert!(matches!(
            parse_matrix(&t).unwrap_err(),
            TopsisError::NonNumericData { .. }
        ));
    }

    #[test]
    fn empty_table() {
        let t = table(&[&["Model", "Price", "Storage"]]);
        assert_eq!(parse_matrix(&t).unwrap_err(), TopsisError::EmptyMatrix {});
    }

    #[test]
    fn long_record() {
        let t = table(&[&["Model", "Price", "Storage"], &["M1", "1", "2", "3"]]);
        assert!(matches!(
            parse_matrix(&t).unwrap_err(),
            TopsisError::RowLengthMismatch {
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn weight_count_mismatch() {
        assert_eq!(
            validate_table(&fixture(), "1,2", "+,+,+").unwrap_err(),
            TopsisError::WeightCountMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn weight_parse_error() {
        assert_eq!(
            validate_table(&fixture(), "1,two,3", "+,+,+").unwrap_err(),
            TopsisError::WeightParseError {
                token: "two".to_string()
            }
        );
        // Parsing comes before counting.
        assert!(matches!(
            parse_weights("1;2;3", 3).unwrap_err(),
            TopsisError::WeightParseError { .. }
        ));
    }

    #[test]
    fn weight_must_be_positive() {
        assert!(matches!(
            parse_weights("1,0,3", 3).unwrap_err(),
            TopsisError::InvalidWeight { index: 1, .. }
        ));
        assert!(matches!(
            parse_weights("1,2,-3", 3).unwrap_err(),
            TopsisError::InvalidWeight { index: 2, .. }
        ));
        assert!(matches!(
            parse_weights("NaN,2,3", 3).unwrap_err(),
            TopsisError::InvalidWeight { index: 0, .. }
        ));
    }

    #[test]
    fn impact_count_mismatch() {
        assert_eq!(
            validate_table(&fixture(), "1,1,1", "+,-").unwrap_err(),
            TopsisError::ImpactCountMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn invalid_impact_symbol() {
        assert_eq!(
            validate_table(&fixture(), "1,1,1", "+,*,-").unwrap_err(),
            TopsisError::InvalidImpactSymbol {
                token: "*".to_string()
            }
        );
        // Count is checked first.
        assert!(matches!(
            parse_impacts("+,*", 3).unwrap_err(),
            TopsisError::ImpactCountMismatch { .. }
        ));
    }

    #[test]
    fn weights_checked_before_impacts() {
        assert!(matches!(
            validate_table(&fixture(), "1,1", "?").unwrap_err(),
            TopsisError::WeightCountMismatch { .. }
        ));
    }
}
