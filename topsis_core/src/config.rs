// ********* Input data structures ***********

use snafu::Snafu;

/// The direction of desirability of a criterion.
///
/// On the command line and in tables, `+` means that larger values are better
/// and `-` means that smaller values are better.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Impact {
    Maximize,
    Minimize,
}

impl Impact {
    /// Parses a single impact symbol. Only `+` and `-` are accepted.
    pub fn from_symbol(s: &str) -> Option<Impact> {
        match s {
            "+" => Some(Impact::Maximize),
            "-" => Some(Impact::Minimize),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Impact::Maximize => "+",
            Impact::Minimize => "-",
        }
    }
}

/// One impact per criterion, in column order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Impacts(Vec<Impact>);

impl Impacts {
    pub fn new(impacts: Vec<Impact>) -> Impacts {
        Impacts(impacts)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Impact] {
        &self.0
    }
}

/// One weight per criterion, in column order.
///
/// Weights must be positive and finite. They are used as given: the
/// scores do not depend on their sum, so callers may pass raw or
/// normalized weights.
#[derive(PartialEq, Debug, Clone)]
pub struct Weights(Vec<f64>);

impl Weights {
    pub fn new(weights: Vec<f64>) -> Result<Weights, TopsisError> {
        for (index, value) in weights.iter().enumerate() {
            if !(value.is_finite() && *value > 0.0) {
                return InvalidWeightSnafu {
                    index,
                    value: *value,
                }
                .fail();
            }
        }
        Ok(Weights(weights))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// An alternative: a label and its value for each criterion.
#[derive(PartialEq, Debug, Clone)]
pub struct Alternative {
    pub label: String,
    pub values: Vec<f64>,
}

/// The decision matrix: alternatives in rows, criteria in columns.
///
/// Invariants, checked at construction:
/// - at least two criteria
/// - at least one alternative
/// - every alternative has one finite value per criterion
#[derive(PartialEq, Debug, Clone)]
pub struct DecisionMatrix {
    criteria: Vec<String>,
    alternatives: Vec<Alternative>,
}

impl DecisionMatrix {
    pub fn new(
        criteria: Vec<String>,
        alternatives: Vec<Alternative>,
    ) -> Result<DecisionMatrix, TopsisError> {
        if criteria.len() < 2 {
            // The label column counts as a column for the user.
            return InsufficientColumnsSnafu {
                columns: criteria.len() + 1,
            }
            .fail();
        }
        for (row, alt) in alternatives.iter().enumerate() {
            if alt.values.len() != criteria.len() {
                return RowLengthMismatchSnafu {
                    label: alt.label.clone(),
                    expected: criteria.len(),
                    found: alt.values.len(),
                }
                .fail();
            }
            for (value, name) in alt.values.iter().zip(criteria.iter()) {
                if !value.is_finite() {
                    return NonNumericDataSnafu {
                        row: row + 1,
                        column: name.clone(),
                        value: value.to_string(),
                    }
                    .fail();
                }
            }
        }
        if alternatives.is_empty() {
            return EmptyMatrixSnafu {}.fail();
        }
        Ok(DecisionMatrix {
            criteria,
            alternatives,
        })
    }

    /// Builds a matrix with generated criterion names `C1`, `C2`, ...
    pub fn from_rows(rows: &[(&str, Vec<f64>)]) -> Result<DecisionMatrix, TopsisError> {
        let width = rows.first().map(|(_, v)| v.len()).unwrap_or(0);
        let alternatives = rows
            .iter()
            .map(|(label, values)| Alternative {
                label: label.to_string(),
                values: values.clone(),
            })
            .collect();
        DecisionMatrix::new(default_criterion_names(width), alternatives)
    }

    pub fn criteria(&self) -> &[String] {
        &self.criteria
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    pub fn num_criteria(&self) -> usize {
        self.criteria.len()
    }

    pub fn num_alternatives(&self) -> usize {
        self.alternatives.len()
    }

    pub fn labels(&self) -> Vec<String> {
        self.alternatives.iter().map(|a| a.label.clone()).collect()
    }
}

pub(crate) fn default_criterion_names(count: usize) -> Vec<String> {
    (1..=count).map(|idx| format!("C{}", idx)).collect()
}

// ******** Output data structures *********

/// Intermediate values of one computation, kept for reporting.
#[derive(PartialEq, Debug, Clone)]
pub struct TopsisStats {
    pub ideal_best: Vec<f64>,
    pub ideal_worst: Vec<f64>,
    pub distance_to_best: Vec<f64>,
    pub distance_to_worst: Vec<f64>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct TopsisResult {
    /// Closeness score of each alternative, in [0, 1], in input order.
    pub scores: Vec<f64>,
    /// Dense rank of each alternative (1 is the best), in input order.
    pub ranks: Vec<u32>,
    pub stats: TopsisStats,
}

/// Errors that prevent the ranking from completing.
///
/// All of them are terminal: no partial result is produced.
#[derive(PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub))]
pub enum TopsisError {
    #[snafu(display("Input file not found: {path}"))]
    InputNotFound { path: String },

    #[snafu(display("Unable to read input file {path}: {reason}"))]
    UnreadableInput { path: String, reason: String },

    #[snafu(display(
        "Input must contain three or more columns (a label and at least two criteria), found {columns}"
    ))]
    InsufficientColumns { columns: usize },

    #[snafu(display("Input does not contain any alternative"))]
    EmptyMatrix {},

    #[snafu(display("Non-numeric value {value:?} in column {column:?} at row {row}"))]
    NonNumericData {
        row: usize,
        column: String,
        value: String,
    },

    #[snafu(display("Alternative {label:?} has {found} values, expected {expected}"))]
    RowLengthMismatch {
        label: String,
        expected: usize,
        found: usize,
    },

    #[snafu(display("Number of weights ({found}) does not match number of criteria ({expected})"))]
    WeightCountMismatch { expected: usize, found: usize },

    #[snafu(display("Weight {token:?} is not a number"))]
    WeightParseError { token: String },

    #[snafu(display("Weight #{} must be a positive number, got {value}", index + 1))]
    InvalidWeight { index: usize, value: f64 },

    #[snafu(display("Number of impacts ({found}) does not match number of criteria ({expected})"))]
    ImpactCountMismatch { expected: usize, found: usize },

    #[snafu(display("Impacts must be either + or -, got {token:?}"))]
    InvalidImpactSymbol { token: String },

    #[snafu(display("Criterion {column:?} only contains zeros"))]
    DegenerateColumn { column: String },
}

// ********* Configuration **********

/// What to do with a criterion whose values are all zero.
///
/// Such a column has a zero Euclidean norm and cannot be normalized.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DegenerateColumnPolicy {
    /// Fail with `TopsisError::DegenerateColumn`.
    Reject,
    /// Treat every normalized value of the column as zero. The column then
    /// has no effect on the ranking.
    ZeroFill,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TopsisRules {
    pub degenerate_column: DegenerateColumnPolicy,
}

impl TopsisRules {
    pub const DEFAULT_RULES: TopsisRules = TopsisRules {
        degenerate_column: DegenerateColumnPolicy::Reject,
    };
}

impl Default for TopsisRules {
    fn default() -> Self {
        TopsisRules::DEFAULT_RULES
    }
}
