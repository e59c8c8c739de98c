pub use crate::config::*;

/// A builder for assembling a decision matrix one alternative at a time.
///
/// ```
/// pub use topsis_core::builder::Builder;
/// pub use topsis_core::{Impact, Impacts, TopsisRules, Weights};
/// # use topsis_core::TopsisError;
///
/// let mut builder = Builder::new(&TopsisRules::DEFAULT_RULES)?
///     .criteria(&["Price".to_string(), "Quality".to_string()])?;
///
/// builder.add_alternative("Anna", &[10.0, 3.0])?;
/// builder.add_alternative("Bob", &[12.0, 5.0])?;
///
/// let res = builder.compute(
///     &Weights::new(vec![1.0, 1.0])?,
///     &Impacts::new(vec![Impact::Minimize, Impact::Maximize]),
/// )?;
/// assert_eq!(res.ranks.len(), 2);
///
/// # Ok::<(), TopsisError>(())
/// ```
pub struct Builder {
    pub(crate) _rules: TopsisRules,
    pub(crate) _criteria: Option<Vec<String>>,
    pub(crate) _alternatives: Vec<Alternative>,
}

impl Builder {
    pub fn new(rules: &TopsisRules) -> Result<Builder, TopsisError> {
        Ok(Builder {
            _rules: rules.clone(),
            _criteria: None,
            _alternatives: Vec::new(),
        })
    }

    /// Declares the names of the criteria. At least two are required.
    pub fn criteria(self, names: &[String]) -> Result<Builder, TopsisError> {
        if names.len() < 2 {
            return InsufficientColumnsSnafu {
                columns: names.len() + 1,
            }
            .fail();
        }
        Ok(Builder {
            _rules: self._rules,
            _criteria: Some(names.to_vec()),
            _alternatives: Vec::new(),
        })
    }

    /// Adds an alternative with one value per criterion.
    ///
    /// If no criteria were declared, the first alternative fixes their
    /// number and they are named `C1`, `C2`, ...
    pub fn add_alternative(&mut self, label: &str, values: &[f64]) -> Result<(), TopsisError> {
        let criteria = match self._criteria.as_deref() {
            Some(names) => names.to_vec(),
            None => {
                let names = default_criterion_names(values.len());
                if names.len() < 2 {
                    return InsufficientColumnsSnafu {
                        columns: names.len() + 1,
                    }
                    .fail();
                }
                self._criteria = Some(names.clone());
                names
            }
        };
        if values.len() != criteria.len() {
            return RowLengthMismatchSnafu {
                label,
                expected: criteria.len(),
                found: values.len(),
            }
            .fail();
        }
        if let Some((col, v)) = criteria
            .iter()
            .zip(values.iter())
            .find(|(_, v)| !v.is_finite())
        {
            return NonNumericDataSnafu {
                row: self._alternatives.len() + 1,
                column: col.clone(),
                value: v.to_string(),
            }
            .fail();
        }
        self._alternatives.push(Alternative {
            label: label.to_string(),
            values: values.to_vec(),
        });
        Ok(())
    }

    pub fn build(&self) -> Result<DecisionMatrix, TopsisError> {
        let criteria = self._criteria.clone().unwrap_or_default();
        DecisionMatrix::new(criteria, self._alternatives.clone())
    }

    /// Builds the matrix and ranks it with the rules of this builder.
    pub fn compute(&self, weights: &Weights, impacts: &Impacts) -> Result<TopsisResult, TopsisError> {
        let matrix = self.build()?;
        crate::compute_with_rules(&matrix, weights, impacts, &self._rules)
    }
}
