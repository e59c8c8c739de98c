/*!
Ranking of alternatives with the TOPSIS method (Technique for Order of
Preference by Similarity to Ideal Solution).

Each alternative is scored by its relative closeness to an ideal-best point
and its distance from an ideal-worst point, after the criteria have been
normalized and weighted. The alternative with the highest closeness score
is ranked first.

```
use topsis_core::*;

let matrix = DecisionMatrix::from_rows(&[
    ("A", vec![250.0, 16.0, 12.0, 5.0]),
    ("B", vec![200.0, 16.0, 8.0, 3.0]),
    ("C", vec![300.0, 32.0, 16.0, 4.0]),
])?;
let weights = Weights::new(vec![1.0, 1.0, 1.0, 1.0])?;
let impacts = Impacts::new(vec![
    Impact::Maximize,
    Impact::Maximize,
    Impact::Maximize,
    Impact::Minimize,
]);

let res = compute(&matrix, &weights, &impacts)?;
assert_eq!(res.ranks[2], 1);
# Ok::<(), TopsisError>(())
```

See the [manual] for the command line program and the exact conventions
(degenerate inputs, tie handling).
*/
pub mod builder;
mod config;
pub mod manual;
pub mod validate;

use log::{debug, info, warn};

pub use crate::config::*;

// The score given to an alternative that coincides with both ideal points.
const TIE_SCORE: f64 = 0.5;

/// Ranks the alternatives of the matrix with the default rules.
///
/// Arguments:
/// * `matrix` the alternatives and their values for each criterion
/// * `weights` the importance of each criterion
/// * `impacts` whether each criterion should be maximized or minimized
pub fn compute(
    matrix: &DecisionMatrix,
    weights: &Weights,
    impacts: &Impacts,
) -> Result<TopsisResult, TopsisError> {
    compute_with_rules(matrix, weights, impacts, &TopsisRules::DEFAULT_RULES)
}

/// Ranks the alternatives of the matrix with the given rules.
pub fn compute_with_rules(
    matrix: &DecisionMatrix,
    weights: &Weights,
    impacts: &Impacts,
    rules: &TopsisRules,
) -> Result<TopsisResult, TopsisError> {
    info!(
        "Processing {:?} alternatives over {:?} criteria, rules: {:?}",
        matrix.num_alternatives(),
        matrix.num_criteria(),
        rules
    );
    check_dimensions(matrix, weights, impacts)?;

    let normalized = normalize(matrix, rules.degenerate_column)?;
    debug!("compute: normalized: {:?}", normalized);
    let weighted = apply_weights(normalized, weights.as_slice());
    debug!("compute: weighted: {:?}", weighted);

    let (ideal_best, ideal_worst) = ideal_points(&weighted, impacts.as_slice());
    debug!(
        "compute: ideal_best: {:?} ideal_worst: {:?}",
        ideal_best, ideal_worst
    );

    let distance_to_best: Vec<f64> = weighted
        .iter()
        .map(|row| euclidean_distance(row, &ideal_best))
        .collect();
    let distance_to_worst: Vec<f64> = weighted
        .iter()
        .map(|row| euclidean_distance(row, &ideal_worst))
        .collect();

    let scores: Vec<f64> = matrix
        .alternatives()
        .iter()
        .zip(distance_to_best.iter().zip(distance_to_worst.iter()))
        .map(|(alt, (d_best, d_worst))| closeness(&alt.label, *d_best, *d_worst))
        .collect();
    let ranks = dense_ranks(&scores);

    for ((alt, score), rank) in matrix.alternatives().iter().zip(&scores).zip(&ranks) {
        info!("{:>4} {:.6} {}", rank, score, alt.label);
    }

    Ok(TopsisResult {
        scores,
        ranks,
        stats: TopsisStats {
            ideal_best,
            ideal_worst,
            distance_to_best,
            distance_to_worst,
        },
    })
}

fn check_dimensions(
    matrix: &DecisionMatrix,
    weights: &Weights,
    impacts: &Impacts,
) -> Result<(), TopsisError> {
    let expected = matrix.num_criteria();
    if weights.len() != expected {
        return WeightCountMismatchSnafu {
            expected,
            found: weights.len(),
        }
        .fail();
    }
    if impacts.len() != expected {
        return ImpactCountMismatchSnafu {
            expected,
            found: impacts.len(),
        }
        .fail();
    }
    Ok(())
}

/// Divides each column by its Euclidean norm. The norm is accumulated with
/// `hypot`, which stays finite and nonzero for any finite nonzero column.
fn normalize(
    matrix: &DecisionMatrix,
    policy: DegenerateColumnPolicy,
) -> Result<Vec<Vec<f64>>, TopsisError> {
    let alternatives = matrix.alternatives();
    let mut norms: Vec<f64> = Vec::with_capacity(matrix.num_criteria());
    for (j, name) in matrix.criteria().iter().enumerate() {
        let norm = alternatives
            .iter()
            .map(|alt| alt.values[j])
            .fold(0.0, f64::hypot);
        if norm == 0.0 {
            match policy {
                DegenerateColumnPolicy::Reject => {
                    return DegenerateColumnSnafu {
                        column: name.clone(),
                    }
                    .fail();
                }
                DegenerateColumnPolicy::ZeroFill => {
                    warn!(
                        "normalize: criterion {:?} only contains zeros, it will not affect the ranking",
                        name
                    );
                }
            }
        }
        norms.push(norm);
    }
    debug!("normalize: column norms: {:?}", norms);

    Ok(alternatives
        .iter()
        .map(|alt| {
            alt.values
                .iter()
                .zip(norms.iter())
                .map(|(v, norm)| if *norm == 0.0 { 0.0 } else { v / norm })
                .collect()
        })
        .collect())
}

fn apply_weights(mut rows: Vec<Vec<f64>>, weights: &[f64]) -> Vec<Vec<f64>> {
    for row in rows.iter_mut() {
        for (v, w) in row.iter_mut().zip(weights.iter()) {
            *v *= w;
        }
    }
    rows
}

/// Returns the (best, worst) points of the weighted matrix.
fn ideal_points(rows: &[Vec<f64>], impacts: &[Impact]) -> (Vec<f64>, Vec<f64>) {
    let mut best: Vec<f64> = Vec::with_capacity(impacts.len());
    let mut worst: Vec<f64> = Vec::with_capacity(impacts.len());
    for (j, impact) in impacts.iter().enumerate() {
        let max = rows
            .iter()
            .map(|row| row[j])
            .fold(f64::NEG_INFINITY, f64::max);
        let min = rows.iter().map(|row| row[j]).fold(f64::INFINITY, f64::min);
        match impact {
            Impact::Maximize => {
                best.push(max);
                worst.push(min);
            }
            Impact::Minimize => {
                best.push(min);
                worst.push(max);
            }
        }
    }
    (best, worst)
}

fn euclidean_distance(row: &[f64], point: &[f64]) -> f64 {
    row.iter()
        .zip(point.iter())
        .map(|(a, b)| a - b)
        .fold(0.0, f64::hypot)
}

fn closeness(label: &str, d_best: f64, d_worst: f64) -> f64 {
    let total = d_best + d_worst;
    if total == 0.0 {
        // Only possible when all the alternatives are identical once weighted.
        warn!(
            "closeness: alternative {:?} coincides with both ideal points, using score {}",
            label, TIE_SCORE
        );
        TIE_SCORE
    } else {
        d_worst / total
    }
}

/// Dense ranking, highest score first: equal scores share a rank and the
/// next distinct score gets the next integer.
fn dense_ranks(scores: &[f64]) -> Vec<u32> {
    let mut distinct: Vec<f64> = scores.to_vec();
    distinct.sort_by(|a, b| b.total_cmp(a));
    distinct.dedup();
    debug!("dense_ranks: {:?} distinct scores", distinct.len());
    scores
        .iter()
        .map(|s| {
            let idx = distinct
                .binary_search_by(|d| s.total_cmp(d))
                .unwrap_or_else(|idx| idx);
            (idx + 1) as u32
        })
        .collect()
}
