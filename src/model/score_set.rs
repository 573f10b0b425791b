use thiserror::Error;

use crate::model::alternative::Named;
use crate::model::axis::{Axis, ScoreGoal};
use crate::model::metric::{ExtractError, Extractor};
use crate::model::profile::{ScoringProfile, ZeroVariancePolicy};
use crate::stats;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("axis `{axis}` has no alternatives to score")]
    NoAlternatives { axis: String },
    #[error("axis `{axis}`: {source} for `{alternative}`")]
    Extract {
        axis: String,
        alternative: String,
        #[source]
        source: ExtractError,
    },
    #[error("axis `{axis}`: raw value for `{alternative}` is not finite ({value})")]
    NonFinite {
        axis: String,
        alternative: String,
        value: f64,
    },
    #[error("axis `{axis}` has zero variance across all alternatives")]
    ZeroVariance { axis: String },
    #[error("axis `{axis}` has {found} raw values for {expected} columns")]
    RawLength {
        axis: String,
        expected: usize,
        found: usize,
    },
    #[error("merge needs at least 2 score sets, got {found}")]
    TooFewSets { found: usize },
    #[error("merge input {index} does not have the same alternatives in the same order as input 0")]
    ColumnMismatch { index: usize },
    #[error("merge has {sets} score sets but {weights} weights")]
    WeightCount { sets: usize, weights: usize },
    #[error("merge weight {index} is invalid ({weight})")]
    InvalidWeight { index: usize, weight: f64 },
    #[error("merge weights must sum to 1.0, got {sum}")]
    WeightSum { sum: f64 },
}

/// Normalized scores: one row per axis, one column per alternative.
///
/// Leaf sets hold the z-scores of a single axis. Merged sets hold the rows of their
/// inputs, in input order, with row weights rescaled by each input's share.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSet {
    columns: Vec<String>,
    rows: Vec<String>,
    row_weights: Vec<f64>,
    matrix: Vec<Vec<f64>>,
}

impl ScoreSet {
    pub fn from_axis<A, E>(
        axis: &Axis,
        alternatives: &[A],
        extractor: &E,
        profile: &ScoringProfile,
    ) -> Result<Self, ScoreError>
    where
        A: Named,
        E: Extractor<A> + ?Sized,
    {
        let mut columns = Vec::with_capacity(alternatives.len());
        let mut raw = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            let value = extractor
                .extract(alternative)
                .map_err(|source| ScoreError::Extract {
                    axis: axis.label.clone(),
                    alternative: alternative.name().to_string(),
                    source,
                })?;
            columns.push(alternative.name().to_string());
            raw.push(value);
        }
        Self::from_raw(axis, columns, &raw, profile)
    }

    /// Builds a leaf set from already extracted raw values, `raw[i]` belonging to `columns[i]`.
    pub fn from_raw(
        axis: &Axis,
        columns: Vec<String>,
        raw: &[f64],
        profile: &ScoringProfile,
    ) -> Result<Self, ScoreError> {
        if raw.len() != columns.len() {
            return Err(ScoreError::RawLength {
                axis: axis.label.clone(),
                expected: columns.len(),
                found: raw.len(),
            });
        }
        if raw.is_empty() {
            return Err(ScoreError::NoAlternatives {
                axis: axis.label.clone(),
            });
        }
        for (name, &value) in columns.iter().zip(raw) {
            if !value.is_finite() {
                return Err(ScoreError::NonFinite {
                    axis: axis.label.clone(),
                    alternative: name.clone(),
                    value,
                });
            }
        }

        let row = normalize(raw, axis.goal);
        let row = match row {
            Some(row) => row,
            None => match profile.zero_variance {
                ZeroVariancePolicy::Zero => {
                    tracing::warn!(
                        axis = %axis.label,
                        "axis has no discriminating signal; scoring every alternative 0"
                    );
                    vec![0.0; raw.len()]
                }
                ZeroVariancePolicy::Reject => {
                    return Err(ScoreError::ZeroVariance {
                        axis: axis.label.clone(),
                    });
                }
            },
        };

        Ok(Self {
            columns,
            rows: vec![axis.label.clone()],
            row_weights: vec![1.0],
            matrix: vec![row],
        })
    }

    /// Concatenates the rows of `sets` into a new set.
    ///
    /// With `weights`, every row weight of `sets[i]` is multiplied by `weights[i]`; the
    /// weights must sum to 1.0 within `profile.weight_tolerance`. Without, every row
    /// weight is divided by `sets.len()`.
    pub fn merge(
        sets: &[&ScoreSet],
        weights: Option<&[f64]>,
        profile: &ScoringProfile,
    ) -> Result<ScoreSet, ScoreError> {
        if sets.len() < 2 {
            return Err(ScoreError::TooFewSets { found: sets.len() });
        }
        if let Some(weights) = weights {
            check_weights(sets.len(), weights, profile.weight_tolerance)?;
        }

        let columns = &sets[0].columns;
        for (index, set) in sets.iter().enumerate().skip(1) {
            if &set.columns != columns {
                return Err(ScoreError::ColumnMismatch { index });
            }
        }

        let n_rows = sets.iter().map(|s| s.rows.len()).sum();
        let mut merged = ScoreSet {
            columns: columns.clone(),
            rows: Vec::with_capacity(n_rows),
            row_weights: Vec::with_capacity(n_rows),
            matrix: Vec::with_capacity(n_rows),
        };
        let equal_share = 1.0 / sets.len() as f64;
        for (i, set) in sets.iter().enumerate() {
            let share = weights.map(|w| w[i]);
            for ((label, &weight), row) in set.rows.iter().zip(&set.row_weights).zip(&set.matrix) {
                merged.rows.push(label.clone());
                merged.row_weights.push(match share {
                    Some(share) => weight * share,
                    None => weight * equal_share,
                });
                merged.matrix.push(row.clone());
            }
        }

        tracing::debug!(
            inputs = sets.len(),
            rows = merged.rows.len(),
            weight_sum = merged.weight_sum(),
            "merged score sets"
        );
        Ok(merged)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn row_weights(&self) -> &[f64] {
        &self.row_weights
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.matrix[row]
    }

    pub fn column(&self, column: usize) -> Vec<f64> {
        self.matrix.iter().map(|row| row[column]).collect()
    }

    pub fn weight_sum(&self) -> f64 {
        self.row_weights.iter().sum()
    }
}

/// Z-score normalization of one row; `None` when the values have zero variance.
fn normalize(raw: &[f64], goal: ScoreGoal) -> Option<Vec<f64>> {
    // Identical values can still leave a rounding-sized sigma behind the mean.
    if raw.iter().all(|&v| v == raw[0]) {
        return None;
    }
    // Power-of-two scaling is exact, so in-range rows are unaffected and extreme ones
    // cannot overflow `v - mu`.
    let scale = stats::range_scale(raw);
    let scaled = raw.iter().map(|&v| v * scale).collect::<Vec<_>>();
    let (mu, sigma) = stats::mean_std(&scaled);
    if sigma == 0.0 || !sigma.is_finite() {
        return None;
    }
    let sign = match goal {
        ScoreGoal::Bigger => 1.0,
        ScoreGoal::Smaller => -1.0,
    };
    Some(scaled.iter().map(|&v| sign * (v - mu) / sigma).collect())
}

/// The explicit-weight checks `merge` applies: one finite, non-negative weight per set,
/// summing to 1.0 within `tolerance`.
pub fn check_weights(n_sets: usize, weights: &[f64], tolerance: f64) -> Result<(), ScoreError> {
    if weights.len() != n_sets {
        return Err(ScoreError::WeightCount {
            sets: n_sets,
            weights: weights.len(),
        });
    }
    for (index, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ScoreError::InvalidWeight { index, weight });
        }
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > tolerance {
        return Err(ScoreError::WeightSum { sum });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/score_set.rs"]
mod tests;
