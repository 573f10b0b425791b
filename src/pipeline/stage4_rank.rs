use std::cmp::Ordering;

use crate::model::ScoreSet;
use crate::pipeline::stage3_merge::Level;
use crate::report::{LevelReport, LevelSelection, RankedEntry, RowReport, RunReport};
use crate::stats::{percentile, weighted_mean};

/// Ranks `columns` by `z`, best first. Ties keep column order.
pub fn rank(columns: &[String], z: &[f64]) -> Vec<RankedEntry> {
    let mut order = (0..columns.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| z[b].partial_cmp(&z[a]).unwrap_or(Ordering::Equal));
    order
        .into_iter()
        .map(|i| RankedEntry {
            name: columns[i].clone(),
            percentile: percentile(z[i]),
        })
        .collect()
}

/// Row-weighted mean z-score of every column.
pub fn composite_z(set: &ScoreSet) -> Vec<f64> {
    let weights = set.row_weights();
    (0..set.n_columns())
        .map(|j| match weighted_mean(&set.column(j), weights) {
            Some(z) => z,
            None => {
                tracing::warn!(
                    column = %set.columns()[j],
                    "row weights sum to zero; composite score set to 0"
                );
                0.0
            }
        })
        .collect()
}

pub fn build_level_report(level: &Level) -> LevelReport {
    let set = &level.set;
    let rows = set
        .rows()
        .iter()
        .zip(set.row_weights())
        .enumerate()
        .map(|(i, (axis, &weight))| RowReport {
            axis: axis.clone(),
            weight,
            scores: set.row(i).to_vec(),
            ranking: rank(set.columns(), set.row(i)),
        })
        .collect();
    LevelReport {
        name: level.name.clone(),
        columns: set.columns().to_vec(),
        rows,
        composite: rank(set.columns(), &composite_z(set)),
    }
}

/// Builds the report for `levels` (root last).
pub fn run_stage4(
    levels: &[Level],
    n_alternatives: usize,
    selection: LevelSelection,
) -> RunReport {
    let selected = match selection {
        LevelSelection::All => levels,
        LevelSelection::Final => &levels[levels.len().saturating_sub(1)..],
    };
    let levels = selected.iter().map(build_level_report).collect::<Vec<_>>();
    let final_ranking = levels
        .last()
        .map(|l| l.composite.clone())
        .unwrap_or_default();
    RunReport {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        alternatives: n_alternatives,
        levels,
        final_ranking,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_rank.rs"]
mod tests;
