use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::input::{InputError, Scenario};
use crate::model::{ScoreError, ScoringProfile};
use crate::report::{LevelSelection, RunReport};

pub mod stage2_normalize;
pub mod stage3_merge;
pub mod stage4_rank;
pub mod stage5_report;

use stage2_normalize::{Stage2Inputs, run_stage2};
use stage3_merge::run_stage3;
use stage4_rank::run_stage4;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error("cannot merge `{node}`: {source}")]
    Merge {
        node: String,
        #[source]
        source: ScoreError,
    },
    #[error("weight tree references axis `{0}` which was not scored")]
    MissingAxis(String),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Scores every alternative of `scenario` and assembles the report for the selected levels.
pub fn score_scenario(
    scenario: &Scenario,
    profile: &ScoringProfile,
    levels: LevelSelection,
) -> Result<RunReport, RunError> {
    let used: BTreeSet<&str> = scenario.tree.root.axis_labels().into_iter().collect();
    let stage2 = run_stage2(
        &Stage2Inputs {
            axes: &scenario.axes,
            alternatives: &scenario.alternatives,
            vars: &scenario.vars,
            used: Some(&used),
        },
        profile,
    )?;
    let stage3 = run_stage3(&scenario.tree.root, &stage2.leaves, profile)?;
    Ok(run_stage4(
        &stage3.levels,
        scenario.alternatives.len(),
        levels,
    ))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
