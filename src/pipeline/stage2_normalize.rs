use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Alternative, AxisDef, ScoreSet, ScoringProfile};
use crate::pipeline::RunError;

#[derive(Debug, Clone)]
pub struct Stage2Inputs<'a> {
    pub axes: &'a [AxisDef],
    pub alternatives: &'a [Alternative],
    pub vars: &'a BTreeMap<String, f64>,
    /// Restricts scoring to these axis labels; `None` scores every axis.
    pub used: Option<&'a BTreeSet<&'a str>>,
}

#[derive(Debug, Clone)]
pub struct Stage2Output {
    /// Leaf score sets keyed by axis label.
    pub leaves: BTreeMap<String, ScoreSet>,
}

pub fn run_stage2(
    inputs: &Stage2Inputs<'_>,
    profile: &ScoringProfile,
) -> Result<Stage2Output, RunError> {
    let mut leaves = BTreeMap::new();
    for def in inputs.axes {
        if let Some(used) = inputs.used {
            if !used.contains(def.label.as_str()) {
                continue;
            }
        }
        let extractor = def.value.bind(inputs.vars);
        let set = ScoreSet::from_axis(&def.axis(), inputs.alternatives, &extractor, profile)?;
        tracing::debug!(axis = %def.label, goal = ?def.goal, "normalized axis");
        leaves.insert(def.label.clone(), set);
    }
    tracing::info!(
        axes = leaves.len(),
        alternatives = inputs.alternatives.len(),
        "built leaf score sets"
    );
    Ok(Stage2Output { leaves })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_normalize.rs"]
mod tests;
