use std::collections::BTreeMap;

use crate::model::score_set::check_weights;
use crate::model::{ScoreError, ScoreSet, ScoringProfile, WeightNode};
use crate::pipeline::RunError;

/// A score set produced for one node of the weight tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub name: String,
    pub set: ScoreSet,
}

#[derive(Debug, Clone)]
pub struct Stage3Output {
    /// One level per composite node, children before their parent, the root last.
    /// A root that is a bare axis yields a single level.
    pub levels: Vec<Level>,
}

impl Stage3Output {
    pub fn root(&self) -> Option<&Level> {
        self.levels.last()
    }
}

pub fn run_stage3(
    root: &WeightNode,
    leaves: &BTreeMap<String, ScoreSet>,
    profile: &ScoringProfile,
) -> Result<Stage3Output, RunError> {
    let mut levels = Vec::with_capacity(root.composite_count().max(1));
    let set = merge_node(root, leaves, profile, &mut levels)?;
    if let WeightNode::Axis { label } = root {
        levels.push(Level {
            name: label.clone(),
            set,
        });
    }
    Ok(Stage3Output { levels })
}

/// Applies the merge weight checks to every composite node without scoring anything.
/// Nodes are visited in merge order, so the first failure matches what `run_stage3`
/// reports for the same tree.
pub fn validate_weights(node: &WeightNode, profile: &ScoringProfile) -> Result<(), RunError> {
    let WeightNode::Composite {
        name,
        children,
        weights,
    } = node
    else {
        return Ok(());
    };
    for child in children {
        validate_weights(child, profile)?;
    }
    let checked = if children.len() < 2 {
        Err(ScoreError::TooFewSets {
            found: children.len(),
        })
    } else if let Some(weights) = weights {
        check_weights(children.len(), weights, profile.weight_tolerance)
    } else {
        Ok(())
    };
    checked.map_err(|source| RunError::Merge {
        node: name.clone(),
        source,
    })
}

fn merge_node(
    node: &WeightNode,
    leaves: &BTreeMap<String, ScoreSet>,
    profile: &ScoringProfile,
    levels: &mut Vec<Level>,
) -> Result<ScoreSet, RunError> {
    match node {
        WeightNode::Axis { label } => leaves
            .get(label)
            .cloned()
            .ok_or_else(|| RunError::MissingAxis(label.clone())),
        WeightNode::Composite {
            name,
            children,
            weights,
        } => {
            let sets = children
                .iter()
                .map(|child| merge_node(child, leaves, profile, levels))
                .collect::<Result<Vec<_>, _>>()?;
            let refs = sets.iter().collect::<Vec<_>>();
            let set = ScoreSet::merge(&refs, weights.as_deref(), profile).map_err(|source| {
                RunError::Merge {
                    node: name.clone(),
                    source,
                }
            })?;
            levels.push(Level {
                name: name.clone(),
                set: set.clone(),
            });
            Ok(set)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_merge.rs"]
mod tests;
