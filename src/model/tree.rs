use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    #[error("tree node `{0}` declares both `axis` and `children`")]
    AxisWithChildren(String),
    #[error("composite node needs a `name`")]
    MissingName,
    #[error("composite node `{name}` needs at least 2 children, got {found}")]
    TooFewChildren { name: String, found: usize },
    #[error("composite node `{0}` mixes weighted and unweighted children")]
    PartialWeights(String),
    #[error("the root of the weight tree cannot carry a weight")]
    WeightedRoot,
    #[error("tree references undefined axis `{0}`")]
    UnknownAxis(String),
}

/// One node of a weight tree: either a reference to a leaf axis or a weighted
/// combination of child nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub enum WeightNode {
    Axis {
        label: String,
    },
    Composite {
        name: String,
        children: Vec<WeightNode>,
        /// `None` splits equally between the children.
        weights: Option<Vec<f64>>,
    },
}

/// Root of a weight tree as stored in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct WeightTree {
    pub root: WeightNode,
}

/// Serialized shape of a tree node: a map with an optional `weight` and either `axis`
/// or `name` plus `children`.
#[doc(hidden)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    axis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<RawNode>,
}

impl WeightNode {
    pub fn axis(label: impl Into<String>) -> Self {
        WeightNode::Axis {
            label: label.into(),
        }
    }

    pub fn equal(name: impl Into<String>, children: Vec<WeightNode>) -> Self {
        WeightNode::Composite {
            name: name.into(),
            children,
            weights: None,
        }
    }

    pub fn weighted(name: impl Into<String>, children: Vec<(f64, WeightNode)>) -> Self {
        let (weights, children) = children.into_iter().unzip();
        WeightNode::Composite {
            name: name.into(),
            children,
            weights: Some(weights),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            WeightNode::Axis { label } => label,
            WeightNode::Composite { name, .. } => name,
        }
    }

    /// Leaf axis labels in depth-first order.
    pub fn axis_labels(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_labels(&mut out);
        out
    }

    fn collect_labels<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            WeightNode::Axis { label } => out.push(label),
            WeightNode::Composite { children, .. } => {
                for child in children {
                    child.collect_labels(out);
                }
            }
        }
    }

    /// Share of the root weight every leaf ends up with, in depth-first order. These
    /// are the row weights the merged root score set will carry.
    ///
    /// Assumes one weight per child wherever weights are given, which parsed trees
    /// guarantee. A built tree with a short weight list yields NaN for the uncovered
    /// children; check such trees with `pipeline::stage3_merge::validate_weights` first.
    pub fn effective_weights(&self) -> Vec<(String, f64)> {
        let mut out = Vec::new();
        self.collect_weights(1.0, &mut out);
        out
    }

    fn collect_weights(&self, share: f64, out: &mut Vec<(String, f64)>) {
        match self {
            WeightNode::Axis { label } => out.push((label.clone(), share)),
            WeightNode::Composite {
                children, weights, ..
            } => {
                let equal = 1.0 / children.len() as f64;
                for (i, child) in children.iter().enumerate() {
                    let w = weights
                        .as_ref()
                        .map_or(Some(equal), |w| w.get(i).copied())
                        .unwrap_or(f64::NAN);
                    child.collect_weights(share * w, out);
                }
            }
        }
    }

    /// Number of composite nodes, i.e. merges the tree performs.
    pub fn composite_count(&self) -> usize {
        match self {
            WeightNode::Axis { .. } => 0,
            WeightNode::Composite { children, .. } => {
                1 + children.iter().map(|c| c.composite_count()).sum::<usize>()
            }
        }
    }

    /// Checks that every referenced axis is defined.
    pub fn check_axes(&self, defined: &BTreeSet<&str>) -> Result<(), TreeError> {
        for label in self.axis_labels() {
            if !defined.contains(label) {
                return Err(TreeError::UnknownAxis(label.to_string()));
            }
        }
        Ok(())
    }
}

impl TryFrom<RawNode> for WeightNode {
    type Error = TreeError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        if let Some(label) = raw.axis {
            if !raw.children.is_empty() {
                return Err(TreeError::AxisWithChildren(label));
            }
            return Ok(WeightNode::Axis { label });
        }

        let name = raw.name.ok_or(TreeError::MissingName)?;
        if raw.children.len() < 2 {
            return Err(TreeError::TooFewChildren {
                name,
                found: raw.children.len(),
            });
        }
        let n_weighted = raw.children.iter().filter(|c| c.weight.is_some()).count();
        let weights = if n_weighted == 0 {
            None
        } else if n_weighted == raw.children.len() {
            Some(raw.children.iter().filter_map(|c| c.weight).collect())
        } else {
            return Err(TreeError::PartialWeights(name));
        };
        let children = raw
            .children
            .into_iter()
            .map(WeightNode::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WeightNode::Composite {
            name,
            children,
            weights,
        })
    }
}

impl From<WeightNode> for RawNode {
    fn from(node: WeightNode) -> Self {
        match node {
            WeightNode::Axis { label } => RawNode {
                weight: None,
                axis: Some(label),
                name: None,
                children: Vec::new(),
            },
            WeightNode::Composite {
                name,
                children,
                weights,
            } => {
                let children = children
                    .into_iter()
                    .enumerate()
                    .map(|(i, child)| {
                        let mut raw = RawNode::from(child);
                        raw.weight = weights.as_ref().and_then(|w| w.get(i).copied());
                        raw
                    })
                    .collect();
                RawNode {
                    weight: None,
                    axis: None,
                    name: Some(name),
                    children,
                }
            }
        }
    }
}

impl TryFrom<RawNode> for WeightTree {
    type Error = TreeError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        if raw.weight.is_some() {
            return Err(TreeError::WeightedRoot);
        }
        Ok(WeightTree {
            root: WeightNode::try_from(raw)?,
        })
    }
}

impl From<WeightTree> for RawNode {
    fn from(tree: WeightTree) -> Self {
        RawNode::from(tree.root)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/tree.rs"]
mod tests;
