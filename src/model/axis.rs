use serde::{Deserialize, Serialize};

use crate::model::metric::Metric;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreGoal {
    /// Higher raw values are better.
    Bigger,
    /// Lower raw values are better.
    Smaller,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    pub label: String,
    pub goal: ScoreGoal,
}

impl Axis {
    pub fn new(label: impl Into<String>, goal: ScoreGoal) -> Self {
        Self {
            label: label.into(),
            goal,
        }
    }

    pub fn bigger(label: impl Into<String>) -> Self {
        Self::new(label, ScoreGoal::Bigger)
    }

    pub fn smaller(label: impl Into<String>) -> Self {
        Self::new(label, ScoreGoal::Smaller)
    }
}

/// A leaf axis as declared in a scenario: label, goal and how to compute the raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDef {
    pub label: String,
    pub goal: ScoreGoal,
    pub value: Metric,
}

impl AxisDef {
    pub fn axis(&self) -> Axis {
        Axis::new(self.label.clone(), self.goal)
    }
}
