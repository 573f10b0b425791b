use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::input::InputError;
use crate::model::{Alternative, AxisDef, ScoringProfile, WeightTree, ZeroVariancePolicy};
use crate::report::LevelSelection;

/// Everything needed for one scoring run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub settings: Settings,
    /// Scenario-wide numbers metrics can refer to with `{ op: var, name: ... }`.
    #[serde(default)]
    pub vars: BTreeMap<String, f64>,
    #[serde(alias = "candidate_cities")]
    pub alternatives: Vec<Alternative>,
    pub axes: Vec<AxisDef>,
    pub tree: WeightTree,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_tolerance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero_variance: Option<ZeroVariancePolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<LevelSelection>,
}

impl Settings {
    pub fn profile(&self) -> ScoringProfile {
        ScoringProfile::strict().with_overrides(self.weight_tolerance, self.zero_variance)
    }
}

impl Scenario {
    pub fn validate(&self) -> Result<(), InputError> {
        if self.alternatives.is_empty() {
            return Err(InputError::Invalid("scenario has no alternatives".to_string()));
        }
        if let Some(t) = self.settings.weight_tolerance {
            if !t.is_finite() || t < 0.0 {
                return Err(InputError::Invalid(format!(
                    "weight_tolerance must be a non-negative number, got {t}"
                )));
            }
        }

        let mut labels = BTreeSet::new();
        for axis in &self.axes {
            if !labels.insert(axis.label.as_str()) {
                return Err(InputError::Invalid(format!(
                    "axis `{}` is defined more than once",
                    axis.label
                )));
            }
        }
        self.tree.root.check_axes(&labels)?;

        let used: BTreeSet<&str> = self.tree.root.axis_labels().into_iter().collect();
        for label in labels.difference(&used) {
            tracing::warn!(axis = %label, "axis is defined but not used by the weight tree");
        }

        let mut names = BTreeSet::new();
        for alternative in &self.alternatives {
            if !names.insert(alternative.name.as_str()) {
                tracing::warn!(
                    alternative = %alternative.name,
                    "duplicate alternative name; columns with this name are ambiguous"
                );
            }
        }
        Ok(())
    }

    pub fn axis(&self, label: &str) -> Option<&AxisDef> {
        self.axes.iter().find(|a| a.label == label)
    }
}
