use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ZeroVariancePolicy {
    /// An axis whose raw values are all identical becomes an all-zero row.
    Zero,
    /// An axis whose raw values are all identical aborts the run.
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringProfile {
    /// Allowed `|sum(weights) - 1.0|` for an explicitly weighted merge.
    pub weight_tolerance: f64,
    pub zero_variance: ZeroVariancePolicy,
}

impl ScoringProfile {
    pub fn strict() -> Self {
        Self {
            weight_tolerance: 0.0,
            zero_variance: ZeroVariancePolicy::Zero,
        }
    }

    pub fn tolerant() -> Self {
        let mut base = Self::strict();
        base.weight_tolerance = 1e-9;
        base
    }

    /// Applies optional overrides, later sources winning.
    pub fn with_overrides(
        mut self,
        weight_tolerance: Option<f64>,
        zero_variance: Option<ZeroVariancePolicy>,
    ) -> Self {
        if let Some(t) = weight_tolerance {
            self.weight_tolerance = t;
        }
        if let Some(z) = zero_variance {
            self.zero_variance = z;
        }
        self
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::strict()
    }
}
