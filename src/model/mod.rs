pub mod alternative;
pub mod axis;
pub mod metric;
pub mod profile;
pub mod score_set;
pub mod tree;

pub use alternative::{Alternative, Attribute, Named};
pub use axis::{Axis, AxisDef, ScoreGoal};
pub use metric::{ExtractError, Extractor, Metric};
pub use profile::{ScoringProfile, ZeroVariancePolicy};
pub use score_set::{ScoreError, ScoreSet};
pub use tree::{TreeError, WeightNode, WeightTree};
