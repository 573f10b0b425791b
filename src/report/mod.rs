use serde::{Deserialize, Serialize};

pub mod json;
pub mod text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LevelSelection {
    /// Every composite node of the weight tree, root last.
    All,
    /// Only the root of the weight tree.
    Final,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub percentile: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowReport {
    pub axis: String,
    pub weight: f64,
    /// Z-scores in column order.
    pub scores: Vec<f64>,
    pub ranking: Vec<RankedEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelReport {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<RowReport>,
    pub composite: Vec<RankedEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub tool: String,
    pub version: String,
    pub alternatives: usize,
    pub levels: Vec<LevelReport>,
    pub final_ranking: Vec<RankedEntry>,
}

pub fn format_percent_1(v: f64) -> String {
    format!("{:.1}", v)
}

pub fn format_z_4(v: f64) -> String {
    // Keeps `-0.0000` out of the matrix.
    let v = if v.abs() < 5e-5 { 0.0 } else { v };
    format!("{:.4}", v)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
