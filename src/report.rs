use serde::{Deserialize, Serialize};

use crate::board::{Board, Street};
use crate::distribution::RangeDistribution;
use crate::equity::EquityTally;
use crate::range::ParseReport;
use crate::runout::{HeatmapRow, RunoutRisk, RunoutTable};

/// Hero equity above this reads as an advantage.
pub const ADVANTAGE_THRESHOLD: f64 = 55.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Advantage,
    Disadvantage,
}

impl Verdict {
    pub fn from_equity(equity: f64) -> Self {
        if equity > ADVANTAGE_THRESHOLD {
            Verdict::Advantage
        } else {
            Verdict::Disadvantage
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Advantage => "Advantage",
            Verdict::Disadvantage => "Disadvantage",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub hero: String,
    pub villain: String,
    #[serde(default)]
    pub board: Board,
    pub iterations: Option<u32>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeSummary {
    pub notation: String,
    pub combos: usize,
    pub classes: usize,
    pub skipped: Vec<String>,
}

impl RangeSummary {
    pub fn from_parse(notation: &str, report: &ParseReport) -> Self {
        Self {
            notation: notation.to_string(),
            combos: report.range.len(),
            classes: report.range.grid().count(),
            skipped: report.skipped.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunoutReport {
    pub cards: RunoutTable,
    pub risk: RunoutRisk,
    pub heatmap: Vec<HeatmapRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub hero: RangeSummary,
    pub villain: RangeSummary,
    pub board: Board,
    pub street: Street,
    pub iterations: u32,
    pub seed: u64,
    pub equity: f64,
    pub tally: EquityTally,
    /// Absent when either range is empty.
    pub verdict: Option<Verdict>,
    /// Absent on a complete board or when either range is empty.
    pub runouts: Option<RunoutReport>,
    pub distribution: Option<RangeDistribution>,
}
