// src/types/analysis.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Advice listed under the improvement section of every results view
pub const GENERAL_IMPROVEMENT_TIPS: [&str; 3] = [
    "Add the missing keywords to your resume where applicable",
    "Tailor your experience section to better match this job",
    "Update your skills section to highlight relevant technologies",
];

/// Which producer the raw result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    Remote,
    Fallback,
}

/// Result shape consumed by rendering.
///
/// `score` is not clamped, so values outside 0..=100 coming from a producer are kept.
/// `keyword_matches` is never populated: producers only report missing keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedAnalysis {
    pub score: i64,
    pub feedback: Vec<String>,
    pub keyword_matches: BTreeSet<String>,
    pub missing_keywords: Vec<String>,
    pub improvement_suggestions: Vec<String>,
    pub summary_text: String,
}

impl NormalizedAnalysis {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn from_score(score: i64) -> Self {
        if score >= 80 {
            Self::Strong
        } else if score >= 60 {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Strong => "strong match",
            Self::Moderate => "moderate match",
            Self::Weak => "weak match",
        }
    }
}
