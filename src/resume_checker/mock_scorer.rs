// src/resume_checker/mock_scorer.rs
//! Local stand-in for the ATS service, used when the remote call fails

use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Range;

use crate::types::RawAnalysisResult;

pub const REFERENCE_KEYWORDS: [&str; 19] = [
    "React",
    "JavaScript",
    "TypeScript",
    "Node.js",
    "Express",
    "Next.js",
    "API",
    "frontend",
    "backend",
    "full-stack",
    "responsive",
    "UI/UX",
    "database",
    "SQL",
    "NoSQL",
    "MongoDB",
    "testing",
    "Git",
    "Agile",
];

pub const BASE_SCORE_RANGE: Range<i64> = 65..85;
pub const MISSING_COUNT_RANGE: Range<usize> = 3..7;

const SUMMARY_KEYWORD_COUNT: usize = 3;

pub struct MockScorer;

impl MockScorer {
    /// Fabricate a plausible result. Output shape is fixed; values come from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> RawAnalysisResult {
        let base_score = rng.gen_range(BASE_SCORE_RANGE);
        let missing_count = rng.gen_range(MISSING_COUNT_RANGE);

        let missing_keywords: Vec<String> = REFERENCE_KEYWORDS
            .choose_multiple(rng, missing_count)
            .map(|k| k.to_string())
            .collect();

        let summary = Self::profile_summary(&missing_keywords);

        RawAnalysisResult::from_fields(format!("{}%", base_score), missing_keywords, summary)
    }

    fn profile_summary(missing_keywords: &[String]) -> String {
        let highlighted = missing_keywords
            .iter()
            .take(SUMMARY_KEYWORD_COUNT)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Based on your resume, you appear to have experience with several key skills \
             mentioned in the job description. However, to increase your chances of getting \
             past the ATS, consider adding more specific details about {} and other technical \
             skills mentioned in the job posting. Quantify your achievements with metrics where \
             possible, and tailor your resume to highlight the most relevant experience for this \
             specific position.",
            highlighted
        )
    }
}
