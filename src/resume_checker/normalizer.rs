// src/resume_checker/normalizer.rs
//! Turns either producer's raw payload into the fixed result shape

use serde_json::Value;
use std::collections::BTreeSet;
use tracing::debug;

use crate::error::AnalysisError;
use crate::types::{NormalizedAnalysis, RawAnalysisResult};

pub const COMPLETION_MESSAGE: &str = "Analysis completed successfully";

pub fn normalize(raw: &RawAnalysisResult) -> Result<NormalizedAnalysis, AnalysisError> {
    let score = coerce_score(raw.jd_match())?;
    let summary = coerce_summary(raw.profile_summary())?;
    let missing_keywords = coerce_keywords(raw.missing_keywords())?;

    Ok(NormalizedAnalysis {
        score,
        feedback: vec![
            format!("Your resume is a {}% match with the job description", score),
            COMPLETION_MESSAGE.to_string(),
        ],
        keyword_matches: BTreeSet::new(),
        missing_keywords,
        improvement_suggestions: vec![summary.clone()],
        summary_text: summary,
    })
}

/// "73%" and 73 both give 73. Fractions truncate toward zero. No clamping.
fn coerce_score(value: Option<&Value>) -> Result<i64, AnalysisError> {
    match value {
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
            digits
                .parse::<i64>()
                .ok()
                .or_else(|| {
                    digits
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
                .ok_or_else(|| malformed(format!("JD Match is not a percentage: {:?}", text)))
        }
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| malformed(format!("JD Match is not representable: {}", number))),
        Some(other) => Err(malformed(format!("JD Match has unexpected type: {}", other))),
        None => Err(malformed("JD Match is missing".to_string())),
    }
}

fn coerce_summary(value: Option<&Value>) -> Result<String, AnalysisError> {
    match value {
        Some(Value::String(summary)) => Ok(summary.clone()),
        Some(other) => Err(malformed(format!(
            "Profile Summary has unexpected type: {}",
            other
        ))),
        None => Err(malformed("Profile Summary is missing".to_string())),
    }
}

fn coerce_keywords(value: Option<&Value>) -> Result<Vec<String>, AnalysisError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|item| match item {
                Value::String(keyword) => Some(keyword.clone()),
                other => {
                    debug!("Skipping non-text missing keyword: {}", other);
                    None
                }
            })
            .collect()),
        Some(other) => Err(malformed(format!(
            "MissingKeywords has unexpected type: {}",
            other
        ))),
    }
}

fn malformed(reason: String) -> AnalysisError {
    AnalysisError::MalformedAnalysisResult(reason)
}
