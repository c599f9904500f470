// src/resume_checker/report.rs
use std::fmt::Write;

use crate::types::{AnalysisSource, NormalizedAnalysis, GENERAL_IMPROVEMENT_TIPS};

/// Plain-text rendering of a finished analysis
pub fn render_report(analysis: &NormalizedAnalysis, source: AnalysisSource) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "ATS Match Score: {}% ({})",
        analysis.score,
        analysis.band().label()
    );
    if source == AnalysisSource::Fallback {
        let _ = writeln!(out, "(mock analysis, ATS server not available)");
    }

    for line in &analysis.feedback {
        let _ = writeln!(out, "  {}", line);
    }

    let _ = writeln!(out, "\nProfile Summary\n  {}", analysis.summary_text);

    if !analysis.missing_keywords.is_empty() {
        let _ = writeln!(
            out,
            "\nMissing Keywords\n  {}",
            analysis.missing_keywords.join(", ")
        );
    }

    if !analysis.improvement_suggestions.is_empty() {
        let _ = writeln!(out, "\nSuggestions for Improvement");
        for tip in GENERAL_IMPROVEMENT_TIPS {
            let _ = writeln!(out, "  - {}", tip);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume_checker::normalize;
    use crate::types::RawAnalysisResult;

    #[test]
    fn test_report_sections() {
        let analysis = normalize(&RawAnalysisResult::from_fields(
            "88%",
            vec!["Kubernetes".to_string(), "Terraform".to_string()],
            "Strong match.",
        ))
        .unwrap();

        let report = render_report(&analysis, AnalysisSource::Remote);
        assert!(report.starts_with("ATS Match Score: 88% (strong match)"));
        assert!(report.contains("Missing Keywords\n  Kubernetes, Terraform"));
        assert!(report.contains("Profile Summary\n  Strong match."));
        assert!(report.contains("  - Tailor your experience section to better match this job"));
        assert!(!report.contains("mock analysis"));
    }

    #[test]
    fn test_report_flags_fallback_and_hides_empty_keywords() {
        let analysis = normalize(&RawAnalysisResult::from_fields(61, vec![], "ok")).unwrap();
        let report = render_report(&analysis, AnalysisSource::Fallback);
        assert!(report.contains("(moderate match)"));
        assert!(report.contains("mock analysis"));
        assert!(!report.contains("Missing Keywords"));
    }
}
