// src/types/response.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const JD_MATCH_KEY: &str = "JD Match";
pub const MISSING_KEYWORDS_KEY: &str = "MissingKeywords";
pub const PROFILE_SUMMARY_KEY: &str = "Profile Summary";

/// Loosely-typed analysis payload, as produced by the ATS service or the mock scorer.
/// Only an object shape is enforced here; field coercion happens in the normalizer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAnalysisResult(Map<String, Value>);

impl RawAnalysisResult {
    /// Wrap a JSON value, accepting objects only
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn from_fields(
        jd_match: impl Into<Value>,
        missing_keywords: Vec<String>,
        profile_summary: impl Into<String>,
    ) -> Self {
        let mut map = Map::new();
        map.insert(JD_MATCH_KEY.to_string(), jd_match.into());
        map.insert(MISSING_KEYWORDS_KEY.to_string(), Value::from(missing_keywords));
        map.insert(
            PROFILE_SUMMARY_KEY.to_string(),
            Value::String(profile_summary.into()),
        );
        Self(map)
    }

    pub fn jd_match(&self) -> Option<&Value> {
        self.0.get(JD_MATCH_KEY)
    }

    pub fn missing_keywords(&self) -> Option<&Value> {
        self.0.get(MISSING_KEYWORDS_KEY)
    }

    pub fn profile_summary(&self) -> Option<&Value> {
        self.0.get(PROFILE_SUMMARY_KEY)
    }
}

impl From<Map<String, Value>> for RawAnalysisResult {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
