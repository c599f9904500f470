// src/insights.rs
//! Industry insights payload: defensive coercion and dashboard-ready values

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

pub const UNKNOWN: &str = "Unknown";
const UNKNOWN_ROLE: &str = "Unknown Role";
const DEFAULT_UPDATE_INTERVAL_DAYS: i64 = 7;

const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_MONTH: i64 = 43200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryRange {
    pub role: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
}

/// One bar group of the salary chart, in thousands
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryPoint {
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DemandLevel {
    High,
    Medium,
    Low,
    Unknown,
}

impl DemandLevel {
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketOutlook {
    Positive,
    Neutral,
    Negative,
    Unknown,
}

impl MarketOutlook {
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "positive" => Self::Positive,
            "neutral" => Self::Neutral,
            "negative" => Self::Negative,
            _ => Self::Unknown,
        }
    }
}

/// Insights with every field present. Dates are `None` when the payload carried
/// something that is not a date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafeInsights {
    pub salary_ranges: Vec<SalaryRange>,
    pub growth_rate: f64,
    pub demand_level: String,
    pub top_skills: Vec<String>,
    pub market_outlook: String,
    pub key_trends: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub next_update: Option<DateTime<Utc>>,
}

impl SafeInsights {
    /// `None` for a null or non-object payload
    pub fn coerce(payload: &Value) -> Option<Self> {
        Self::coerce_at(payload, Utc::now())
    }

    pub fn coerce_at(payload: &Value, now: DateTime<Utc>) -> Option<Self> {
        let fields = payload.as_object()?;

        Some(Self {
            salary_ranges: array(fields, "salaryRanges")
                .iter()
                .map(salary_range)
                .collect(),
            growth_rate: fields
                .get("growthRate")
                .and_then(Value::as_f64)
                .unwrap_or(0.0),
            demand_level: label(fields, "demandLevel"),
            top_skills: strings(fields, "topSkills"),
            market_outlook: label(fields, "marketOutlook"),
            key_trends: strings(fields, "keyTrends"),
            recommended_skills: strings(fields, "recommendedSkills"),
            last_updated: date_or(fields.get("lastUpdated"), now),
            next_update: date_or(
                fields.get("nextUpdate"),
                now + Duration::days(DEFAULT_UPDATE_INTERVAL_DAYS),
            ),
        })
    }

    pub fn salary_chart(&self) -> Vec<SalaryPoint> {
        self.salary_ranges
            .iter()
            .map(|range| SalaryPoint {
                name: range
                    .role
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_ROLE.to_string()),
                min: range.min.map_or(0.0, |v| v / 1000.0),
                max: range.max.map_or(0.0, |v| v / 1000.0),
                median: range.median.map_or(0.0, |v| v / 1000.0),
            })
            .collect()
    }

    pub fn demand(&self) -> DemandLevel {
        DemandLevel::from_label(&self.demand_level)
    }

    pub fn outlook(&self) -> MarketOutlook {
        MarketOutlook::from_label(&self.market_outlook)
    }

    pub fn growth_label(&self) -> String {
        format!("{:.1}%", self.growth_rate)
    }

    /// Last-updated date and time until the next refresh. Both read "Unknown"
    /// if either date is unusable.
    pub fn update_labels(&self, now: DateTime<Utc>) -> (String, String) {
        match (self.last_updated, self.next_update) {
            (Some(last), Some(next)) => (
                last.format("%d/%m/%Y").to_string(),
                format_distance(now, next),
            ),
            _ => (UNKNOWN.to_string(), UNKNOWN.to_string()),
        }
    }
}

fn array<'a>(fields: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn strings(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    array(fields, key)
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn label(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => UNKNOWN.to_string(),
    }
}

fn salary_range(value: &Value) -> SalaryRange {
    let number = |key: &str| value.get(key).and_then(Value::as_f64);
    SalaryRange {
        role: value
            .get("role")
            .and_then(Value::as_str)
            .filter(|r| !r.is_empty())
            .map(str::to_string),
        min: number("min"),
        max: number("max"),
        median: number("median"),
    }
}

/// Missing or empty values take the default; anything else must parse as a date.
fn date_or(value: Option<&Value>, default: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match value {
        None | Some(Value::Null) => Some(default),
        Some(Value::String(s)) if s.is_empty() => Some(default),
        Some(Value::String(s)) => parse_date(s),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        Some(_) => None,
    }
}

/// RFC 3339 timestamp, or a bare `YYYY-MM-DD` taken as midnight UTC
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

/// Whole calendar months from `earlier` to `later`
fn calendar_months(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    let months = i64::from(later.year() - earlier.year()) * 12 + i64::from(later.month())
        - i64::from(earlier.month());
    if months > 0 && (later.day(), later.time()) < (earlier.day(), earlier.time()) {
        months - 1
    } else {
        months
    }
}

fn rounded(value: i64, unit: i64) -> i64 {
    (value as f64 / unit as f64).round() as i64
}

/// Human distance between `now` and `target` with an "in"/"ago" suffix,
/// using the same buckets as date-fns `formatDistance`
pub fn format_distance(now: DateTime<Utc>, target: DateTime<Utc>) -> String {
    let future = target >= now;
    let (earlier, later) = if future { (now, target) } else { (target, now) };
    let minutes = rounded((later - earlier).num_seconds(), 60);

    let phrase = if minutes == 0 {
        "less than a minute".to_string()
    } else if minutes < 2 {
        "1 minute".to_string()
    } else if minutes < 45 {
        format!("{} minutes", minutes)
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_IN_DAY {
        format!("about {} hours", rounded(minutes, 60))
    } else if minutes < 2520 {
        "1 day".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        format!("{} days", rounded(minutes, MINUTES_IN_DAY))
    } else if minutes < 2 * MINUTES_IN_MONTH {
        match rounded(minutes, MINUTES_IN_MONTH) {
            1 => "about 1 month".to_string(),
            n => format!("about {} months", n),
        }
    } else {
        let months = calendar_months(earlier, later);
        if months < 12 {
            format!("{} months", rounded(minutes, MINUTES_IN_MONTH))
        } else {
            let years = months / 12;
            match months % 12 {
                0..=2 => format!("about {}", years_label(years)),
                3..=8 => format!("over {}", years_label(years)),
                _ => format!("almost {}", years_label(years + 1)),
            }
        }
    };

    if future {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

fn years_label(years: i64) -> String {
    if years == 1 {
        "1 year".to_string()
    } else {
        format!("{} years", years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_null_and_non_objects() {
        assert!(SafeInsights::coerce_at(&Value::Null, now()).is_none());
        assert!(SafeInsights::coerce_at(&json!("insights"), now()).is_none());
        assert!(SafeInsights::coerce_at(&json!([1, 2]), now()).is_none());
    }

    #[test]
    fn test_empty_object_gets_fallbacks() {
        let insights = SafeInsights::coerce_at(&json!({}), now()).unwrap();
        assert!(insights.salary_ranges.is_empty());
        assert_eq!(insights.growth_rate, 0.0);
        assert_eq!(insights.demand_level, "Unknown");
        assert_eq!(insights.market_outlook, "Unknown");
        assert_eq!(insights.demand(), DemandLevel::Unknown);
        assert_eq!(insights.last_updated, Some(now()));
        assert_eq!(insights.next_update, Some(now() + Duration::days(7)));

        let (last, next) = insights.update_labels(now());
        assert_eq!(last, "10/03/2025");
        assert_eq!(next, "in 7 days");
    }

    #[test]
    fn test_wrong_types_are_replaced() {
        let insights = SafeInsights::coerce_at(
            &json!({
                "salaryRanges": "lots",
                "growthRate": "12",
                "topSkills": {"a": 1},
                "keyTrends": ["AI adoption", 3, "Remote work"],
                "demandLevel": "",
            }),
            now(),
        )
        .unwrap();
        assert!(insights.salary_ranges.is_empty());
        assert_eq!(insights.growth_rate, 0.0);
        assert!(insights.top_skills.is_empty());
        assert_eq!(insights.key_trends, vec!["AI adoption", "Remote work"]);
        assert_eq!(insights.demand_level, "Unknown");
    }

    #[test]
    fn test_salary_chart_in_thousands() {
        let insights = SafeInsights::coerce_at(
            &json!({
                "salaryRanges": [
                    {"role": "Data Engineer", "min": 90000, "max": 150000, "median": 120000},
                    {"min": "lots", "max": 80000},
                    42
                ]
            }),
            now(),
        )
        .unwrap();
        let chart = insights.salary_chart();
        assert_eq!(chart.len(), 3);
        assert_eq!(
            chart[0],
            SalaryPoint {
                name: "Data Engineer".to_string(),
                min: 90.0,
                max: 150.0,
                median: 120.0
            }
        );
        assert_eq!(chart[1].name, "Unknown Role");
        assert_eq!(chart[1].min, 0.0);
        assert_eq!(chart[1].max, 80.0);
        assert_eq!(chart[2].median, 0.0);
    }

    #[test]
    fn test_levels_are_case_insensitive() {
        let insights = SafeInsights::coerce_at(
            &json!({"demandLevel": "HIGH", "marketOutlook": "Negative", "growthRate": 7.26}),
            now(),
        )
        .unwrap();
        assert_eq!(insights.demand(), DemandLevel::High);
        assert_eq!(insights.outlook(), MarketOutlook::Negative);
        assert_eq!(insights.growth_label(), "7.3%");
        assert_eq!(MarketOutlook::from_label("bullish"), MarketOutlook::Unknown);
    }

    #[test]
    fn test_bad_date_makes_both_labels_unknown() {
        let insights = SafeInsights::coerce_at(
            &json!({"lastUpdated": "not a date", "nextUpdate": "2025-03-17T12:00:00Z"}),
            now(),
        )
        .unwrap();
        assert_eq!(insights.last_updated, None);
        assert_eq!(
            insights.update_labels(now()),
            ("Unknown".to_string(), "Unknown".to_string())
        );
    }

    #[test]
    fn test_parsed_dates() {
        let insights = SafeInsights::coerce_at(
            &json!({
                "lastUpdated": "2025-03-01T08:30:00Z",
                "nextUpdate": 1741608000000i64 - 3 * 3600 * 1000
            }),
            now(),
        )
        .unwrap();
        let (last, next) = insights.update_labels(now());
        assert_eq!(last, "01/03/2025");
        assert_eq!(next, "about 3 hours ago");
    }

    #[test]
    fn test_date_only_strings() {
        let insights = SafeInsights::coerce_at(
            &json!({"lastUpdated": "2025-03-01", "nextUpdate": "2025-03-17"}),
            now(),
        )
        .unwrap();
        assert_eq!(
            insights.last_updated,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap())
        );
        let (last, next) = insights.update_labels(now());
        assert_eq!(last, "01/03/2025");
        assert_eq!(next, "in 7 days");
    }

    #[test]
    fn test_format_distance() {
        let base = now();
        assert_eq!(format_distance(base, base), "in less than a minute");
        assert_eq!(format_distance(base, base + Duration::minutes(1)), "in 1 minute");
        assert_eq!(format_distance(base, base - Duration::minutes(10)), "10 minutes ago");
        assert_eq!(format_distance(base, base + Duration::minutes(60)), "in about 1 hour");
        assert_eq!(format_distance(base, base + Duration::hours(30)), "in 1 day");
        assert_eq!(format_distance(base, base - Duration::days(40)), "about 1 month ago");
        assert_eq!(format_distance(base, base - Duration::days(50)), "about 2 months ago");
        assert_eq!(format_distance(base, base + Duration::days(120)), "in 4 months");
        assert_eq!(format_distance(base, base + Duration::days(800)), "in about 2 years");
        assert_eq!(format_distance(base, base + Duration::days(500)), "in over 1 year");
        assert_eq!(format_distance(base, base - Duration::days(700)), "almost 2 years ago");
    }
}
