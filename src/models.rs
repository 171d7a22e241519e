use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::CategoryCatalog;
use crate::errors::{SitelensError, SitelensResult};

/// Lowest and highest score a category can receive.
pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// A category score, guaranteed to lie in 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("score {0} is outside 1..=5")]
pub struct InvalidScore(pub u8);

impl Score {
    pub fn new(value: u8) -> Option<Self> {
        (MIN_SCORE..=MAX_SCORE).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Zero-based position of this score's text in a catalog entry.
    pub fn catalog_index(self) -> usize {
        usize::from(self.0 - MIN_SCORE)
    }

    pub fn tier(self) -> ScoreTier {
        match self.0 {
            4..=5 => ScoreTier::Good,
            3 => ScoreTier::Warning,
            _ => ScoreTier::Critical,
        }
    }
}

impl TryFrom<u8> for Score {
    type Error = InvalidScore;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidScore(value))
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> u8 {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity band a score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    Good,
    Warning,
    Critical,
}

impl ScoreTier {
    /// CSS class of the score pill.
    pub const fn css_class(self) -> &'static str {
        match self {
            ScoreTier::Good => "good",
            ScoreTier::Warning => "warning",
            ScoreTier::Critical => "critical",
        }
    }

    pub const fn priority(self) -> &'static str {
        match self {
            ScoreTier::Good => "Low",
            ScoreTier::Warning => "Medium",
            ScoreTier::Critical => "High",
        }
    }
}

impl std::fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.css_class())
    }
}

/// One row of the ordered score list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: Score,
}

impl CategoryScore {
    /// Build a row from an unchecked integer, rejecting anything outside 1..=5.
    pub fn new(category: impl Into<String>, score: i64) -> SitelensResult<Self> {
        let category = category.into();
        let checked = u8::try_from(score).ok().and_then(Score::new);
        match checked {
            Some(score) => Ok(Self { category, score }),
            None => Err(SitelensError::ScoreOutOfRange { category, score }),
        }
    }
}

/// Bar chart payload handed to the client-side renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub data: Vec<u8>,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfo {
    pub scan_timestamp: String,
    pub load_time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaInfo {
    pub title: String,
    pub title_length: u32,
    pub description: String,
    pub viewport: bool,
    pub has_favicon: bool,
    pub canonical: String,
    pub og_tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceCounts {
    pub images: u32,
    pub stylesheets: u32,
    pub scripts: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceInfo {
    pub page_size_kb: f64,
    pub requests: u32,
    pub dom_elements: u32,
    pub dom_depth: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityInfo {
    pub https: bool,
    pub hsts: bool,
    pub content_security_policy: bool,
    pub x_frame_options: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilityInfo {
    pub alt_text_images: u32,
    pub lang_attribute: bool,
    pub aria_attributes: u32,
}

/// Raw measurements gathered by the scanner. Missing sections default to
/// zeroes so partially failed scans still render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanData {
    pub basic: BasicInfo,
    pub meta: MetaInfo,
    pub resources: ResourceCounts,
    pub performance: PerformanceInfo,
    pub security: SecurityInfo,
    pub accessibility: AccessibilityInfo,
    pub issues: Vec<String>,
}

/// The validated view-model consumed by the results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub url: String,
    pub scan_data: ScanData,
    pub overall_score: f64,
    pub critical_issues: u32,
    pub needs_improvement: u32,
    pub well_performing: u32,
    pub recommendations: Vec<String>,
    pub scores: Vec<CategoryScore>,
    pub chart_data: ChartData,
}

/// Report as it arrives from the scanner. Summary fields left out are derived
/// from `scores`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    pub url: String,
    #[serde(default)]
    pub scan_data: ScanData,
    pub scores: Vec<CategoryScore>,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub critical_issues: Option<u32>,
    #[serde(default)]
    pub needs_improvement: Option<u32>,
    #[serde(default)]
    pub well_performing: Option<u32>,
    #[serde(default)]
    pub recommendations: Option<Vec<String>>,
    #[serde(default)]
    pub chart_data: Option<ChartData>,
}

impl ScanReport {
    /// Check every cross-field invariant the results page relies on.
    pub fn validate(&self, catalog: &CategoryCatalog) -> SitelensResult<()> {
        if crate::utils::validate_url(&self.url)? != self.url {
            return Err(SitelensError::invalid_url(
                &self.url,
                "URL must be normalized with an http or https scheme",
            ));
        }

        if !self.overall_score.is_finite()
            || !(0.0..=f64::from(MAX_SCORE)).contains(&self.overall_score)
        {
            return Err(SitelensError::OverallOutOfRange(self.overall_score));
        }

        for entry in &self.scores {
            catalog.recommendation(&entry.category, entry.score)?;
        }

        let chart = &self.chart_data;
        let n = self.scores.len();
        if chart.labels.len() != n || chart.data.len() != n || chart.colors.len() != n {
            return Err(SitelensError::ChartMisaligned {
                labels: chart.labels.len(),
                data: chart.data.len(),
                colors: chart.colors.len(),
                scores: n,
            });
        }

        for (index, entry) in self.scores.iter().enumerate() {
            let label = &chart.labels[index];
            let value = chart.data[index];
            if *label != entry.category || value != entry.score.value() {
                return Err(SitelensError::ChartMismatch {
                    index,
                    label: label.clone(),
                    value,
                    category: entry.category.clone(),
                    score: entry.score.value(),
                });
            }
        }

        Ok(())
    }

    /// Fill fraction of the radial gauge.
    pub fn gauge_fraction(&self) -> f64 {
        self.overall_score / f64::from(MAX_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ScanReport {
        let scores = vec![
            CategoryScore::new("Performance & Speed", 4).unwrap(),
            CategoryScore::new("SEO & Visibility", 2).unwrap(),
        ];
        ScanReport {
            url: "https://example.com".to_string(),
            scan_data: ScanData::default(),
            overall_score: 3.0,
            critical_issues: 0,
            needs_improvement: 1,
            well_performing: 1,
            recommendations: Vec::new(),
            chart_data: ChartData {
                labels: scores.iter().map(|s| s.category.clone()).collect(),
                data: scores.iter().map(|s| s.score.value()).collect(),
                colors: vec!["#2ecc71".to_string(), "#e67e22".to_string()],
            },
            scores,
        }
    }

    #[test]
    fn test_score_bounds() {
        assert!(Score::new(0).is_none());
        assert!(Score::new(6).is_none());
        for v in 1..=5 {
            assert_eq!(Score::new(v).unwrap().value(), v);
        }
        assert!(CategoryScore::new("SEO & Visibility", -1).is_err());
        assert!(matches!(
            CategoryScore::new("SEO & Visibility", 300),
            Err(SitelensError::ScoreOutOfRange { score: 300, .. })
        ));
    }

    #[test]
    fn test_score_tiers() {
        let tiers: Vec<&str> = (1..=5)
            .map(|v| Score::new(v).unwrap().tier().css_class())
            .collect();
        assert_eq!(tiers, ["critical", "critical", "warning", "good", "good"]);
        assert_eq!(Score::new(2).unwrap().tier().priority(), "High");
        assert_eq!(Score::new(3).unwrap().tier().priority(), "Medium");
    }

    #[test]
    fn test_score_deserialize_rejects_out_of_range() {
        let ok: CategoryScore =
            serde_json::from_str(r#"{"category":"Accessibility","score":3}"#).unwrap();
        assert_eq!(ok.score.catalog_index(), 2);

        let err = serde_json::from_str::<CategoryScore>(r#"{"category":"Accessibility","score":9}"#)
            .unwrap_err();
        assert!(err.to_string().contains("outside 1..=5"));
    }

    #[test]
    fn test_scan_data_defaults_missing_sections() {
        let data: ScanData =
            serde_json::from_str(r#"{"basic":{"scan_timestamp":"2024-01-01T10:00:00","load_time":1.25}}"#)
                .unwrap();
        assert_eq!(data.basic.load_time, 1.25);
        assert_eq!(data.performance.page_size_kb, 0.0);
        assert!(!data.security.https);
        assert!(data.issues.is_empty());
    }

    #[test]
    fn test_gauge_fraction() {
        let mut report = sample_report();
        report.overall_score = 3.5;
        assert_eq!(report.gauge_fraction(), 0.7);
        report.overall_score = 0.0;
        assert_eq!(report.gauge_fraction(), 0.0);
    }

    #[test]
    fn test_validate_accepts_consistent_report() {
        let catalog = CategoryCatalog::default();
        sample_report().validate(&catalog).unwrap();
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let catalog = CategoryCatalog::default();
        let mut report = sample_report();
        report.scores[1].category = "Content Quality".to_string();
        report.chart_data.labels[1] = "Content Quality".to_string();
        assert!(matches!(
            report.validate(&catalog),
            Err(SitelensError::UnknownCategory(c)) if c == "Content Quality"
        ));
    }

    #[test]
    fn test_validate_rejects_misaligned_chart() {
        let catalog = CategoryCatalog::default();
        let mut report = sample_report();
        report.chart_data.colors.pop();
        assert!(matches!(
            report.validate(&catalog),
            Err(SitelensError::ChartMisaligned { colors: 1, scores: 2, .. })
        ));

        let mut report = sample_report();
        report.chart_data.data[0] = 5;
        assert!(matches!(
            report.validate(&catalog),
            Err(SitelensError::ChartMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_overall_out_of_range() {
        let catalog = CategoryCatalog::default();
        let mut report = sample_report();
        report.overall_score = 5.5;
        assert!(matches!(
            report.validate(&catalog),
            Err(SitelensError::OverallOutOfRange(_))
        ));
        report.overall_score = f64::NAN;
        assert!(report.validate(&catalog).is_err());
    }
}
