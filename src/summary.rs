//! Summary derivation
//!
//! Turns the ordered score list produced by the scanner into the summary
//! fields the results page shows: overall score, tier counts, top
//! recommendations and the chart payload. Also builds the per-category
//! detail lines from raw scan data.

use crate::catalog::CategoryCatalog;
use crate::errors::SitelensResult;
use crate::models::{CategoryScore, ChartData, ReportInput, ScanData, ScanReport, Score};
use crate::utils::{present_missing, validate_url, yes_no};

/// Number of recommendations surfaced at the top of the report.
pub const TOP_RECOMMENDATIONS: usize = 3;

/// Bar colors indexed by `score - 1`.
pub const SCORE_PALETTE: [&str; 5] = ["#e74c3c", "#e67e22", "#f1c40f", "#2ecc71", "#27ae60"];

pub fn score_color(score: Score) -> &'static str {
    SCORE_PALETTE[score.catalog_index()]
}

/// Mean score rounded to one decimal; 0 for an empty list.
pub fn overall_score(scores: &[CategoryScore]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let total: u32 = scores.iter().map(|s| u32::from(s.score.value())).sum();
    let mean = f64::from(total) / scores.len() as f64;
    (mean * 10.0).round() / 10.0
}

/// (critical, needs improvement, well performing) counts.
pub fn tier_counts(scores: &[CategoryScore]) -> (u32, u32, u32) {
    let mut critical = 0;
    let mut needs_improvement = 0;
    let mut well_performing = 0;

    for entry in scores {
        match entry.score.value() {
            1 => critical += 1,
            2 => needs_improvement += 1,
            4..=5 => well_performing += 1,
            _ => {}
        }
    }

    (critical, needs_improvement, well_performing)
}

/// Recommendation texts of the lowest-scoring categories, lowest first.
/// Ties keep display order.
pub fn top_recommendations(
    scores: &[CategoryScore],
    catalog: &CategoryCatalog,
    limit: usize,
) -> SitelensResult<Vec<String>> {
    let mut ranked: Vec<&CategoryScore> = scores.iter().collect();
    ranked.sort_by_key(|entry| entry.score);

    ranked
        .into_iter()
        .take(limit)
        .map(|entry| {
            catalog
                .recommendation(&entry.category, entry.score)
                .map(str::to_string)
        })
        .collect()
}

pub fn chart_data(scores: &[CategoryScore]) -> ChartData {
    ChartData {
        labels: scores.iter().map(|s| s.category.clone()).collect(),
        data: scores.iter().map(|s| s.score.value()).collect(),
        colors: scores.iter().map(|s| score_color(s.score).to_string()).collect(),
    }
}

/// Measurement lines backing a category's score. Categories without raw
/// measurements yield an empty list.
pub fn category_details(category: &str, data: &ScanData) -> Vec<String> {
    let meta = &data.meta;
    let security = &data.security;
    let resources = &data.resources;

    match category {
        "Performance & Speed" => vec![
            format!("Load Time: {:.2}s", data.basic.load_time),
            format!("Page Size: {:.1}KB", data.performance.page_size_kb),
            format!("Requests: {}", data.performance.requests),
            format!("DOM Depth: {}", data.performance.dom_depth),
        ],
        "Security & Compliance" => {
            let mut details = vec![format!("HTTPS: {}", yes_no(security.https))];
            if security.https {
                details.push(format!("HSTS: {}", yes_no(security.hsts)));
            }
            details.push(format!(
                "CSP Header: {}",
                yes_no(security.content_security_policy)
            ));
            details
        }
        "Mobile Responsiveness" => vec![
            format!("Viewport: {}", present_missing(meta.viewport)),
            format!("Images: {}", resources.images),
            format!("Responsive CSS: {} sheets", resources.stylesheets),
        ],
        "First Impressions & Branding" => vec![
            format!("Title: {}", present_missing(!meta.title.is_empty())),
            format!("Favicon: {}", present_missing(meta.has_favicon)),
        ],
        "Accessibility" => vec![
            format!(
                "Alt Text: {}/{} images",
                data.accessibility.alt_text_images, resources.images
            ),
            format!("ARIA Attributes: {}", data.accessibility.aria_attributes),
            format!(
                "Language: {}",
                if data.accessibility.lang_attribute { "Set" } else { "Missing" }
            ),
        ],
        "SEO & Visibility" => vec![
            format!("Title Length: {} chars", meta.title_length),
            format!("Description: {}", present_missing(!meta.description.is_empty())),
            format!("Viewport: {}", present_missing(meta.viewport)),
        ],
        _ => Vec::new(),
    }
}

impl ReportInput {
    /// Derive whatever summary fields the scanner left out, then validate the
    /// complete view-model against the catalog.
    pub fn into_report(self, catalog: &CategoryCatalog) -> SitelensResult<ScanReport> {
        let url = validate_url(&self.url)?;
        let (critical, needs_improvement, well_performing) = tier_counts(&self.scores);

        let recommendations = match self.recommendations {
            Some(recs) => recs,
            None => top_recommendations(&self.scores, catalog, TOP_RECOMMENDATIONS)?,
        };

        let report = ScanReport {
            url,
            overall_score: self
                .overall_score
                .unwrap_or_else(|| overall_score(&self.scores)),
            critical_issues: self.critical_issues.unwrap_or(critical),
            needs_improvement: self.needs_improvement.unwrap_or(needs_improvement),
            well_performing: self.well_performing.unwrap_or(well_performing),
            recommendations,
            chart_data: self.chart_data.unwrap_or_else(|| chart_data(&self.scores)),
            scan_data: self.scan_data,
            scores: self.scores,
        };

        report.validate(catalog)?;
        log::debug!(
            "Prepared report for {} with {} categories (overall {})",
            report.url,
            report.scores.len(),
            report.overall_score
        );
        Ok(report)
    }
}
