//! Results page: summary, gauge, stats, chart, recommendations, score table
//! and scan details for one validated report.

use serde_json::Value;

use super::chart;
use super::layout::Layout;
use super::RenderOptions;
use crate::catalog::CategoryCatalog;
use crate::errors::SitelensResult;
use crate::models::{ScanReport, MAX_SCORE};
use crate::summary::category_details;
use crate::utils::{escape_html, title_case, yes_no};

const GAUGE_RADIUS: f64 = 54.0;
const CHART_CANVAS_ID: &str = "scoreChart";

pub struct ResultsView<'a> {
    report: &'a ScanReport,
    catalog: &'a CategoryCatalog,
    options: &'a RenderOptions,
}

impl<'a> ResultsView<'a> {
    pub fn new(report: &'a ScanReport, catalog: &'a CategoryCatalog, options: &'a RenderOptions) -> Self {
        Self {
            report,
            catalog,
            options,
        }
    }

    /// Full results document. The report must already be validated against
    /// the same catalog; unknown categories still fail here.
    pub fn render(&self) -> SitelensResult<String> {
        let content = self.render_content()?;
        let scripts = chart::render_script(
            &self.report.chart_data,
            CHART_CANVAS_ID,
            &self.options.chart_js_src,
        )?;
        let title = format!("Scan Results - {}", self.options.brand);

        Ok(Layout::new(&title)
            .styles(RESULTS_CSS)
            .content(&content)
            .scripts(&scripts)
            .render())
    }

    pub fn render_content(&self) -> SitelensResult<String> {
        Ok(format!(
            r#"        <header class="page-header">
            <h1>{brand}</h1>
            <p class="subtitle">Scan results</p>
        </header>
{summary}
        <div class="overview-grid">
{gauge}
{stats}
        </div>
{chart}
{recommendations}
{table}
{details}
{download}
        <footer class="footer">Report generated {generated_at}</footer>"#,
            brand = escape_html(&self.options.brand),
            summary = self.summary_card(),
            gauge = self.gauge_card(),
            stats = self.stats_card(),
            chart = self.chart_card(),
            recommendations = self.recommendations_card(),
            table = self.score_table()?,
            details = self.details_card()?,
            download = self.download_action(),
            generated_at = escape_html(&self.options.generated_at),
        ))
    }

    fn summary_card(&self) -> String {
        let url = escape_html(&self.report.url);
        let basic = &self.report.scan_data.basic;
        format!(
            r#"        <section class="card summary-card">
            <h2>Scan Summary</h2>
            <div class="summary-row"><span class="summary-label">Website</span><a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a></div>
            <div class="summary-row"><span class="summary-label">Scanned</span><span>{timestamp}</span></div>
            <div class="summary-row"><span class="summary-label">Load time</span><span>{load:.2} seconds</span></div>
        </section>"#,
            url = url,
            timestamp = escape_html(&basic.scan_timestamp),
            load = basic.load_time,
        )
    }

    fn gauge_card(&self) -> String {
        let fraction = self.report.gauge_fraction();
        let circumference = 2.0 * std::f64::consts::PI * GAUGE_RADIUS;
        let offset = circumference * (1.0 - fraction);
        format!(
            r#"            <section class="card gauge-card">
                <h2>Overall Score</h2>
                <div class="gauge" data-fraction="{fraction}">
                    <svg viewBox="0 0 120 120" width="160" height="160" aria-hidden="true">
                        <circle class="gauge-track" cx="60" cy="60" r="{r}"></circle>
                        <circle class="gauge-fill" cx="60" cy="60" r="{r}" stroke-dasharray="{circ:.3}" stroke-dashoffset="{offset:.3}" transform="rotate(-90 60 60)"></circle>
                    </svg>
                    <div class="gauge-label">{label}/{max}.0</div>
                </div>
            </section>"#,
            fraction = fraction,
            r = GAUGE_RADIUS,
            circ = circumference,
            offset = offset,
            label = gauge_label(self.report.overall_score),
            max = MAX_SCORE,
        )
    }

    fn stats_card(&self) -> String {
        format!(
            r#"            <section class="card stats-card">
                <h2>Findings</h2>
                <div class="stat"><span class="stat-value critical">{}</span><span class="stat-label">Critical Issues</span></div>
                <div class="stat"><span class="stat-value warning">{}</span><span class="stat-label">Needs Improvement</span></div>
                <div class="stat"><span class="stat-value good">{}</span><span class="stat-label">Well Performing</span></div>
            </section>"#,
            self.report.critical_issues, self.report.needs_improvement, self.report.well_performing,
        )
    }

    fn chart_card(&self) -> String {
        format!(
            r#"        <section class="card chart-card">
            <h2>Category Scores</h2>
            <canvas id="{}"></canvas>
        </section>"#,
            CHART_CANVAS_ID
        )
    }

    fn recommendations_card(&self) -> String {
        let items: String = self
            .report
            .recommendations
            .iter()
            .map(|rec| format!("\n                <li>{}</li>", escape_html(rec)))
            .collect();
        format!(
            r#"        <section class="card recommendations-card">
            <h2>Top Recommendations</h2>
            <ul class="recommendations">{}
            </ul>
        </section>"#,
            items
        )
    }

    fn score_table(&self) -> SitelensResult<String> {
        let mut rows = String::new();
        for entry in &self.report.scores {
            let recommendation = self.catalog.recommendation(&entry.category, entry.score)?;
            let tier = entry.score.tier();
            let details = category_details(&entry.category, &self.report.scan_data)
                .iter()
                .map(|line| escape_html(line))
                .collect::<Vec<_>>()
                .join("<br>");
            let details_html = if details.is_empty() {
                String::new()
            } else {
                format!(r#"<div class="row-details">{}</div>"#, details)
            };

            rows.push_str(&format!(
                r#"
                    <tr class="score-row" data-category="{category}" data-score="{score}">
                        <td class="col-category">{category}</td>
                        <td class="col-score"><span class="score-pill {tier}">{score}/{max}</span></td>
                        <td class="col-recommendation">{recommendation}{details}</td>
                        <td class="col-priority priority-{tier}">{priority}</td>
                    </tr>"#,
                category = escape_html(&entry.category),
                score = entry.score,
                max = MAX_SCORE,
                tier = tier.css_class(),
                recommendation = escape_html(recommendation),
                details = details_html,
                priority = tier.priority(),
            ));
        }

        Ok(format!(
            r#"        <section class="card table-card">
            <h2>Detailed Scores</h2>
            <table class="score-table">
                <thead>
                    <tr><th>Category</th><th>Score</th><th>Recommendation</th><th>Priority</th></tr>
                </thead>
                <tbody>{}
                </tbody>
            </table>
        </section>"#,
            rows
        ))
    }

    fn details_card(&self) -> SitelensResult<String> {
        let data = &self.report.scan_data;
        let sections = [
            ("Basic Information", serde_json::to_value(&data.basic)?),
            ("Meta Tags Analysis", serde_json::to_value(&data.meta)?),
            ("Resources Breakdown", serde_json::to_value(&data.resources)?),
            ("Performance Metrics", serde_json::to_value(&data.performance)?),
            ("Security Headers", serde_json::to_value(&data.security)?),
            ("Accessibility Checks", serde_json::to_value(&data.accessibility)?),
        ];

        let mut body = String::new();
        for (name, value) in &sections {
            let Value::Object(fields) = value else {
                continue;
            };
            body.push_str(&format!(
                "\n            <h3>{}</h3>\n            <table class=\"details-table\">\n                <tr><th>Metric</th><th>Value</th></tr>",
                name
            ));
            for (key, value) in fields {
                body.push_str(&format!(
                    "\n                <tr><td>{}</td><td>{}</td></tr>",
                    escape_html(&title_case(key)),
                    detail_value(value)
                ));
            }
            body.push_str("\n            </table>");
        }

        if !data.issues.is_empty() {
            body.push_str("\n            <h3>Scanner Issues</h3>\n            <ul class=\"issues\">");
            for issue in &data.issues {
                body.push_str(&format!("\n                <li>{}</li>", escape_html(issue)));
            }
            body.push_str("\n            </ul>");
        }

        Ok(format!(
            r#"        <details class="card details-card">
            <summary>Scan Details</summary>{}
        </details>"#,
            body
        ))
    }

    fn download_action(&self) -> String {
        format!(
            r#"        <div class="actions">
            <a class="btn btn-primary" href="{}" download>Download Full Report</a>
        </div>"#,
            escape_html(&self.options.download.download_url())
        )
    }
}

/// One decimal place, except an empty report which reads plain `0`.
fn gauge_label(score: f64) -> String {
    if score == 0.0 {
        "0".to_string()
    } else {
        format!("{:.1}", score)
    }
}

fn detail_value(value: &Value) -> String {
    match value {
        Value::Bool(flag) => format!(
            r#"<span class="flag {}">{}</span>"#,
            if *flag { "good" } else { "critical" },
            yes_no(*flag)
        ),
        Value::String(s) if s.starts_with("http://") || s.starts_with("https://") => {
            let s = escape_html(s);
            format!(r#"<a href="{s}" target="_blank" rel="noopener noreferrer">{s}</a>"#)
        }
        Value::String(s) if s.is_empty() => "-".to_string(),
        Value::String(s) => escape_html(s),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{:.2}", f),
            _ => n.to_string(),
        },
        Value::Object(map) if map.is_empty() => "-".to_string(),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| {
                let v = v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
                format!("{}: {}", escape_html(k), escape_html(&v))
            })
            .collect::<Vec<_>>()
            .join("<br>"),
        Value::Array(items) => escape_html(
            &items
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Null => "-".to_string(),
    }
}

const RESULTS_CSS: &str = r#"        .page-header { margin-bottom: 1.5rem; }
        .page-header h1 { color: var(--primary); font-size: 1.9rem; }
        .subtitle { color: var(--text-dim); }
        h2 { font-size: 1.1rem; margin-bottom: 0.75rem; }
        h3 { font-size: 1rem; color: var(--primary); margin: 1rem 0 0.5rem; }

        .summary-row { display: flex; gap: 1rem; padding: 0.25rem 0; word-break: break-all; }
        .summary-label { min-width: 7rem; color: var(--text-dim); }

        .overview-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
            gap: 1.5rem;
        }

        .gauge { position: relative; width: 160px; height: 160px; margin: 0 auto; }
        .gauge-track { fill: none; stroke: var(--primary-light); stroke-width: 12; }
        .gauge-fill { fill: none; stroke: var(--primary); stroke-width: 12; stroke-linecap: round; }
        .gauge-label {
            position: absolute;
            inset: 0;
            display: flex;
            align-items: center;
            justify-content: center;
            font-size: 1.6rem;
            font-weight: 700;
        }

        .stat { display: flex; align-items: baseline; gap: 0.75rem; padding: 0.4rem 0; }
        .stat-value { font-size: 1.8rem; font-weight: 700; min-width: 2.5rem; }
        .stat-value.critical { color: var(--critical); }
        .stat-value.warning { color: #d4ac0d; }
        .stat-value.good { color: var(--good); }
        .stat-label { color: var(--text-dim); }

        .chart-card canvas { max-height: 320px; }

        .recommendations { padding-left: 1.25rem; }
        .recommendations li { padding: 0.2rem 0; }

        .score-table, .details-table { width: 100%; border-collapse: collapse; }
        .score-table th, .score-table td, .details-table th, .details-table td {
            text-align: left;
            padding: 0.6rem 0.75rem;
            border-bottom: 1px solid var(--border);
            vertical-align: top;
        }
        .score-table th, .details-table th { background: var(--primary-light); }
        .row-details { margin-top: 0.35rem; font-size: 0.85rem; color: var(--text-dim); }

        .score-pill {
            display: inline-block;
            padding: 0.15rem 0.7rem;
            border-radius: 999px;
            font-weight: 700;
            font-size: 0.85rem;
            color: #fff;
        }
        .score-pill.good { background: var(--good); }
        .score-pill.warning { background: var(--warning); color: var(--text); }
        .score-pill.critical { background: var(--critical); }
        .priority-critical { color: var(--critical); font-weight: 600; }

        .flag.good { color: var(--good); }
        .flag.critical { color: var(--critical); }
        .details-card summary { cursor: pointer; font-weight: 600; }

        .actions { text-align: center; margin: 2rem 0 1rem; }
        .btn {
            display: inline-block;
            padding: 0.75rem 1.5rem;
            border-radius: 8px;
            text-decoration: none;
            font-weight: 600;
        }
        .btn-primary { background: var(--primary); color: #fff; }
        .footer { text-align: center; color: var(--text-dim); font-size: 0.85rem; margin-top: 1rem; }"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryEntry;
    use crate::errors::SitelensError;
    use crate::models::{CategoryScore, ReportInput, ScanData};

    fn seo_catalog() -> CategoryCatalog {
        let entry = |name: &str, prefix: &str| CategoryEntry {
            name: name.to_string(),
            scores: (1..=5).map(|i| format!("{} {}", prefix, i)).collect(),
        };
        let mut categories = vec![
            entry("Performance", "Performance level"),
            entry("Accessibility", "Accessibility level"),
        ];
        categories.push(CategoryEntry {
            name: "SEO".to_string(),
            scores: vec![
                "Critical SEO issues".to_string(),
                "Major SEO gaps".to_string(),
                "Average SEO".to_string(),
                "Good SEO".to_string(),
                "Excellent SEO".to_string(),
            ],
        });
        CategoryCatalog::new(categories).unwrap()
    }

    fn report(catalog: &CategoryCatalog, recommendations: Option<Vec<String>>) -> ScanReport {
        let mut scan_data = ScanData::default();
        scan_data.basic.scan_timestamp = "2024-05-01 09:30".to_string();
        scan_data.basic.load_time = 1.234;
        ReportInput {
            url: "https://example.com".to_string(),
            scan_data,
            scores: vec![
                CategoryScore::new("Performance", 4).unwrap(),
                CategoryScore::new("SEO", 2).unwrap(),
                CategoryScore::new("Accessibility", 3).unwrap(),
            ],
            overall_score: None,
            critical_issues: None,
            needs_improvement: None,
            well_performing: None,
            recommendations,
            chart_data: None,
        }
        .into_report(catalog)
        .unwrap()
    }

    fn row<'h>(html: &'h str, category: &str) -> &'h str {
        let marker = format!(r#"data-category="{}""#, category);
        let start = html.find(&marker).unwrap();
        let end = start + html[start..].find("</tr>").unwrap();
        &html[start..end]
    }

    #[test]
    fn test_score_rows_badge_and_text() {
        let catalog = seo_catalog();
        let options = RenderOptions::default();
        let report = report(&catalog, None);
        let html = ResultsView::new(&report, &catalog, &options).render().unwrap();

        let seo = row(&html, "SEO");
        assert!(seo.contains("score-pill critical"));
        assert!(seo.contains("Major SEO gaps"));
        assert!(seo.contains("High"));

        assert!(row(&html, "Performance").contains("score-pill good"));
        assert!(row(&html, "Accessibility").contains("score-pill warning"));
    }

    #[test]
    fn test_rows_follow_score_order() {
        let catalog = seo_catalog();
        let options = RenderOptions::default();
        let report = report(&catalog, None);
        let html = ResultsView::new(&report, &catalog, &options).render().unwrap();
        let perf = html.find(r#"data-category="Performance""#).unwrap();
        let seo = html.find(r#"data-category="SEO""#).unwrap();
        let acc = html.find(r#"data-category="Accessibility""#).unwrap();
        assert!(perf < seo && seo < acc);
    }

    #[test]
    fn test_empty_recommendations_render_heading_only() {
        let catalog = seo_catalog();
        let options = RenderOptions::default();
        let report = report(&catalog, Some(Vec::new()));
        let view = ResultsView::new(&report, &catalog, &options);
        let card = view.recommendations_card();
        assert!(card.contains("Top Recommendations"));
        assert!(!card.contains("<li>"));
    }

    #[test]
    fn test_gauge_for_zero_score() {
        let catalog = seo_catalog();
        let options = RenderOptions::default();
        let mut report = report(&catalog, None);
        report.overall_score = 0.0;
        let gauge = ResultsView::new(&report, &catalog, &options).gauge_card();
        assert!(gauge.contains(r#"data-fraction="0""#));
        assert!(gauge.contains("0/5.0"));
    }

    #[test]
    fn test_gauge_fraction_is_ratio() {
        let catalog = seo_catalog();
        let options = RenderOptions::default();
        let mut report = report(&catalog, None);
        report.overall_score = 3.5;
        let gauge = ResultsView::new(&report, &catalog, &options).gauge_card();
        assert!(gauge.contains(r#"data-fraction="0.7""#));
        assert!(gauge.contains("3.5/5.0"));
    }

    #[test]
    fn test_gauge_label_keeps_one_decimal() {
        let catalog = seo_catalog();
        let options = RenderOptions::default();
        let mut report = report(&catalog, None);
        report.overall_score = 3.0;
        let gauge = ResultsView::new(&report, &catalog, &options).gauge_card();
        assert!(gauge.contains(r#"<div class="gauge-label">3.0/5.0</div>"#));
        assert!(gauge.contains(r#"data-fraction="0.6""#));
        assert_eq!(gauge_label(5.0), "5.0");
        assert_eq!(gauge_label(0.0), "0");
    }

    #[test]
    fn test_summary_and_stats() {
        let catalog = seo_catalog();
        let options = RenderOptions::default();
        let report = report(&catalog, None);
        let html = ResultsView::new(&report, &catalog, &options).render_content().unwrap();
        assert!(html.contains(r#"href="https://example.com" target="_blank""#));
        assert!(html.contains("2024-05-01 09:30"));
        assert!(html.contains("1.23 seconds"));
        assert!(html.contains(r#"<span class="stat-value critical">0</span>"#));
        assert!(html.contains(r#"<span class="stat-value warning">1</span>"#));
        assert!(html.contains(r#"<span class="stat-value good">1</span>"#));
        assert!(html.contains(r#"href="/download""#));
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        let catalog = seo_catalog();
        let options = RenderOptions::default();
        let mut report = report(&catalog, None);
        report.scores[0].category = "Content Quality".to_string();
        let err = ResultsView::new(&report, &catalog, &options).render().unwrap_err();
        assert!(matches!(err, SitelensError::UnknownCategory(_)));
    }

    #[test]
    fn test_detail_values() {
        assert!(detail_value(&Value::Bool(true)).contains("Yes"));
        assert!(detail_value(&Value::Bool(false)).contains("No"));
        assert!(detail_value(&Value::String("https://a.example".into())).contains("<a href="));
        assert_eq!(detail_value(&Value::String(String::new())), "-");
        assert_eq!(detail_value(&serde_json::json!(12)), "12");
        assert_eq!(detail_value(&serde_json::json!(1.5)), "1.50");
    }
}
