//! HTML report generation.
//!
//! `HtmlReporter` ties the catalog and render options to the individual
//! views: it validates each report before rendering and handles reading
//! inputs and writing pages to disk.

pub mod chart;
pub mod index;
pub mod layout;
pub mod results;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::CategoryCatalog;
use crate::errors::{SitelensError, SitelensResult};
use crate::models::{ReportInput, ScanReport};

pub use layout::{Alert, AlertLevel, Layout};
pub use results::ResultsView;

pub const DEFAULT_CHART_JS_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";
pub const DEFAULT_BRAND: &str = "Website Quality Scanner";

/// Produces the URL of the downloadable report for the page being rendered.
pub trait DownloadLink: Send + Sync {
    fn download_url(&self) -> String;
}

impl DownloadLink for String {
    fn download_url(&self) -> String {
        self.clone()
    }
}

impl<F> DownloadLink for F
where
    F: Fn() -> String + Send + Sync,
{
    fn download_url(&self) -> String {
        self()
    }
}

/// Page-level settings shared by every render.
#[derive(Clone)]
pub struct RenderOptions {
    pub brand: String,
    pub chart_js_src: String,
    pub form_action: String,
    pub generated_at: String,
    pub download: Arc<dyn DownloadLink>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            chart_js_src: DEFAULT_CHART_JS_SRC.to_string(),
            form_action: "/".to_string(),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            download: Arc::new("/download".to_string()),
        }
    }
}

impl fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("brand", &self.brand)
            .field("chart_js_src", &self.chart_js_src)
            .field("form_action", &self.form_action)
            .field("generated_at", &self.generated_at)
            .field("download", &self.download.download_url())
            .finish()
    }
}

/// HTML report generator for scan results.
#[derive(Debug, Clone, Default)]
pub struct HtmlReporter {
    catalog: CategoryCatalog,
    options: RenderOptions,
}

impl HtmlReporter {
    pub fn new(catalog: CategoryCatalog, options: RenderOptions) -> Self {
        Self { catalog, options }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Validate and render a complete results page.
    pub fn render_results(&self, report: &ScanReport) -> SitelensResult<String> {
        report.validate(&self.catalog)?;
        log::info!("Rendering results for {}", report.url);
        ResultsView::new(report, &self.catalog, &self.options).render()
    }

    /// Landing page with an optional error alert.
    pub fn render_index(&self, error: Option<&str>) -> String {
        index::render_index(&self.options, error)
    }

    pub fn load_input(path: &Path) -> SitelensResult<ReportInput> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| SitelensError::io(e, Some(path.to_path_buf())))?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn load_report(&self, path: &Path) -> SitelensResult<ScanReport> {
        Self::load_input(path)?.into_report(&self.catalog)
    }

    /// Render the report at `input` to `output`. With `chart_json`, the chart
    /// payload is also written next to the page as `<stem>.chart.json`.
    pub fn generate_report(&self, input: &Path, output: &Path, chart_json: bool) -> SitelensResult<PathBuf> {
        let report = self.load_report(input)?;
        let html = self.render_results(&report)?;
        write_file(output, &html)?;

        if chart_json {
            let chart_path = output.with_extension("chart.json");
            write_file(&chart_path, &chart::payload_json(&report.chart_data)?)?;
            log::debug!("Chart payload written to {:?}", chart_path);
        }

        log::info!("HTML report generated: {:?}", output);
        Ok(output.to_path_buf())
    }

    /// Write only the chart payload for the report at `input`.
    pub fn generate_chart(&self, input: &Path, output: &Path) -> SitelensResult<PathBuf> {
        let report = self.load_report(input)?;
        write_file(output, &chart::payload_json(&report.chart_data)?)?;
        log::info!("Chart payload generated: {:?}", output);
        Ok(output.to_path_buf())
    }

    pub fn generate_index(&self, output: &Path, error: Option<&str>) -> SitelensResult<PathBuf> {
        write_file(output, &self.render_index(error))?;
        log::info!("Landing page generated: {:?}", output);
        Ok(output.to_path_buf())
    }
}

fn write_file(path: &Path, contents: &str) -> SitelensResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SitelensError::io(e, Some(parent.to_path_buf())))?;
    }
    std::fs::write(path, contents).map_err(|e| SitelensError::io(e, Some(path.to_path_buf())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const REPORT_JSON: &str = r#"{
        "url": "https://example.com",
        "scan_data": {
            "basic": {"scan_timestamp": "2024-05-01T09:30:00", "load_time": 2.5},
            "security": {"https": true, "hsts": true}
        },
        "scores": [
            {"category": "Performance & Speed", "score": 3},
            {"category": "Security & Compliance", "score": 5},
            {"category": "SEO & Visibility", "score": 1}
        ]
    }"#;

    #[test]
    fn test_generate_report_writes_html_and_chart() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("site.json");
        std::fs::write(&input, REPORT_JSON).unwrap();
        let output = dir.path().join("out").join("site.html");

        let reporter = HtmlReporter::default();
        reporter.generate_report(&input, &output, true).unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("No SEO foundations"));
        assert!(html.contains("Fully secure and compliant"));

        let chart: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("out/site.chart.json")).unwrap())
                .unwrap();
        assert_eq!(chart["data"], serde_json::json!([3, 5, 1]));
        assert_eq!(chart["colors"][2], "#e74c3c");
    }

    #[test]
    fn test_render_results_rejects_invalid_report() {
        let reporter = HtmlReporter::default();
        let mut report: ScanReport = serde_json::from_str::<ReportInput>(REPORT_JSON)
            .unwrap()
            .into_report(reporter.catalog())
            .unwrap();
        report.chart_data.labels.swap(0, 1);
        assert!(matches!(
            reporter.render_results(&report),
            Err(SitelensError::ChartMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn test_out_of_range_score_in_input_fails() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.json");
        std::fs::write(
            &input,
            r#"{"url":"https://example.com","scores":[{"category":"Accessibility","score":0}]}"#,
        )
        .unwrap();
        assert!(matches!(
            HtmlReporter::load_input(&input),
            Err(SitelensError::Json(_))
        ));
    }

    #[test]
    fn test_custom_download_link() {
        let options = RenderOptions {
            download: Arc::new(|| "/reports/42.xlsx".to_string()),
            ..RenderOptions::default()
        };
        let reporter = HtmlReporter::new(CategoryCatalog::default(), options);
        let report = serde_json::from_str::<ReportInput>(REPORT_JSON)
            .unwrap()
            .into_report(reporter.catalog())
            .unwrap();
        let html = reporter.render_results(&report).unwrap();
        assert!(html.contains(r#"href="/reports/42.xlsx""#));
    }

    #[test]
    fn test_generate_index() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("index.html");
        HtmlReporter::default()
            .generate_index(&output, Some("Invalid URL"))
            .unwrap();
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("Invalid URL"));
        assert!(html.contains("initDismissibleAlerts"));
    }
}
