//! Batch rendering
//!
//! Renders every report JSON under a directory. Files are independent, so
//! they are rendered in parallel; a failing file is recorded and skipped.

use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cli::RenderMode;
use crate::errors::{SitelensError, SitelensResult};
use crate::reporter::HtmlReporter;

/// What a batch run writes for each input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutput {
    /// `<name>.html`, plus `<name>.chart.json` when `chart_json` is set.
    Html { chart_json: bool },
    /// `<name>.chart.json` only.
    ChartOnly,
}

impl BatchOutput {
    pub fn for_mode(mode: RenderMode, chart_json: bool) -> Self {
        match mode {
            RenderMode::Chart => BatchOutput::ChartOnly,
            _ => BatchOutput::Html { chart_json },
        }
    }

    fn extension(self) -> &'static str {
        match self {
            BatchOutput::Html { .. } => "html",
            BatchOutput::ChartOnly => "chart.json",
        }
    }
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub rendered: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Report inputs under `dir`, sorted. Chart payloads written by earlier runs
/// (`*.chart.json`) are skipped.
pub fn collect_inputs(dir: &Path) -> SitelensResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SitelensError::io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            Some(dir.to_path_buf()),
        ));
    }

    let mut inputs: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            name.ends_with(".json") && !name.ends_with(".chart.json")
        })
        .collect();

    inputs.sort();
    Ok(inputs)
}

/// `<output_dir>/<path relative to input_dir>` with the extension `kind` writes.
pub fn output_path(input: &Path, input_dir: &Path, output_dir: &Path, kind: BatchOutput) -> PathBuf {
    let relative = input.strip_prefix(input_dir).unwrap_or(input);
    output_dir.join(relative).with_extension(kind.extension())
}

pub fn render_directory(
    reporter: &HtmlReporter,
    input_dir: &Path,
    output_dir: &Path,
    kind: BatchOutput,
    progress: &ProgressBar,
) -> SitelensResult<BatchOutcome> {
    let inputs = collect_inputs(input_dir)?;
    log::info!("Rendering {} reports from {:?}", inputs.len(), input_dir);
    progress.set_length(inputs.len() as u64);

    let results: Vec<(PathBuf, SitelensResult<PathBuf>)> = inputs
        .par_iter()
        .map(|input| {
            let output = output_path(input, input_dir, output_dir, kind);
            let result = match kind {
                BatchOutput::Html { chart_json } => reporter.generate_report(input, &output, chart_json),
                BatchOutput::ChartOnly => reporter.generate_chart(input, &output),
            };
            progress.inc(1);
            (input.clone(), result)
        })
        .collect();

    let mut outcome = BatchOutcome::default();
    for (input, result) in results {
        match result {
            Ok(output) => outcome.rendered.push(output),
            Err(e) => {
                log::warn!("Failed to render {:?}: {}", input, e);
                outcome.failed.push((input, e.to_string()));
            }
        }
    }
    progress.finish_and_clear();

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const GOOD: &str = r#"{"url":"https://example.com","scores":[{"category":"Accessibility","score":4}]}"#;
    const UNKNOWN: &str = r#"{"url":"https://example.com","scores":[{"category":"Content Quality","score":3}]}"#;

    #[test]
    fn test_collect_inputs_skips_chart_payloads() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.json"), GOOD).unwrap();
        std::fs::write(dir.path().join("a.json"), GOOD).unwrap();
        std::fs::write(dir.path().join("a.chart.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let inputs = collect_inputs(dir.path()).unwrap();
        let names: Vec<_> = inputs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_output_path_keeps_subdirectories() {
        let out = output_path(
            Path::new("/in/client/site.json"),
            Path::new("/in"),
            Path::new("/out"),
            BatchOutput::Html { chart_json: true },
        );
        assert_eq!(out, PathBuf::from("/out/client/site.html"));

        let out = output_path(
            Path::new("/in/client/site.json"),
            Path::new("/in"),
            Path::new("/out"),
            BatchOutput::ChartOnly,
        );
        assert_eq!(out, PathBuf::from("/out/client/site.chart.json"));
    }

    #[test]
    fn test_render_directory_records_failures() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        std::fs::write(input.path().join("good.json"), GOOD).unwrap();
        std::fs::write(input.path().join("bad.json"), UNKNOWN).unwrap();

        let reporter = HtmlReporter::default();
        let outcome = render_directory(
            &reporter,
            input.path(),
            output.path(),
            BatchOutput::Html { chart_json: false },
            &ProgressBar::hidden(),
        )
        .unwrap();

        assert_eq!(outcome.rendered, vec![output.path().join("good.html")]);
        assert_eq!(outcome.failed.len(), 1);
        assert!(outcome.failed[0].1.contains("Content Quality"));
        assert!(!outcome.is_success());
        assert!(!output.path().join("bad.html").exists());
    }

    #[test]
    fn test_chart_mode_writes_only_payloads() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        std::fs::write(input.path().join("good.json"), GOOD).unwrap();

        let reporter = HtmlReporter::default();
        let kind = BatchOutput::for_mode(RenderMode::Chart, false);
        assert_eq!(kind, BatchOutput::ChartOnly);
        let outcome =
            render_directory(&reporter, input.path(), output.path(), kind, &ProgressBar::hidden()).unwrap();

        let chart_path = output.path().join("good.chart.json");
        assert_eq!(outcome.rendered, vec![chart_path.clone()]);
        let chart: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&chart_path).unwrap()).unwrap();
        assert_eq!(chart["data"], serde_json::json!([4]));
        assert!(!output.path().join("good.html").exists());
    }

    #[test]
    fn test_results_mode_keeps_chart_json_flag() {
        assert_eq!(
            BatchOutput::for_mode(RenderMode::Results, true),
            BatchOutput::Html { chart_json: true }
        );
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(collect_inputs(&dir.path().join("missing")).is_err());
    }
}
