use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sitelens",
    about = "sitelens - render website quality scan reports as HTML",
    version
)]
pub struct Args {
    /// Report JSON file, or a directory of report files
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (single report) or directory (batch)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// What to render
    #[arg(short, long, default_value = "results")]
    pub mode: RenderMode,

    /// Category catalog JSON replacing the built-in table
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Link target of the "Download Full Report" button
    #[arg(long, default_value = "/download")]
    pub download_url: String,

    /// Form action of the landing page
    #[arg(long, default_value = "/")]
    pub form_action: String,

    /// Error message shown on the landing page
    #[arg(long)]
    pub error: Option<String>,

    /// Chart.js script URL
    #[arg(long, default_value = crate::reporter::DEFAULT_CHART_JS_SRC)]
    pub chart_js: String,

    /// Also write the chart payload as <name>.chart.json
    #[arg(long)]
    pub chart_json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum RenderMode {
    /// Results page for a report (or every report in a directory)
    Results,
    /// Landing page with the scan form
    Index,
    /// Chart payload JSON only
    Chart,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Results => write!(f, "Results"),
            RenderMode::Index => write!(f, "Index"),
            RenderMode::Chart => write!(f, "Chart"),
        }
    }
}

impl Args {
    /// The `--input` path, which results and chart modes cannot do without.
    pub fn require_input(&self) -> Result<&Path, clap::Error> {
        self.input.as_deref().ok_or_else(|| {
            Self::command().error(
                ErrorKind::MissingRequiredArgument,
                format!("--input is required in {} mode", self.mode.to_string().to_lowercase()),
            )
        })
    }

    /// Output location, defaulting to the input with a mode-specific extension.
    pub fn output_for(&self, input: &Path) -> PathBuf {
        match (&self.output, self.mode) {
            (Some(out), _) => out.clone(),
            (None, RenderMode::Chart) => input.with_extension("chart.json"),
            (None, _) => input.with_extension("html"),
        }
    }
}
