use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;
use std::sync::Arc;

use sitelens::cli::{Args, RenderMode};
use sitelens::reporter::{HtmlReporter, RenderOptions};
use sitelens::batch::{self, BatchOutput};
use sitelens::{ui, CategoryCatalog};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let log_level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    log::debug!("sitelens starting with args: {:?}", args);

    let catalog = match &args.catalog {
        Some(path) => CategoryCatalog::load(path)?,
        None => CategoryCatalog::default(),
    };

    let options = RenderOptions {
        chart_js_src: args.chart_js.clone(),
        form_action: args.form_action.clone(),
        download: Arc::new(args.download_url.clone()),
        ..RenderOptions::default()
    };
    let reporter = HtmlReporter::new(catalog, options);

    match args.mode {
        RenderMode::Index => {
            let output = args.output.clone().unwrap_or_else(|| PathBuf::from("index.html"));
            let written = reporter.generate_index(&output, args.error.as_deref())?;
            ui::print_rendered(&written, args.quiet);
        }
        RenderMode::Results | RenderMode::Chart => {
            let input = args
                .require_input()
                .map(PathBuf::from)
                .unwrap_or_else(|e| e.exit());

            if input.is_dir() {
                let output_dir = args.output.clone().unwrap_or_else(|| input.clone());
                let progress = ui::batch_progress(args.quiet)?;
                let outcome = batch::render_directory(
                    &reporter,
                    &input,
                    &output_dir,
                    BatchOutput::for_mode(args.mode, args.chart_json),
                    &progress,
                )?;
                ui::print_batch_summary(&outcome, args.quiet);
                if !outcome.is_success() {
                    std::process::exit(1);
                }
            } else {
                let output = args.output_for(&input);
                let written = match args.mode {
                    RenderMode::Chart => reporter.generate_chart(&input, &output)?,
                    _ => reporter.generate_report(&input, &output, args.chart_json)?,
                };
                ui::print_rendered(&written, args.quiet);
            }
        }
    }

    Ok(())
}
