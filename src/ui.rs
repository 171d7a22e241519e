use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::batch::BatchOutcome;
use crate::errors::SitelensResult;

/// Progress bar for batch rendering; hidden when quiet.
pub fn batch_progress(quiet: bool) -> SitelensResult<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{prefix} {spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len}")?
            .progress_chars("█▉▊▋▌▍▎▏  "),
    );
    bar.set_prefix(style("RENDER").cyan().bold().to_string());
    Ok(bar)
}

pub fn print_rendered(path: &Path, quiet: bool) {
    if quiet {
        return;
    }
    println!(
        "    {} {} {}",
        style("▶").green(),
        style("Report written").bold(),
        style(path.display()).dim()
    );
}

pub fn print_batch_summary(outcome: &BatchOutcome, quiet: bool) {
    if quiet && outcome.is_success() {
        return;
    }

    let status = if outcome.is_success() {
        style("✓").green()
    } else {
        style("⚠").red()
    };
    println!("    {} {}", status, style("Batch rendering finished").bold());
    println!("    ├─ Rendered: {}", style(outcome.rendered.len()).bold());
    println!("    └─ Failed:   {}", style(outcome.failed.len()).bold());

    for (path, reason) in &outcome.failed {
        println!("       {} {}: {}", style("✗").red(), path.display(), reason);
    }
}
