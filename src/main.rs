//! Colour contrast checker.
//!
//! Prints the WCAG contrast ratio of a foreground colour over a background
//! colour, the pass/fail flags, the contrast range when the background is
//! translucent, and a display colour that is always legible over the
//! background. With `--enhance`, also prints an adjusted pair that meets the
//! thresholds.
//!
//! Exit codes:
//! - 0: Successfully evaluated the pair
//! - 2: Unable to evaluate the pair
//!
//! # Environment Variables
//!
//! - `DEBUG`: When set, enables debug output to stderr.
//! - `RUST_LOG`: Overrides the log filter.

use anyhow::{Context, Result};
use clap::Parser;
use contrast::contrast::format_score;
use contrast::enhance::EnhancementTarget;
use contrast::{Report, analyze, logs};
use std::process;

/// Check and fix the contrast of two colours
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Background colour, #RRGGBB or #RRGGBBAA
    background: String,

    /// Foreground colour, #RRGGBB or #RRGGBBAA
    foreground: String,

    /// Adjust the pair until it meets WCAG AA
    #[arg(long, value_enum)]
    enhance: Option<EnhancementTarget>,

    /// Print a JSON report
    #[arg(long)]
    json: bool,
}

fn render(report: &Report) -> String {
    let mark = |pass: bool| if pass { "pass" } else { "fail" };

    let mut lines = vec![
        format!("background: {}", report.background),
        format!("foreground: {}", report.foreground),
        format!("ratio: {}:1", format_score(report.ratio)),
        format!("AAA: {}", mark(report.passes.enhanced)),
        format!("AA: {}", mark(report.passes.minimum)),
        format!("AA large: {}", mark(report.passes.large_text)),
    ];
    if let Some(range) = report.range {
        lines.push(format!(
            "range: {}:1 - {}:1",
            format_score(range.min),
            format_score(range.max)
        ));
    }
    lines.push(format!("display: {}", report.display_color));
    if let Some(enhanced) = &report.enhanced {
        lines.push(format!(
            "enhanced: {} on {} ({}:1)",
            enhanced.foreground,
            enhanced.background,
            format_score(enhanced.ratio)
        ));
    }
    lines.join("\n")
}

fn run(cli: &Cli) -> Result<String> {
    let report = analyze(&cli.background, &cli.foreground, cli.enhance)?;
    if cli.json {
        serde_json::to_string_pretty(&report).context("Failed to serialize report")
    } else {
        Ok(render(&report))
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = logs::init() {
        eprintln!("logging disabled: {err}");
    }

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            process::exit(0);
        }
        Err(err) => {
            eprintln!("{err:#}");
            process::exit(2);
        }
    }
}
