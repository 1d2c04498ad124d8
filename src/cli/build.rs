//! Build command implementation.
//!
//! Bakes every discovered level. A failing level is reported and skipped;
//! the command fails at the end if any level did.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;

use crate::bake::bake_file;
use crate::error::{BakeError, Result};
use crate::output::{display_path, elapsed, plural, Printer};
use crate::validation::{print_diagnostics, validate_level};

use super::{LightingArgs, Plan};

/// Bake level files into scene JSON, brick maps and shadow maps
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Level files or directories (default: discover from levelbake.yaml or .)
    pub paths: Vec<PathBuf>,

    /// Base output directory (default: next to each level)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub lighting: LightingArgs,
}

/// Counts from one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub baked: usize,
    pub failed: usize,
    pub warnings: usize,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let printer = Printer::new();
    let plan = Plan::resolve(Path::new("."), &args.paths, args.output.as_ref(), &args.lighting)?;
    let summary = bake_plan(&plan, &plan.levels, &printer);
    finish(summary)
}

/// Bake the given levels with a resolved plan, continuing past failures.
pub fn bake_plan(plan: &Plan, levels: &[PathBuf], printer: &Printer) -> BuildSummary {
    let mut summary = BuildSummary::default();

    if levels.is_empty() {
        printer.warning("warning", "no level files found");
        return summary;
    }

    let started = Instant::now();

    for level in levels {
        let shown = display_path(level);
        printer.status("Baking", &shown);

        match bake_file(level, &plan.layout, &plan.params) {
            Ok(report) => {
                summary.baked += 1;
                let result = validate_level(&report.parsed);
                summary.warnings += result.warning_count();
                print_diagnostics(printer, &shown, &result);
                log::info!(
                    "{} -> {} ({}x{} px)",
                    shown,
                    display_path(&report.paths.shadowmap),
                    report.pixel_size.0,
                    report.pixel_size.1
                );
            }
            Err(e) => {
                summary.failed += 1;
                report_failure(printer, &shown, &e);
            }
        }
    }

    let message = format!(
        "{} in {}",
        plural(summary.baked, "level", "levels"),
        elapsed(started.elapsed())
    );
    if summary.failed == 0 {
        printer.success("Finished", &message);
    } else {
        printer.error(
            "Failed",
            &format!("{} ({} baked)", plural(summary.failed, "level", "levels"), summary.baked),
        );
    }

    summary
}

/// Turn a batch summary into the command's exit status.
pub fn finish(summary: BuildSummary) -> Result<()> {
    if summary.failed == 0 {
        return Ok(());
    }
    Err(BakeError::Build {
        message: format!(
            "{} of {} failed to bake",
            summary.failed,
            plural(summary.failed + summary.baked, "level", "levels")
        ),
        help: Some("Fix the errors reported above and run the build again".to_string()),
    })
}

fn report_failure(printer: &Printer, file: &str, err: &BakeError) {
    printer.error("Failed", &format!("{}: {}", file, err));
    if let Some(help) = miette::Diagnostic::help(err) {
        eprintln!("  {} {}", printer.cyan("help:"), help);
    }
}
