//! Validation for parsed levels.
//!
//! Runs a suite of checks against a parsed layout and reports warnings.
//! Used by both `levelbake check` and `levelbake build`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::output::Printer;
use crate::parser::ParsedLayout;

/// Run all validation checks against a parsed level.
pub fn validate_level(parsed: &ParsedLayout) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_spawn(parsed));
    result.merge(checks::check_unused_entries(parsed));
    result.merge(checks::check_torches(parsed));

    result
}

/// Print diagnostics for one file.
pub fn print_diagnostics(printer: &Printer, file: &str, result: &ValidationResult) {
    for d in result.iter() {
        let is_error = d.severity == Severity::Error;
        eprintln!(
            "{}[{}]: {} {}",
            printer.severity(&d.severity.to_string(), is_error),
            d.code,
            d.message,
            printer.dim(&format!("({})", file))
        );
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.cyan("help:"), help);
        }
    }
}
