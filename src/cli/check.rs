//! Check command: parse and validate levels without baking.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{BakeError, Result};
use crate::output::{display_path, plural, Printer};
use crate::parser::parse_layout;
use crate::validation::{print_diagnostics, validate_level, Diagnostic, ValidationResult};

use super::{LightingArgs, Plan};

/// Parse and validate level files without writing anything
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Level files or directories (default: discover from levelbake.yaml or .)
    pub paths: Vec<PathBuf>,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let printer = Printer::new();
    let plan = Plan::resolve(Path::new("."), &args.paths, None, &LightingArgs::default())?;

    let mut errors = 0;
    let mut warnings = 0;
    for level in &plan.levels {
        let result = check_file(level);
        errors += result.error_count();
        warnings += result.warning_count();
        print_diagnostics(&printer, &display_path(level), &result);
    }

    let message = format!(
        "{}: {}, {}",
        plural(plan.levels.len(), "level", "levels"),
        plural(errors, "error", "errors"),
        plural(warnings, "warning", "warnings")
    );

    if errors > 0 {
        printer.error("Checked", &message);
        return Err(BakeError::Build {
            message: format!("{} failed to parse", plural(errors, "level", "levels")),
            help: None,
        });
    }

    printer.success("Checked", &message);
    Ok(())
}

/// Read, parse and validate a single level file.
///
/// Fatal problems become a single error diagnostic.
pub fn check_file(path: &Path) -> ValidationResult {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            let err = BakeError::Io {
                path: path.to_path_buf(),
                message: format!("Failed to read file: {}", e),
            };
            return single(Diagnostic::from_error(&err));
        }
    };

    match parse_layout(&source) {
        Ok(parsed) => validate_level(&parsed),
        Err(e) => single(Diagnostic::from_error(&e)),
    }
}

fn single(diagnostic: Diagnostic) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.push(diagnostic);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Severity;
    use tempfile::tempdir;

    #[test]
    fn test_check_valid_level() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ok.txt");
        fs::write(&path, "0.5\nenddoors\nendsigns\nRT").unwrap();

        assert!(check_file(&path).is_ok());
        assert!(!dir.path().join("json").exists());
    }

    #[test]
    fn test_check_reports_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "0.5\nlevel2\n").unwrap();

        let result = check_file(&path);
        let d = result.iter().next().unwrap();
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.code, "levelbake::parse::section");
    }

    #[test]
    fn test_check_missing_file() {
        let result = check_file(Path::new("/nonexistent/level.txt"));
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.iter().next().unwrap().code, "levelbake::io");
    }
}
