//! Validation checks for parsed levels.
//!
//! Each check takes a `&ParsedLayout` and returns a `ValidationResult`. None
//! of these stop a bake; they flag layouts that are probably not what the
//! author meant.

use crate::parser::ParsedLayout;

use super::warning::{Diagnostic, ValidationResult};

/// The level has no `R` tile, so the loader gets no spawn point.
pub fn check_spawn(parsed: &ParsedLayout) -> ValidationResult {
    let mut result = ValidationResult::new();

    match parsed.spawn_tiles {
        0 => result.push(
            Diagnostic::warning(
                "levelbake::check::missing-spawn",
                "Level has no spawn point",
            )
            .with_help("Place exactly one 'R' tile in the grid"),
        ),
        1 => {}
        n => {
            if let Some(pos) = parsed.level.spawn {
                result.push(
                    Diagnostic::warning(
                        "levelbake::check::multiple-spawns",
                        format!("Level has {} spawn tiles; using the last at ({}, {})", n, pos.x, pos.y),
                    )
                    .with_help("Remove the extra 'R' tiles"),
                );
            }
        }
    }

    result
}

/// Header entries that no grid tile consumed.
pub fn check_unused_entries(parsed: &ParsedLayout) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !parsed.unused_door_targets.is_empty() {
        result.push(
            Diagnostic::warning(
                "levelbake::check::unused-door-targets",
                format!(
                    "{} door target(s) declared but never used: {}",
                    parsed.unused_door_targets.len(),
                    parsed.unused_door_targets.join(", ")
                ),
            )
            .with_help("Each 'D' tile takes the next door target in reading order"),
        );
    }

    if !parsed.unused_sign_texts.is_empty() {
        result.push(
            Diagnostic::warning(
                "levelbake::check::unused-sign-texts",
                format!(
                    "{} sign text(s) declared but never used",
                    parsed.unused_sign_texts.len()
                ),
            )
            .with_help("Each 'S' tile takes the next sign text in reading order"),
        );
    }

    result
}

/// Without torches the shadow map is entirely black.
pub fn check_torches(parsed: &ParsedLayout) -> ValidationResult {
    let mut result = ValidationResult::new();

    if parsed.level.torches.is_empty() {
        result.push(
            Diagnostic::warning("levelbake::check::no-torches", "Level has no torches")
                .with_help("The shadow map will be fully dark; add 'T' tiles to light the level"),
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_layout;

    fn parsed(source: &str) -> ParsedLayout {
        parse_layout(source).unwrap()
    }

    #[test]
    fn test_missing_spawn() {
        let result = check_spawn(&parsed("0\nenddoors\nendsigns\nT"));
        let codes: Vec<_> = result.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["levelbake::check::missing-spawn"]);
    }

    #[test]
    fn test_multiple_spawns() {
        let result = check_spawn(&parsed("0\nenddoors\nendsigns\nRR\n R"));
        let d = result.iter().next().unwrap();
        assert_eq!(d.code, "levelbake::check::multiple-spawns");
        assert!(d.message.contains("3 spawn tiles"));
        assert!(d.message.contains("(1, 1)"));
    }

    #[test]
    fn test_single_spawn_is_clean() {
        assert!(check_spawn(&parsed("0\nenddoors\nendsigns\nR")).is_ok());
    }

    #[test]
    fn test_unused_entries() {
        let result = check_unused_entries(&parsed("0\na\nb\nenddoors\nhi\nendsigns\nD"));
        assert_eq!(result.warning_count(), 2);
        assert!(result.iter().next().unwrap().message.contains(": b"));
    }

    #[test]
    fn test_no_torches() {
        assert_eq!(check_torches(&parsed("0\nenddoors\nendsigns\nR")).warning_count(), 1);
        assert!(check_torches(&parsed("0\nenddoors\nendsigns\nT")).is_ok());
    }
}
