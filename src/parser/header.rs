//! Level header parsing.
//!
//! The header is everything before the grid: the ambient light line, the
//! door-target section, and the sign-text section. Each section runs until its
//! sentinel line.

use crate::error::{BakeError, Result, Section};

/// A level file split into its header values and raw grid rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLayout<'a> {
    pub ambient_light: f64,
    /// Door targets in declaration order.
    pub door_targets: Vec<&'a str>,
    /// Sign texts in declaration order.
    pub sign_texts: Vec<&'a str>,
    /// Remaining lines, one per grid row.
    pub rows: Vec<&'a str>,
}

/// Split a level source into header values and grid rows.
pub fn split_layout(source: &str) -> Result<RawLayout<'_>> {
    let mut lines = source.lines();

    let first = lines.next().ok_or_else(|| BakeError::MalformedHeader {
        found: String::new(),
        help: Some("The file is empty; the first line must be the ambient light level".to_string()),
    })?;
    let ambient_light = parse_ambient(first)?;

    let door_targets = take_section(&mut lines, Section::Doors)?;
    let sign_texts = take_section(&mut lines, Section::Signs)?;
    let rows = lines.collect();

    Ok(RawLayout {
        ambient_light,
        door_targets,
        sign_texts,
        rows,
    })
}

fn parse_ambient(line: &str) -> Result<f64> {
    match line.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(BakeError::MalformedHeader {
            found: line.to_string(),
            help: Some("Use a finite decimal number such as `0.5`".to_string()),
        }),
    }
}

/// Collect lines up to (not including) the section's sentinel.
///
/// Only a line that trims to exactly the sentinel ends the section, so an
/// entry such as `enddoors-annex` is kept as data rather than a terminator.
fn take_section<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    section: Section,
) -> Result<Vec<&'a str>> {
    let mut entries = Vec::new();
    for line in lines.by_ref() {
        if line.trim() == section.sentinel() {
            return Ok(entries);
        }
        entries.push(line);
    }
    Err(BakeError::UnterminatedSection {
        section,
        sentinel: section.sentinel(),
    })
}
