use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// The two header sections that feed FIFO queues into the grid scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Doors,
    Signs,
}

impl Section {
    /// The line that terminates this section.
    pub fn sentinel(self) -> &'static str {
        match self {
            Section::Doors => "enddoors",
            Section::Signs => "endsigns",
        }
    }

    /// The glyph whose tiles consume entries from this section.
    pub fn glyph(self) -> char {
        match self {
            Section::Doors => 'D',
            Section::Signs => 'S',
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Doors => write!(f, "door"),
            Section::Signs => write!(f, "sign"),
        }
    }
}

/// Main error type for levelbake operations
#[derive(Error, Diagnostic, Debug)]
pub enum BakeError {
    #[error("IO error: {0}")]
    #[diagnostic(code(levelbake::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(levelbake::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Malformed header: expected ambient light on line 1, found {found:?}")]
    #[diagnostic(code(levelbake::parse::header))]
    MalformedHeader {
        found: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unterminated {section} section: input ended before `{sentinel}`")]
    #[diagnostic(
        code(levelbake::parse::section),
        help("Each header section must end with its own sentinel line")
    )]
    UnterminatedSection {
        section: Section,
        sentinel: &'static str,
    },

    #[error("Grid tile '{glyph}' at ({x}, {y}) has no {section} entry left to consume")]
    #[diagnostic(
        code(levelbake::parse::queue),
        help("Declare one header line for every door or sign tile in the grid")
    )]
    QueueUnderflow {
        section: Section,
        glyph: char,
        x: usize,
        y: usize,
    },

    #[error("Invalid parameter: {message}")]
    #[diagnostic(code(levelbake::param))]
    InvalidParameter {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Manifest error: {message}")]
    #[diagnostic(code(levelbake::manifest))]
    Manifest {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(levelbake::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl BakeError {
    /// Stable machine-readable code, matching the `#[diagnostic(code)]` value.
    pub fn code_str(&self) -> &'static str {
        match self {
            BakeError::IoError(_) | BakeError::Io { .. } => "levelbake::io",
            BakeError::MalformedHeader { .. } => "levelbake::parse::header",
            BakeError::UnterminatedSection { .. } => "levelbake::parse::section",
            BakeError::QueueUnderflow { .. } => "levelbake::parse::queue",
            BakeError::InvalidParameter { .. } => "levelbake::param",
            BakeError::Manifest { .. } => "levelbake::manifest",
            BakeError::Build { .. } => "levelbake::build",
        }
    }

    pub(crate) fn invalid(message: impl Into<String>, help: impl Into<String>) -> Self {
        BakeError::InvalidParameter {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BakeError>;
