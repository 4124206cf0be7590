//! Error types for compiling a dialogue script.

use std::path::PathBuf;
use thiserror::Error;

/// A script line that could not be understood. Line numbers are 1-based and
/// refer to the raw script text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid text: the script is empty")]
    EmptyScript,

    #[error("Invalid voice line {line}: {content}")]
    InvalidVoiceLine { line: usize, content: String },

    #[error("Invalid voice rate on line {line} (expected -10..10): {content}")]
    InvalidVoiceRate { line: usize, content: String },

    #[error("Invalid speak line {line}: {content}")]
    InvalidSpeakLine { line: usize, content: String },
}

impl ParseError {
    /// Script line the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::EmptyScript => None,
            ParseError::InvalidVoiceLine { line, .. }
            | ParseError::InvalidVoiceRate { line, .. }
            | ParseError::InvalidSpeakLine { line, .. } => Some(*line),
        }
    }
}

/// Any failure that aborts a compile run.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Synthesis failed for line {index} ({speaker}): {source}")]
    Synthesis {
        index: usize,
        speaker: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
