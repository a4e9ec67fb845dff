// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for pattern conversion.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A line that matched a known prefix but could not be read.
///
/// Every variant carries the 1-based line number and the line text so the
/// message points straight at the offending record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `LAST_STEP`, `END_STEP` or `TRIPLET` line without a value
    #[error("line {line}: missing value in {text:?}")]
    MissingValue { line: usize, text: String },

    /// A field that should hold an integer does not
    #[error("line {line}: invalid number {value:?} in {text:?}")]
    InvalidNumber {
        line: usize,
        value: String,
        text: String,
    },

    /// Step record with missing delimiters or the wrong field list
    #[error("line {line}: malformed step record ({reason}) in {text:?}")]
    MalformedStep {
        line: usize,
        reason: String,
        text: String,
    },

    /// Step number outside 1..=32
    #[error("line {line}: step {step} is outside 1..=32 in {text:?}")]
    StepOutOfRange { line: usize, step: i64, text: String },

    /// Pattern length outside 0..=32
    #[error("line {line}: length {length} is outside 0..=32 in {text:?}")]
    LengthOutOfRange {
        line: usize,
        length: i64,
        text: String,
    },
}

impl ParseError {
    /// Line number (1-based) of the failing record
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingValue { line, .. }
            | ParseError::InvalidNumber { line, .. }
            | ParseError::MalformedStep { line, .. }
            | ParseError::StepOutOfRange { line, .. }
            | ParseError::LengthOutOfRange { line, .. } => *line,
        }
    }
}

/// Failure of a whole conversion run. Nothing is written once one of these
/// is raised.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("No such file: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("Invalid file type: {}", .0.display())]
    UnrecognizedFormat(PathBuf),

    #[error("Input file is empty: {}", .0.display())]
    EmptyInput(PathBuf),

    #[error("Failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
