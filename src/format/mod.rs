// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Parameter file formats.
//!
//! This module provides:
//! - Detection of the file syntax from its first line
//! - Line readers that fill a [`Pattern`] for each syntax
//! - Writers that render a [`Pattern`] in each syntax
//!
//! The two syntaxes are a closed set, so dispatch is a plain match on
//! [`Format`].

mod fields;
pub mod tb03;
pub mod tb3;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ParseError;
use crate::pattern::Pattern;

/// Gate width written into TB-3 files
pub const DEFAULT_GATE_WIDTH: i32 = 67;

/// Bank written into TB-3 files
pub const DEFAULT_BANK: i32 = 0;

/// Patch written into TB-3 files
pub const DEFAULT_PATCH: i32 = -1;

/// Parameter file syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `TRIPLET(0);` / `LAST_STEP(16);` / `STEP1(note,slide,state,accent);`
    Tb3,
    /// `END_STEP\t= 15` / `TRIPLET\t= 0` / `STEP 1\t= STATE=.. NOTE=..`
    Tb03,
}

impl Format {
    /// Classify a file by its first non-empty line.
    ///
    /// Returns `None` when the line matches neither syntax.
    pub fn detect(first_line: &str) -> Option<Self> {
        let line = first_line.trim_start_matches('\u{feff}');
        if line.starts_with("TRIPLET") {
            Some(Format::Tb3)
        } else if line.starts_with("END_") {
            Some(Format::Tb03)
        } else {
            None
        }
    }

    /// The format a file of this format is converted into
    pub fn opposite(self) -> Self {
        match self {
            Format::Tb3 => Format::Tb03,
            Format::Tb03 => Format::Tb3,
        }
    }

    /// Machine name as printed to the user
    pub fn machine_name(self) -> &'static str {
        match self {
            Format::Tb3 => "TB-3",
            Format::Tb03 => "TB-03",
        }
    }

    /// Apply one line of a file in this format to `pattern`.
    ///
    /// `line` is the 1-based line number used in error messages.
    pub fn read_line(self, pattern: &mut Pattern, line: usize, text: &str) -> Result<(), ParseError> {
        match self {
            Format::Tb3 => tb3::read_line(pattern, line, text),
            Format::Tb03 => tb03::read_line(pattern, line, text),
        }
    }

    /// Render `pattern` in this format.
    ///
    /// `output` is the requested destination; TB-03 output may be split
    /// into two files whose names are derived from it.
    pub fn render(self, pattern: &Pattern, output: &Path, options: &WriterOptions) -> Vec<OutputFile> {
        match self {
            Format::Tb3 => vec![OutputFile {
                path: output.to_path_buf(),
                contents: tb3::render(pattern, options),
            }],
            Format::Tb03 => tb03::render(pattern, output),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.machine_name())
    }
}

/// Fixed constants written into TB-3 files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    /// `GATE_WIDTH(..)` value
    pub gate_width: i32,
    /// `BANK(..)` value
    pub bank: i32,
    /// `PATCH(..)` value
    pub patch: i32,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            gate_width: DEFAULT_GATE_WIDTH,
            bank: DEFAULT_BANK,
            patch: DEFAULT_PATCH,
        }
    }
}

/// A rendered file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Destination path
    pub path: PathBuf,
    /// Full file text
    pub contents: String,
}

/// Incremental reader that feeds lines of one format into a pattern
#[derive(Debug, Clone)]
pub struct PatternReader {
    format: Format,
    pattern: Pattern,
    line: usize,
}

impl PatternReader {
    /// Create a reader starting from a default pattern
    pub fn new(format: Format) -> Self {
        Self {
            format,
            pattern: Pattern::new(),
            line: 0,
        }
    }

    /// Number of lines fed so far
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Feed the next line
    pub fn feed(&mut self, text: &str) -> Result<(), ParseError> {
        self.line += 1;
        self.format.read_line(&mut self.pattern, self.line, text)
    }

    /// Pattern built so far
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Finish reading and take the pattern
    pub fn finish(self) -> Pattern {
        self.pattern
    }
}

/// Read a complete file body in the given format
pub fn read_str(format: Format, text: &str) -> Result<Pattern, ParseError> {
    let mut reader = PatternReader::new(format);
    for line in text.lines() {
        reader.feed(line)?;
    }
    Ok(reader.finish())
}
