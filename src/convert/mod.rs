// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Conversion driver.
//!
//! One run reads one input file, detects its syntax from the first
//! non-empty line, reads every line into a fresh [`Pattern`] and renders it
//! in the other syntax. All output is rendered before anything is written,
//! so a failing run leaves no files behind.

pub mod store;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub use store::{FileStore, LocalStore, MemoryStore};

use crate::error::{ConvertError, Result};
use crate::format::{Format, OutputFile, PatternReader, WriterOptions};
use crate::pattern::Pattern;

/// Result of one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Input file
    pub input: PathBuf,
    /// Output path as requested
    pub requested: PathBuf,
    /// Detected input syntax
    pub source: Format,
    /// Syntax written
    pub target: Format,
    /// Pattern read from the input
    pub pattern: Pattern,
    /// Input lines as read
    pub input_lines: Vec<String>,
    /// Rendered output files
    pub files: Vec<OutputFile>,
}

impl Conversion {
    /// Whether the output was split into more than one file
    pub fn is_split(&self) -> bool {
        self.files.len() > 1
    }

    /// Paths of the rendered files
    pub fn output_paths(&self) -> Vec<&Path> {
        self.files.iter().map(|f| f.path.as_path()).collect()
    }
}

/// Detect, read and render one input without touching any file.
///
/// `input` only names the source in errors and in the result.
pub fn convert_lines<S: AsRef<str>>(
    input: &Path,
    lines: &[S],
    output: &Path,
    options: &WriterOptions,
) -> Result<Conversion> {
    let first = lines
        .iter()
        .position(|line| !line.as_ref().trim().is_empty())
        .ok_or_else(|| ConvertError::EmptyInput(input.to_path_buf()))?;

    let first_line = lines[first].as_ref().trim_start_matches('\u{feff}');
    let source = Format::detect(first_line)
        .ok_or_else(|| ConvertError::UnrecognizedFormat(input.to_path_buf()))?;
    let target = source.opposite();
    info!(input = %input.display(), %source, %target, "Detected input format");

    let mut reader = PatternReader::new(source);
    let parse_error = |source| ConvertError::Parse {
        path: input.to_path_buf(),
        source,
    };

    // line numbers stay aligned with the file, leading blanks included
    for line in &lines[..first] {
        reader.feed(line.as_ref()).map_err(parse_error)?;
    }
    reader.feed(first_line).map_err(parse_error)?;
    for line in &lines[first + 1..] {
        reader.feed(line.as_ref()).map_err(parse_error)?;
    }
    // end-of-input marker
    reader.feed("").map_err(parse_error)?;

    debug!(lines = reader.lines_read(), "Input read");
    let pattern = reader.finish();

    let files = target.render(&pattern, output, options);
    if files.len() > 1 {
        warn!(
            requested = %output.display(),
            files = files.len(),
            length = pattern.length,
            "Pattern split across several output files"
        );
    }

    Ok(Conversion {
        input: input.to_path_buf(),
        requested: output.to_path_buf(),
        source,
        target,
        pattern,
        input_lines: lines.iter().map(|l| l.as_ref().to_string()).collect(),
        files,
    })
}

/// Converter bound to a file store
pub struct Converter<S: FileStore> {
    store: S,
    options: WriterOptions,
}

impl<S: FileStore> Converter<S> {
    /// Create a converter
    pub fn new(store: S, options: WriterOptions) -> Self {
        Self { store, options }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take back the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Read and render `input` without writing anything
    pub fn plan(&self, input: &Path, output: &Path) -> Result<Conversion> {
        if !self.store.exists(input) {
            return Err(ConvertError::MissingInput(input.to_path_buf()));
        }

        let lines = self.store.read_lines(input).map_err(|source| ConvertError::Io {
            path: input.to_path_buf(),
            source,
        })?;

        convert_lines(input, lines.as_slice(), output, &self.options)
    }

    /// Write every rendered file of a planned conversion.
    ///
    /// If one write fails, the files already written by this call are
    /// removed again before the error is returned.
    pub fn write_files(&mut self, conversion: &Conversion) -> Result<()> {
        let mut written: Vec<&Path> = Vec::with_capacity(conversion.files.len());
        for file in &conversion.files {
            if let Err(source) = self.store.write(&file.path, &file.contents) {
                self.discard(&written);
                return Err(ConvertError::Io {
                    path: file.path.clone(),
                    source,
                });
            }
            info!(path = %file.path.display(), "Wrote output file");
            written.push(&file.path);
        }
        Ok(())
    }

    fn discard(&mut self, written: &[&Path]) {
        for path in written {
            match self.store.remove(path) {
                Ok(()) => debug!(path = %path.display(), "Removed partial output"),
                Err(err) => warn!(
                    path = %path.display(),
                    error = %err,
                    "Could not remove partial output"
                ),
            }
        }
    }

    /// Convert `input` and write the result next to `output`
    pub fn convert(&mut self, input: &Path, output: &Path) -> Result<Conversion> {
        let conversion = self.plan(input, output)?;
        self.write_files(&conversion)?;
        Ok(conversion)
    }
}

impl Converter<LocalStore> {
    /// Converter on the local filesystem
    pub fn local(options: WriterOptions) -> Self {
        Self::new(LocalStore, options)
    }
}
