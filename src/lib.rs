// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! tbconv - pattern backup converter for TB-3 and TB-03 bass lines.
//!
//! Reads a parameter backup written by one machine family, builds a
//! [`Pattern`] from it and renders the same pattern in the other family's
//! syntax.

pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod logging;
pub mod pattern;

pub use config::ConvertConfig;
pub use convert::{convert_lines, Conversion, Converter, FileStore, LocalStore, MemoryStore};
pub use error::{ConvertError, ParseError};
pub use format::{Format, OutputFile, PatternReader, WriterOptions};
pub use pattern::{Pattern, Step};
