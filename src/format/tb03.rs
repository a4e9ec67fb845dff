// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! TB-03 parameter syntax.
//!
//! ```text
//! END_STEP	= 15
//! TRIPLET	= 0
//! STEP 1	= STATE=0 NOTE=24 ACCENT=0 SLIDE=0
//! ...
//! STEP 16	= STATE=0 NOTE=24 ACCENT=0 SLIDE=0
//! ```
//!
//! A TB-03 file holds 16 steps. Patterns of 16 steps or more are written as
//! two files, `<stem>a.<ext>` for steps 1-16 and `<stem>b.<ext>` for steps
//! 17-32.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::fields::{self, malformed};
use super::OutputFile;
use crate::error::ParseError;
use crate::pattern::{invert_state, Pattern, Step};

/// Steps per TB-03 file
pub const BLOCK_STEPS: usize = 16;

/// `END_STEP` written for the first file of a split pattern
const SPLIT_END_STEP: usize = BLOCK_STEPS - 1;

/// Field names of a step record, in file order
const STEP_KEYS: [&str; 4] = ["STATE", "NOTE", "ACCENT", "SLIDE"];

/// Apply one TB-03 line to the pattern.
///
/// Lines that match no known prefix, including blank lines, are skipped.
pub fn read_line(pattern: &mut Pattern, line: usize, text: &str) -> Result<(), ParseError> {
    if text.starts_with("END_") {
        let value = fields::trailing_value(line, text)?;
        pattern.length = fields::pattern_length(line, text, value)?;
        debug!(line, length = pattern.length, "TB-03 end step");
    } else if text.starts_with("TRIPLET") {
        pattern.triplet = fields::trailing_field(line, text)?;
        debug!(line, triplet = pattern.triplet, "TB-03 triplet");
    } else if text.starts_with("STEP ") {
        read_step(pattern, line, text)?;
    }
    Ok(())
}

/// `STEP <n>\t= STATE=<s> NOTE=<note> ACCENT=<a> SLIDE=<sl>`
fn read_step(pattern: &mut Pattern, line: usize, text: &str) -> Result<(), ParseError> {
    let record = text["STEP ".len()..].trim_end();
    let (number, body) = record
        .split_once('=')
        .ok_or_else(|| malformed(line, text, "missing '=' after step number"))?;

    let tokens: Vec<&str> = body.split_whitespace().collect();
    if tokens.len() != STEP_KEYS.len() {
        return Err(malformed(
            line,
            text,
            format!("expected {} fields, found {}", STEP_KEYS.len(), tokens.len()),
        ));
    }

    let mut values = [0i32; 4];
    for ((slot, key), token) in values.iter_mut().zip(STEP_KEYS).zip(&tokens) {
        let value = token
            .strip_prefix(key)
            .and_then(|rest| rest.strip_prefix('='))
            .ok_or_else(|| malformed(line, text, format!("expected {}=<value>", key)))?;
        *slot = fields::parse_field(line, text, value)?;
    }
    let [state, note, accent, slide] = values;

    let index = fields::step_index(line, text, number)?;
    pattern.set_step(
        index,
        Step {
            note,
            state: invert_state(state),
            slide,
            accent,
        },
    );

    debug!(line, step = index + 1, state, note, accent, slide, "TB-03 step");
    Ok(())
}

/// Render a pattern as TB-03 files.
///
/// A pattern shorter than [`BLOCK_STEPS`] fits in one file at `output`.
/// Anything longer is split in two, see [`split_file_names`].
pub fn render(pattern: &Pattern, output: &Path) -> Vec<OutputFile> {
    let length = pattern.length as usize;

    if length < BLOCK_STEPS {
        return vec![OutputFile {
            path: output.to_path_buf(),
            contents: render_block(pattern, length, 0),
        }];
    }

    let (first, second) = split_file_names(output);
    vec![
        OutputFile {
            path: first,
            contents: render_block(pattern, SPLIT_END_STEP, 0),
        },
        OutputFile {
            path: second,
            contents: render_block(pattern, length - BLOCK_STEPS, BLOCK_STEPS),
        },
    ]
}

/// One 16-step file starting at canonical index `offset`
fn render_block(pattern: &Pattern, end_step: usize, offset: usize) -> String {
    let mut lines = Vec::with_capacity(BLOCK_STEPS + 2);
    lines.push(format!("END_STEP\t= {}", end_step));
    lines.push(format!("TRIPLET\t= {}", pattern.triplet));

    for number in 1..=BLOCK_STEPS {
        let index = offset + number - 1;
        lines.push(format!(
            "STEP {}\t= STATE={} NOTE={} ACCENT={} SLIDE={}",
            number,
            pattern.state[index],
            pattern.note[index],
            pattern.accent[index],
            pattern.slide[index]
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Names for the two halves of a split pattern.
///
/// `out/pattern.prm` becomes `out/patterna.prm` and `out/patternb.prm`.
/// A file name without an extension just gets the suffix appended.
pub fn split_file_names(output: &Path) -> (PathBuf, PathBuf) {
    let suffixed = |suffix: &str| -> PathBuf {
        let stem = output.file_stem().map(OsString::from).unwrap_or_default();
        let mut name = stem;
        name.push(suffix);
        if let Some(ext) = output.extension() {
            name.push(".");
            name.push(ext);
        }
        output.with_file_name(name)
    };
    (suffixed("a"), suffixed("b"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_block(end_step: usize) -> String {
        let mut text = format!("END_STEP\t= {}\nTRIPLET\t= 0\n", end_step);
        for n in 1..=16 {
            text.push_str(&format!("STEP {}\t= STATE=0 NOTE=24 ACCENT=0 SLIDE=0\n", n));
        }
        text
    }

    #[test]
    fn test_read_end_step() {
        let mut pattern = Pattern::new();
        read_line(&mut pattern, 1, "END_STEP\t= 7").unwrap();
        assert_eq!(pattern.length, 7);

        read_line(&mut pattern, 1, "END_STEP        = 9").unwrap();
        assert_eq!(pattern.length, 9);
    }

    #[test]
    fn test_read_triplet() {
        let mut pattern = Pattern::new();
        read_line(&mut pattern, 2, "TRIPLET\t= 3").unwrap();
        assert_eq!(pattern.triplet, 3);
    }

    #[test]
    fn test_read_step() {
        let mut pattern = Pattern::new();
        read_line(&mut pattern, 3, "STEP 8\t= STATE=1 NOTE=48 ACCENT=3 SLIDE=2").unwrap();

        let mut expected = Pattern::new();
        expected.note[7] = 48;
        expected.slide[7] = 2;
        expected.accent[7] = 3;
        expected.state[7] = 0;
        assert_eq!(pattern, expected);
    }

    #[test]
    fn test_read_step_inverts_state() {
        let mut pattern = Pattern::new();
        read_line(&mut pattern, 1, "STEP 1\t= STATE=0 NOTE=30 ACCENT=0 SLIDE=0\n").unwrap();
        assert_eq!(pattern.state[0], 1);
    }

    #[test]
    fn test_tb3_step_ignored() {
        let mut pattern = Pattern::new();
        read_line(&mut pattern, 1, "STEP8(48,2,1,3);").unwrap();
        read_line(&mut pattern, 2, "").unwrap();
        assert_eq!(pattern, Pattern::new());
    }

    #[test]
    fn test_malformed_step() {
        let mut pattern = Pattern::new();

        let err = read_line(&mut pattern, 4, "STEP 8\t= STATE=1 NOTE=48 ACCENT=3").unwrap_err();
        assert!(matches!(err, ParseError::MalformedStep { line: 4, .. }));

        let err = read_line(&mut pattern, 5, "STEP 8\t= NOTE=48 STATE=1 ACCENT=3 SLIDE=2").unwrap_err();
        assert!(matches!(err, ParseError::MalformedStep { line: 5, .. }));

        let err = read_line(&mut pattern, 6, "STEP 8\t= STATE=on NOTE=48 ACCENT=3 SLIDE=2").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 6, .. }));

        let err = read_line(&mut pattern, 7, "STEP 0\t= STATE=1 NOTE=48 ACCENT=3 SLIDE=2").unwrap_err();
        assert!(matches!(err, ParseError::StepOutOfRange { step: 0, .. }));
    }

    #[test]
    fn test_same_syntax_rewrite_flips_gate() {
        let mut pattern = Pattern::new();
        read_line(&mut pattern, 1, "END_STEP\t= 3").unwrap();
        read_line(&mut pattern, 2, "STEP 1\t= STATE=1 NOTE=24 ACCENT=0 SLIDE=0").unwrap();
        read_line(&mut pattern, 3, "STEP 2\t= STATE=0 NOTE=24 ACCENT=0 SLIDE=0").unwrap();

        // the gate is negated on read and written back unchanged
        let files = render(&pattern, Path::new("bass.prm"));
        assert!(files[0]
            .contents
            .contains("\nSTEP 1\t= STATE=0 NOTE=24 ACCENT=0 SLIDE=0\n"));
        assert!(files[0]
            .contents
            .contains("\nSTEP 2\t= STATE=1 NOTE=24 ACCENT=0 SLIDE=0\n"));
    }

    #[test]
    fn test_render_length_15_single_file() {
        let mut pattern = Pattern::new();
        pattern.length = 15;

        let files = render(&pattern, Path::new("output_01.prm"));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("output_01.prm"));
        assert_eq!(files[0].contents, default_block(15));
    }

    #[test]
    fn test_render_length_14_single_file() {
        let mut pattern = Pattern::new();
        pattern.length = 14;

        let files = render(&pattern, Path::new("output_01.prm"));
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].contents, default_block(14));
    }

    #[test]
    fn test_render_length_16_splits() {
        let pattern = Pattern::new();

        let files = render(&pattern, Path::new("output_01.prm"));
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, PathBuf::from("output_01a.prm"));
        assert_eq!(files[1].path, PathBuf::from("output_01b.prm"));
        assert_eq!(files[0].contents, default_block(15));
        assert_eq!(files[1].contents, default_block(0));
    }

    #[test]
    fn test_render_second_block_reads_upper_steps() {
        let mut pattern = Pattern::new();
        pattern.length = 32;
        pattern.note[16] = 40;
        pattern.state[16] = 1;
        pattern.accent[31] = 1;
        pattern.slide[31] = 1;

        let files = render(&pattern, Path::new("bass.prm"));
        assert!(files[1].contents.starts_with("END_STEP\t= 16\n"));
        assert!(files[1]
            .contents
            .contains("\nSTEP 1\t= STATE=1 NOTE=40 ACCENT=0 SLIDE=0\n"));
        assert!(files[1]
            .contents
            .ends_with("STEP 16\t= STATE=0 NOTE=24 ACCENT=1 SLIDE=1\n"));
        assert!(files[0]
            .contents
            .contains("\nSTEP 1\t= STATE=0 NOTE=24 ACCENT=0 SLIDE=0\n"));
    }

    #[test]
    fn test_split_file_names() {
        let (a, b) = split_file_names(Path::new("dir.v2/pattern.prm"));
        assert_eq!(a, PathBuf::from("dir.v2/patterna.prm"));
        assert_eq!(b, PathBuf::from("dir.v2/patternb.prm"));

        let (a, b) = split_file_names(Path::new("pattern"));
        assert_eq!(a, PathBuf::from("patterna"));
        assert_eq!(b, PathBuf::from("patternb"));

        let (a, _) = split_file_names(Path::new("my.bass.prm"));
        assert_eq!(a, PathBuf::from("my.bassa.prm"));
    }
}
