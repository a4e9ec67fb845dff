// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! TB-3 parameter syntax.
//!
//! ```text
//! TRIPLET(0);
//! LAST_STEP(16);
//! GATE_WIDTH(67);
//! STEP1(24,0,0,0);
//! ...
//! STEP32(24,0,0,0);
//! BANK(0);
//! PATCH(-1);
//! ```
//!
//! Step records are `STEP<n>(<note>,<slide>,<state>,<accent>);` for all 32
//! steps. There is no split: one pattern, one file.

use tracing::debug;

use super::fields::{self, malformed};
use super::WriterOptions;
use crate::error::ParseError;
use crate::pattern::{invert_state, Pattern, Step, STEP_COUNT};

/// Apply one TB-3 line to the pattern.
///
/// Lines that match no known prefix, including blank lines, are skipped.
pub fn read_line(pattern: &mut Pattern, line: usize, text: &str) -> Result<(), ParseError> {
    if text.starts_with("LAST") {
        let value = fields::trailing_value(line, text)?;
        pattern.length = fields::pattern_length(line, text, value)?;
        debug!(line, length = pattern.length, "TB-3 last step");
    } else if text.starts_with("TRIPLET") {
        pattern.triplet = fields::trailing_field(line, text)?;
        debug!(line, triplet = pattern.triplet, "TB-3 triplet");
    } else if text.starts_with("STEP") && !text.starts_with("STEP ") {
        read_step(pattern, line, text)?;
    }
    Ok(())
}

/// `STEP<n>(<note>,<slide>,<state>,<accent>);`
fn read_step(pattern: &mut Pattern, line: usize, text: &str) -> Result<(), ParseError> {
    let record = text["STEP".len()..].trim_end();
    let record = record.strip_suffix(';').unwrap_or(record);
    let record = record
        .strip_suffix(')')
        .ok_or_else(|| malformed(line, text, "missing closing parenthesis"))?;
    let (number, body) = record
        .split_once('(')
        .ok_or_else(|| malformed(line, text, "missing opening parenthesis"))?;

    let values: Vec<&str> = body.split(',').collect();
    if values.len() != 4 {
        return Err(malformed(
            line,
            text,
            format!("expected 4 fields, found {}", values.len()),
        ));
    }

    let index = fields::step_index(line, text, number)?;
    let note = fields::parse_field(line, text, values[0])?;
    let slide = fields::parse_field(line, text, values[1])?;
    let state = fields::parse_field(line, text, values[2])?;
    let accent = fields::parse_field(line, text, values[3])?;

    pattern.set_step(
        index,
        Step {
            note,
            state: invert_state(state),
            slide,
            accent,
        },
    );

    debug!(line, step = index + 1, note, slide, state, accent, "TB-3 step");
    Ok(())
}

/// Render a pattern as one TB-3 file body
pub fn render(pattern: &Pattern, options: &WriterOptions) -> String {
    let mut lines = Vec::with_capacity(STEP_COUNT + 5);
    lines.push(format!("TRIPLET({});", pattern.triplet));
    lines.push(format!("LAST_STEP({});", pattern.length));
    lines.push(format!("GATE_WIDTH({});", options.gate_width));

    for (index, step) in pattern.steps().enumerate() {
        lines.push(format!(
            "STEP{}({},{},{},{});",
            index + 1,
            step.note,
            step.slide,
            step.state,
            step.accent
        ));
    }

    lines.push(format!("BANK({});", options.bank));
    lines.push(format!("PATCH({});", options.patch));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(lines: &[&str]) -> Pattern {
        let mut pattern = Pattern::new();
        for (i, line) in lines.iter().enumerate() {
            read_line(&mut pattern, i + 1, line).unwrap();
        }
        pattern
    }

    #[test]
    fn test_read_last_step() {
        let pattern = read(&["LAST_STEP(15);"]);
        assert_eq!(pattern.length, 15);
    }

    #[test]
    fn test_read_triplet() {
        let pattern = read(&["TRIPLET(2);"]);
        assert_eq!(pattern.triplet, 2);
    }

    #[test]
    fn test_read_step_sets_index() {
        let pattern = read(&["STEP8(48,2,1,3);"]);

        let mut expected = Pattern::new();
        expected.note[7] = 48;
        expected.slide[7] = 2;
        expected.accent[7] = 3;
        // raw 1 is stored negated
        expected.state[7] = 0;
        assert_eq!(pattern, expected);
    }

    #[test]
    fn test_read_step_inverts_state() {
        let pattern = read(&["STEP1(30,0,0,0);", "STEP32(31,1,1,1);"]);
        assert_eq!(pattern.state[0], 1);
        assert_eq!(pattern.state[31], 0);
        assert_eq!(pattern.note[31], 31);
    }

    #[test]
    fn test_unknown_and_blank_lines_ignored() {
        let pattern = read(&["GATE_WIDTH(67);", "BANK(0);", "PATCH(-1);", "", "\n"]);
        assert_eq!(pattern, Pattern::new());
    }

    #[test]
    fn test_spaced_step_ignored() {
        // TB-03 step records are not TB-3 records
        let pattern = read(&["STEP 8\t= STATE=1 NOTE=48 ACCENT=3 SLIDE=2"]);
        assert_eq!(pattern, Pattern::new());
    }

    #[test]
    fn test_read_crlf() {
        let pattern = read(&["LAST_STEP(9);\r\n", "STEP2(40,1,0,1);\r\n"]);
        assert_eq!(pattern.length, 9);
        assert_eq!(pattern.note[1], 40);
        assert_eq!(pattern.state[1], 1);
    }

    #[test]
    fn test_malformed_step() {
        let mut pattern = Pattern::new();

        let err = read_line(&mut pattern, 5, "STEP8(48,2,1);").unwrap_err();
        assert!(matches!(err, ParseError::MalformedStep { line: 5, .. }));

        let err = read_line(&mut pattern, 6, "STEP8 48,2,1,3").unwrap_err();
        assert!(matches!(err, ParseError::MalformedStep { line: 6, .. }));

        let err = read_line(&mut pattern, 7, "STEP8(48,x,1,3);").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 7, .. }));

        let err = read_line(&mut pattern, 8, "STEP33(48,0,1,3);").unwrap_err();
        assert!(matches!(err, ParseError::StepOutOfRange { step: 33, .. }));
    }

    #[test]
    fn test_length_out_of_range() {
        let mut pattern = Pattern::new();
        let err = read_line(&mut pattern, 2, "LAST_STEP(40);").unwrap_err();
        assert!(matches!(err, ParseError::LengthOutOfRange { length: 40, .. }));
    }

    #[test]
    fn test_render_default_pattern() {
        let text = render(&Pattern::new(), &WriterOptions::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 37);
        assert_eq!(lines[0], "TRIPLET(0);");
        assert_eq!(lines[1], "LAST_STEP(16);");
        assert_eq!(lines[2], "GATE_WIDTH(67);");
        assert_eq!(lines[3], "STEP1(24,0,0,0);");
        assert_eq!(lines[34], "STEP32(24,0,0,0);");
        assert_eq!(lines[35], "BANK(0);");
        assert_eq!(lines[36], "PATCH(-1);");
        assert!(text.ends_with("PATCH(-1);\n"));
    }

    #[test]
    fn test_render_field_order() {
        let mut pattern = Pattern::new();
        pattern.length = 7;
        pattern.triplet = 1;
        pattern.note[2] = 36;
        pattern.slide[2] = 1;
        pattern.state[2] = 1;
        pattern.accent[2] = 0;

        let text = render(&pattern, &WriterOptions::default());
        assert!(text.starts_with("TRIPLET(1);\nLAST_STEP(7);\n"));
        assert!(text.contains("\nSTEP3(36,1,1,0);\n"));
    }

    #[test]
    fn test_same_syntax_rewrite_flips_gate() {
        let mut pattern = Pattern::new();
        read_line(&mut pattern, 1, "STEP1(24,0,1,0);").unwrap();
        read_line(&mut pattern, 2, "STEP2(24,0,0,0);").unwrap();

        // the gate is negated on read and written back unchanged
        let text = render(&pattern, &WriterOptions::default());
        assert!(text.contains("\nSTEP1(24,0,0,0);\n"));
        assert!(text.contains("\nSTEP2(24,0,1,0);\n"));
    }

    #[test]
    fn test_render_custom_constants() {
        let options = WriterOptions {
            gate_width: 50,
            bank: 2,
            patch: 7,
        };
        let text = render(&Pattern::new(), &options);
        assert!(text.contains("GATE_WIDTH(50);"));
        assert!(text.contains("BANK(2);"));
        assert!(text.contains("PATCH(7);"));
    }
}
