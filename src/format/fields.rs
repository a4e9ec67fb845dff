// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Field extraction shared by both line readers.

use crate::error::ParseError;
use crate::pattern::STEP_COUNT;

/// Separators that may sit in front of a trailing value:
/// `LAST_STEP(15);`, `END_STEP\t= 7`, `TRIPLET = 0`
const VALUE_SEPARATORS: [char; 4] = ['(', '\t', '=', ' '];

/// Extract the integer at the end of a header line.
///
/// Closing `)`, `;` and surrounding whitespace are trimmed first, then the
/// value is whatever follows the last separator.
pub(crate) fn trailing_value(line: usize, text: &str) -> Result<i64, ParseError> {
    let trimmed = text.trim_matches(|c: char| c == ')' || c == ';' || c.is_whitespace());

    let value = match trimmed.rfind(|c: char| VALUE_SEPARATORS.contains(&c)) {
        Some(pos) => &trimmed[pos + 1..],
        None => "",
    };

    if value.is_empty() {
        return Err(ParseError::MissingValue {
            line,
            text: text.to_string(),
        });
    }

    parse_int(line, text, value)
}

/// Extract the trailing value of a header line as a flag or field value
pub(crate) fn trailing_field(line: usize, text: &str) -> Result<i32, ParseError> {
    let value = trailing_value(line, text)?;
    i32::try_from(value).map_err(|_| ParseError::InvalidNumber {
        line,
        value: value.to_string(),
        text: text.to_string(),
    })
}

/// Parse one integer field
pub(crate) fn parse_int(line: usize, text: &str, value: &str) -> Result<i64, ParseError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidNumber {
            line,
            value: value.trim().to_string(),
            text: text.to_string(),
        })
}

/// Parse one per-step field (note, state, slide or accent)
pub(crate) fn parse_field(line: usize, text: &str, value: &str) -> Result<i32, ParseError> {
    let parsed = parse_int(line, text, value)?;
    i32::try_from(parsed).map_err(|_| ParseError::InvalidNumber {
        line,
        value: value.trim().to_string(),
        text: text.to_string(),
    })
}

/// Convert a 1-based step number into an array index
pub(crate) fn step_index(line: usize, text: &str, value: &str) -> Result<usize, ParseError> {
    let step = parse_int(line, text, value)?;
    if step < 1 || step > STEP_COUNT as i64 {
        return Err(ParseError::StepOutOfRange {
            line,
            step,
            text: text.to_string(),
        });
    }
    Ok((step - 1) as usize)
}

/// Check a declared length against the 32-step bank
pub(crate) fn pattern_length(line: usize, text: &str, value: i64) -> Result<u8, ParseError> {
    if !(0..=STEP_COUNT as i64).contains(&value) {
        return Err(ParseError::LengthOutOfRange {
            line,
            length: value,
            text: text.to_string(),
        });
    }
    Ok(value as u8)
}

/// Build a malformed-step error
pub(crate) fn malformed(line: usize, text: &str, reason: impl Into<String>) -> ParseError {
    ParseError::MalformedStep {
        line,
        reason: reason.into(),
        text: text.to_string(),
    }
}
