// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Canonical pattern model.
//!
//! A pattern is a fixed bank of 32 steps plus a length and a triplet flag.
//! Parsers fill it in line by line, writers read it once.

use anyhow::{Context, Result};
use serde::Serialize;

/// Number of steps held by every pattern
pub const STEP_COUNT: usize = 32;

/// Note value of an unset step
pub const DEFAULT_NOTE: i32 = 24;

/// Length of a freshly created pattern
pub const DEFAULT_LENGTH: u8 = 16;

/// One step, copied out of a [`Pattern`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Note value
    pub note: i32,
    /// Gate flag
    pub state: i32,
    /// Slide flag
    pub slide: i32,
    /// Accent flag
    pub accent: i32,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            note: DEFAULT_NOTE,
            state: 0,
            slide: 0,
            accent: 0,
        }
    }
}

/// A 32-step bass-line pattern.
///
/// The per-step arrays always have [`STEP_COUNT`] entries; step numbers in
/// the files are 1-based and map to `number - 1`. The `state` array holds
/// the gate flag after the reader's polarity negation (see
/// [`invert_state`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    /// Number of active steps (0-32)
    pub length: u8,
    /// Triplet timing flag
    pub triplet: i32,
    /// Note value per step
    pub note: [i32; STEP_COUNT],
    /// Gate flag per step
    pub state: [i32; STEP_COUNT],
    /// Slide flag per step
    pub slide: [i32; STEP_COUNT],
    /// Accent flag per step
    pub accent: [i32; STEP_COUNT],
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            triplet: 0,
            note: [DEFAULT_NOTE; STEP_COUNT],
            state: [0; STEP_COUNT],
            slide: [0; STEP_COUNT],
            accent: [0; STEP_COUNT],
        }
    }
}

impl Pattern {
    /// Create a pattern with every field at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the step at a 0-based index
    pub fn step(&self, index: usize) -> Option<Step> {
        if index >= STEP_COUNT {
            return None;
        }
        Some(Step {
            note: self.note[index],
            state: self.state[index],
            slide: self.slide[index],
            accent: self.accent[index],
        })
    }

    /// Overwrite the step at a 0-based index. Out-of-range indices are ignored.
    pub fn set_step(&mut self, index: usize, step: Step) {
        if index >= STEP_COUNT {
            return;
        }
        self.note[index] = step.note;
        self.state[index] = step.state;
        self.slide[index] = step.slide;
        self.accent[index] = step.accent;
    }

    /// Iterate over all 32 steps in order
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        (0..STEP_COUNT).filter_map(move |i| self.step(i))
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize pattern to YAML")
    }
}

/// Logical negation of a raw gate flag: `0` becomes `1`, anything else `0`.
///
/// Both machine families store the gate with opposite sense, so every
/// reader applies this once.
pub fn invert_state(raw: i32) -> i32 {
    if raw == 0 {
        1
    } else {
        0
    }
}
