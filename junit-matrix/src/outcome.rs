// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed set of per-run and combined test outcomes.

use std::fmt;

/// The outcome of a test case, either observed in a single run or combined
/// across several runs.
///
/// Variant order is the display order of the tally footer, so keep it sorted
/// by label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CaseResult {
    /// Nothing is known about the case (empty outcome history).
    Unknown,
    /// The case exists in the matrix universe but not in this run.
    Absent,
    /// The case ran and failed (or errored).
    Failed,
    /// Combined: failed in some runs, passed in others.
    PartialFail,
    /// Combined: a pre-combined partial pass folded back in.
    PartialPass,
    /// The case ran to completion.
    Passed,
    /// The case was present but not executed.
    Skipped,
    /// Combined: failed everywhere it ran.
    TotalFail,
    /// Combined: skipped everywhere it ran.
    Untested,
}

impl CaseResult {
    /// Human-readable label, title-cased for report footers. `Unknown` is
    /// deliberately blank.
    pub fn label(self) -> &'static str {
        match self {
            CaseResult::Unknown => "",
            CaseResult::Absent => "Absent",
            CaseResult::Failed => "Failed",
            CaseResult::PartialFail => "Partial Failure",
            CaseResult::PartialPass => "Partial Pass",
            CaseResult::Passed => "Passed",
            CaseResult::Skipped => "Skipped",
            CaseResult::TotalFail => "Total Failure",
            CaseResult::Untested => "Untested",
        }
    }
}

impl fmt::Display for CaseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Short-glyph lookup for compact matrix cells.
///
/// The table is a pure mapping: renderers may swap individual glyphs (the
/// HTML matrix prefers the literal word "ok" over the pass slash) without
/// touching the combined-result precedence.
#[derive(Clone, Copy, Debug)]
pub struct GlyphTable {
    /// Glyph for [`CaseResult::Passed`], the only slot renderers override.
    pub passed: &'static str,
}

impl GlyphTable {
    /// Glyphs for the plain-text matrix.
    pub const TEXT: Self = Self { passed: "/" };

    /// Glyphs for the HTML matrix.
    pub const HTML: Self = Self { passed: "ok" };

    /// Returns the short glyph for an outcome.
    pub fn short(&self, outcome: CaseResult) -> &'static str {
        match outcome {
            CaseResult::Passed => self.passed,
            CaseResult::Skipped => "s",
            CaseResult::Failed => "f",
            CaseResult::TotalFail => "F",
            CaseResult::PartialPass => "%",
            CaseResult::PartialFail => "X",
            CaseResult::Untested => "U",
            CaseResult::Absent | CaseResult::Unknown => "?",
        }
    }
}
