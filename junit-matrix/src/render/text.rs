// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plain-text matrix summary.

use crate::{
    matrix::Matrix,
    outcome::{CaseResult, GlyphTable},
};
use std::fmt::Write;

/// Renders the matrix as the classic text summary: a stepped axis header,
/// one glyph row per `(class, case)` with its combined verdict, and an
/// outcome tally footer.
pub fn render_text_matrix(matrix: &Matrix) -> String {
    let glyphs = GlyphTable::TEXT;
    let mut output = String::new();

    output.push_str("\nMatrix Test Report\n");
    output.push_str("===================\n");

    let axes = matrix.report_order();
    let classes = matrix.class_names();

    // Widest class or case name decides the left column.
    let left_indent = classes
        .iter()
        .flat_map(|classname| {
            std::iter::once(*classname).chain(matrix.case_names(classname))
        })
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);

    // Axis headings as a stepped tree.
    let mut treelines = String::new();
    for axis in &axes {
        let _ = writeln!(output, "{}    {}{}", " ".repeat(left_indent), treelines, axis);
        treelines.push_str("| ");
    }
    let _ = writeln!(output, "{}    {}", " ".repeat(left_indent), treelines);

    for classname in &classes {
        let _ = writeln!(output, "{classname}  ");

        for casename in matrix.case_names(classname) {
            let padding = " ".repeat(left_indent - casename.chars().count());
            let _ = write!(output, "- {casename}{padding}  ");

            for axis in &axes {
                match matrix.outcome(classname, casename, axis) {
                    CaseResult::Absent => output.push_str("  "),
                    outcome => {
                        let _ = write!(output, "{} ", glyphs.short(outcome));
                    }
                }
            }

            let combined = matrix.combined(classname, casename);
            let (glyph, label) = match combined {
                CaseResult::Unknown => (" ", ""),
                other => (glyphs.short(other), other.label()),
            };
            let _ = writeln!(output, " {glyph} {label}");
        }
    }

    output.push('\n');
    output.push_str(&"-".repeat(79));
    output.push('\n');
    output.push_str("Test Results:\n");
    for (outcome, count) in matrix.result_stats() {
        let _ = writeln!(output, "  {:<12} : {:>6}", outcome.label(), count);
    }

    output
}
