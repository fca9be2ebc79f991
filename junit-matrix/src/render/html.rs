// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTML pages for single reports and matrices.

use crate::{
    matrix::Matrix,
    outcome::{CaseResult, GlyphTable},
    report::{Case, Report, Suite},
};
use std::fmt::Write;

/// The embedded stylesheet: loaded once into the binary, immutable for the
/// process lifetime.
static STYLESHEET: &str = include_str!("report.css");

/// Renders one parsed report as a self-contained HTML page.
pub fn render_report(report: &Report) -> String {
    let mut page = String::new();
    let title = report.label();

    let _ = write!(
        page,
        "<html>\n<head>\n<title>{} - Test Report</title>\n<style type=\"text/css\">\n{}\n</style>\n</head>\n<body>\n<h1>Test Report</h1>\n",
        escape(&title),
        STYLESHEET,
    );

    // Suite index, only worth having with more than one suite.
    if report.suites.len() > 1 {
        page.push_str("<ul>\n");
        for (index, suite) in report.suites.iter().enumerate() {
            let _ = writeln!(
                page,
                "<li><a href=\"#suite-{index}\">{}</a></li>",
                escape(&suite.name)
            );
        }
        page.push_str("</ul>\n");
    }

    for (index, suite) in report.suites.iter().enumerate() {
        render_suite(&mut page, suite, index);
    }

    page.push_str("</body>\n</html>\n");
    page
}

fn render_suite(page: &mut String, suite: &Suite, index: usize) {
    let _ = write!(
        page,
        "<div class=\"testsuite\">\n<a name=\"suite-{index}\"></a>\n<h2>Test Suite: {}</h2>\n",
        escape(&suite.name)
    );
    if let Some(package) = &suite.package {
        let _ = writeln!(page, "Package: {}<br/>", escape(package));
    }

    if !suite.properties.is_empty() {
        page.push_str("<table class=\"properties\">\n");
        for property in &suite.properties {
            let _ = writeln!(
                page,
                "<tr><th>{}</th><td>{}</td></tr>",
                escape(&property.name),
                escape(&property.value)
            );
        }
        page.push_str("</table>\n");
    }

    let _ = write!(
        page,
        "<table>\n\
         <tr><th align=\"left\">Duration</th><td align=\"right\">{} sec</td></tr>\n\
         <tr><th align=\"left\">Test Cases</th><td align=\"right\">{}</td></tr>\n\
         <tr><th align=\"left\">Failures</th><td align=\"right\">{}</td></tr>\n\
         </table>\n",
        suite.duration,
        suite.all().len(),
        suite.failed().len(),
    );

    for error in &suite.errors {
        let _ = writeln!(
            page,
            "<div class=\"failure\"><b>Suite Error: {}</b><br/><pre>{}</pre></div>",
            escape(error.message.as_deref().unwrap_or("")),
            escape(&error.text)
        );
    }

    render_toc(page, suite, index);

    page.push_str("<hr size=\"2\"/>\n<h2>Test Results</h2>\n<div class=\"testclasses\">\n");
    for (class_index, class) in suite.classes().enumerate() {
        let _ = write!(
            page,
            "<hr size=\"2\"/>\n<a name=\"class-{index}-{class_index}\"></a>\n\
             <div class=\"testclass\">\n<div>Test Class: {}</div>\n<div class=\"testcases\">\n",
            escape(&class.name)
        );
        for (case_index, case) in class.cases.iter().enumerate() {
            render_case(page, case, index, class_index, case_index);
        }
        page.push_str("</div>\n</div>\n");
    }
    page.push_str("</div>\n</div>\n");
}

// Failures and skips first, then every class.
fn render_toc(page: &mut String, suite: &Suite, index: usize) {
    page.push_str("<a name=\"toc\"></a>\n<h2>Results Index</h2>\n<ul>\n");

    render_toc_group(page, suite, index, "Failures", CaseResult::Failed);
    render_toc_group(page, suite, index, "Skipped", CaseResult::Skipped);

    page.push_str("<li>All Test Classes\n<ul>\n");
    for (class_index, class) in suite.classes().enumerate() {
        let _ = writeln!(
            page,
            "<li><a href=\"#class-{index}-{class_index}\">{}</a></li>",
            escape(&class.name)
        );
    }
    page.push_str("</ul>\n</li>\n</ul>\n");
}

fn render_toc_group(
    page: &mut String,
    suite: &Suite,
    suite_index: usize,
    heading: &str,
    outcome: CaseResult,
) {
    let mut entries = String::new();
    for (class_index, class) in suite.classes().enumerate() {
        for (case_index, case) in class.cases.iter().enumerate() {
            if case.outcome() != outcome {
                continue;
            }
            let _ = writeln!(
                entries,
                "<li><a href=\"#case-{suite_index}-{class_index}-{case_index}\">{}</a></li>",
                escape(&case.fullname())
            );
        }
    }
    if !entries.is_empty() {
        let _ = write!(page, "<li>{heading}\n<ul>\n{entries}</ul>\n</li>\n");
    }
}

fn render_case(
    page: &mut String,
    case: &Case,
    suite_index: usize,
    class_index: usize,
    case_index: usize,
) {
    let _ = write!(
        page,
        "<a name=\"case-{suite_index}-{class_index}-{case_index}\"></a>\n\
         <div class=\"testcase\">\n<div class=\"details\">\n\
         <span class=\"testname\"><b>{}</b></span><br/>\n\
         <span class=\"testclassname\">{}</span><br/>\n\
         <span class=\"duration\">Time Taken: {}s</span>\n</div>\n",
        escape(&case.name),
        escape(&case.classname),
        case.duration,
    );

    if let Some(skipped) = &case.skipped {
        let _ = write!(
            page,
            "<hr size=\"1\"/>\n<div class=\"skipped\"><b>Skipped: {}</b><br/>\n<pre>{}</pre>\n</div>\n",
            escape(skipped.message.as_deref().unwrap_or("")),
            escape(&skipped.text),
        );
    }
    if let Some(failure) = &case.failure {
        let _ = write!(
            page,
            "<hr size=\"1\"/>\n<div class=\"failure\"><b>Failed: {}</b><br/>\n<pre>{}</pre>\n</div>\n",
            escape(failure.message.as_deref().unwrap_or("")),
            escape(&failure.text),
        );
    }

    if !case.properties.is_empty() {
        page.push_str("<hr size=\"1\"/>\n");
        for property in &case.properties {
            let _ = write!(
                page,
                "<div class=\"property\"><i>{}</i><br/>\n<pre>{}</pre></div>\n",
                escape(&property.name),
                escape(&property.value)
            );
        }
    }

    if let Some(stdout) = &case.system_out {
        let _ = write!(
            page,
            "<hr size=\"1\"/>\n<div class=\"stdout\"><i>Stdout</i><br/>\n<pre>{}</pre></div>\n",
            escape(stdout)
        );
    }
    if let Some(stderr) = &case.system_err {
        let _ = write!(
            page,
            "<hr size=\"1\"/>\n<div class=\"stderr\"><i>Stderr</i><br/>\n<pre>{}</pre></div>\n",
            escape(stderr)
        );
    }
    page.push_str("</div>\n");
}

/// Renders the cross-report matrix page. Axis headers link to the per-input
/// pages the CLI writes next to it.
pub fn render_html_matrix(matrix: &Matrix) -> String {
    let glyphs = GlyphTable::HTML;
    let mut page = String::new();

    let _ = write!(
        page,
        "<html>\n<head>\n<title>Test Matrix</title>\n<style type=\"text/css\">\n{STYLESHEET}\n</style>\n</head>\n<body>\n<h1>Test Matrix</h1>\n",
    );

    let axes = matrix.report_order();

    page.push_str("<table class=\"matrix\">\n<tr><th></th>");
    for axis in &axes {
        let _ = write!(
            page,
            "<th class=\"axis\"><a href=\"{}.html\">{}</a></th>",
            escape(axis),
            escape(short_axis(axis))
        );
    }
    page.push_str("<th>Combined</th></tr>\n");

    for classname in matrix.class_names() {
        let _ = writeln!(
            page,
            "<tr class=\"testclass\"><td colspan=\"{}\">{}</td></tr>",
            axes.len() + 2,
            escape(classname)
        );

        for casename in matrix.case_names(classname) {
            let display = casename.strip_prefix(classname).unwrap_or(casename);
            let _ = write!(page, "<tr><td class=\"testname\">{}</td>", escape(display));
            for axis in &axes {
                match matrix.outcome(classname, casename, axis) {
                    CaseResult::Absent => page.push_str("<td class=\"absent\"></td>"),
                    outcome => {
                        let _ = write!(
                            page,
                            "<td class=\"outcome\">{}</td>",
                            glyphs.short(outcome)
                        );
                    }
                }
            }
            let combined = matrix.combined(classname, casename);
            let (glyph, label) = match combined {
                CaseResult::Unknown => ("", ""),
                other => (glyphs.short(other), other.label()),
            };
            let _ = writeln!(page, "<td class=\"combined\">{glyph} {label}</td></tr>");
        }
    }
    page.push_str("</table>\n");

    page.push_str("<h2>Test Results</h2>\n<table class=\"stats\">\n");
    for (outcome, count) in matrix.result_stats() {
        let _ = writeln!(
            page,
            "<tr><th>{}</th><td>{count}</td></tr>",
            escape(outcome.label())
        );
    }
    page.push_str("</table>\n</body>\n</html>\n");

    page
}

// Axis labels are file basenames; the .xml suffix is just noise in a column
// heading.
fn short_axis(axis: &str) -> &str {
    axis.strip_suffix(".xml").unwrap_or(axis)
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
