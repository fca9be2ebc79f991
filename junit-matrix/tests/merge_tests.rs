// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Merger tests: duration totals, wire round trips, directory scans.

use camino_tempfile::tempdir;
use indoc::indoc;
use junit_matrix::{parse, Case, CaseResult, Marker, Merger, Property, ReportContainer, Suite};
use pretty_assertions::assert_eq;

fn suite_with_durations(name: &str, durations: &[f64]) -> Suite {
    let mut suite = Suite::new(name);
    for (index, duration) in durations.iter().enumerate() {
        let mut case = Case::new(format!("case_{index}"), format!("{name}.class"));
        case.set_duration(*duration);
        suite.add_case(case);
    }
    suite
}

#[test]
fn total_duration_sums_cases_only() {
    let mut merger = Merger::new();
    let mut first = suite_with_durations("first", &[1.1, 1.2, 1.3]);
    // The suite's own reported duration must not be double counted.
    first.duration = 99.0;
    merger.add_suite(first);
    merger.add_suite(suite_with_durations("second", &[2.0, 2.0]));

    assert!((merger.total_duration() - 8.6).abs() < 1e-9);
}

#[test]
fn merged_document_round_trips() {
    let mut suite = Suite::new("roundtrip");
    suite.add_property(("host", "build-04"));

    let mut ok = Case::new("test_ok", "myclass");
    ok.set_duration(3.0);
    ok.system_out = Some("hello\nworld".to_owned());
    ok.system_err = Some("byee".to_owned());
    ok.properties.push(Property::new("seed", "42"));
    suite.add_case(ok);

    let mut skippy = Case::new("test_skippy", "myclass");
    let mut marker = Marker::new("");
    marker.set_message("skipped at runtime");
    skippy.set_skipped(marker);
    suite.add_case(skippy);

    let mut bad = Case::new("test_bad", "myclass");
    bad.set_failure(Marker::new("assert in frame 3"));
    suite.add_case(bad);

    let mut merger = Merger::new();
    merger.add_suite(suite);

    let document = merger.to_document().expect("serializes");
    assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(document.contains("<testsuites duration=\"3.000\">"));

    let reparsed = parse::parse_string(&document).expect("merged output parses");
    let suite = &reparsed.suites[0];
    assert_eq!(suite.name, "roundtrip");
    assert_eq!(suite.properties[0].name, "host");

    let cases = suite.all();
    assert_eq!(cases.len(), 3);

    assert_eq!(cases[0].name, "test_ok");
    assert_eq!(cases[0].classname, "myclass");
    assert_eq!(cases[0].duration, 3.0);
    assert_eq!(cases[0].outcome(), CaseResult::Passed);
    assert_eq!(cases[0].system_out.as_deref(), Some("hello\nworld"));
    assert_eq!(cases[0].system_err.as_deref(), Some("byee"));
    assert_eq!(cases[0].properties[0].value, "42");

    // The empty marker body became the fixed literal on the way back in;
    // presence and message survive, emptiness deliberately does not.
    let skipped = cases[1].skipped.as_ref().expect("still skipped");
    assert_eq!(skipped.message.as_deref(), Some("skipped at runtime"));
    assert_eq!(skipped.text, "skipped");

    let failure = cases[2].failure.as_ref().expect("still failed");
    assert_eq!(failure.text, "assert in frame 3");
}

#[test]
fn case_children_are_written_in_fixed_order() {
    let mut case = Case::new("t", "c");
    case.system_out = Some("out".to_owned());
    case.system_err = Some("err".to_owned());
    case.set_failure(Marker::new("boom"));
    case.properties.push(Property::new("k", "v"));

    let mut suite = Suite::new("s");
    suite.add_case(case);
    let mut merger = Merger::new();
    merger.add_suite(suite);

    let document = merger.to_document().expect("serializes");
    let position = |needle: &str| document.find(needle).unwrap_or_else(|| {
        panic!("`{needle}` not found in:\n{document}")
    });

    assert!(position("<system-err>") < position("<system-out>"));
    assert!(position("<system-out>") < position("<failure>"));
    assert!(position("<failure>") < position("<properties>"));
}

#[test]
fn directory_scans_skip_what_they_cannot_parse() {
    let dir = tempdir().expect("tempdir created");
    let root = dir.path();

    fs_err_write(root.join("b_second.xml"), indoc! {r#"
        <testsuite name="second">
            <testcase name="t2" classname="c" time="2.0"/>
        </testsuite>
    "#});
    fs_err_write(root.join("a_first.xml"), indoc! {r#"
        <testsuite name="first">
            <testcase name="t1" classname="c" time="1.0"/>
        </testsuite>
    "#});
    fs_err_write(root.join("notes.txt"), "not xml at all");
    std::fs::create_dir(root.join("nested")).expect("subdir created");
    fs_err_write(root.join("nested").join("deep.xml"), indoc! {r#"
        <testsuite name="deep">
            <testcase name="t3" classname="c" time="4.0"/>
        </testsuite>
    "#});

    let mut merger = Merger::new();
    merger.add_path(root).expect("directory scan never fails");

    let names: Vec<String> = merger
        .suites()
        .iter()
        .map(|suite| suite.name.clone())
        .collect();
    // Walk order is sorted by file name, directories visited in order too.
    assert_eq!(names, ["first", "second", "deep"]);
    assert!((merger.total_duration() - 7.0).abs() < 1e-9);
}

#[test]
fn directly_named_bad_files_propagate() {
    let dir = tempdir().expect("tempdir created");
    let bad = dir.path().join("bad.xml");
    fs_err_write(bad.clone(), "<html>nope</html>");

    let mut merger = Merger::new();
    assert!(merger.add_path(&bad).is_err());

    let missing = dir.path().join("does-not-exist.xml");
    assert!(merger.add_path(&missing).is_err());
}

#[test]
fn merging_parsed_strings_collects_their_suites() {
    let mut merger = Merger::new();
    merger
        .add_source(&junit_matrix::parse::ReportInput::Text(
            indoc! {r#"
                <testsuites>
                    <testsuite name="one"><testcase name="a" classname="c"/></testsuite>
                    <testsuite name="two">
                        <testcase name="b" classname="c"><failure message="x"/></testcase>
                    </testsuite>
                </testsuites>
            "#}
            .to_owned(),
        ))
        .expect("string input parses");

    assert_eq!(merger.suites().len(), 2);
    assert_eq!(merger.failures().len(), 1);
    assert!(merger.skips().is_empty());
}

fn fs_err_write(path: camino::Utf8PathBuf, contents: &str) {
    fs_err::write(path, contents).expect("fixture written");
}
