// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ingestion tests: dialect tolerance and root-shape handling.

use indoc::indoc;
use junit_matrix::{parse, CaseResult, ParseError, Report, NO_TESTCLASS};
use pretty_assertions::assert_eq;

fn parse_ok(xml: &str) -> Report {
    parse::parse_string(xml).expect("document parses")
}

/// The flattened (class, case, outcome) view used to compare reports.
fn content(report: &Report) -> Vec<(String, String, CaseResult)> {
    report
        .suites
        .iter()
        .flat_map(|suite| suite.all())
        .map(|case| (case.classname.clone(), case.name.clone(), case.outcome()))
        .collect()
}

#[test]
fn three_root_shapes_are_equivalent() {
    let body = indoc! {r#"
        <testsuite name="suite1" time="1.5">
            <testcase name="test_ok" classname="example.Basic" time="0.5"/>
            <testcase name="test_bad" classname="example.Basic" time="0.5">
                <failure message="assertion failed">stack</failure>
            </testcase>
        </testsuite>
    "#};
    let plain = parse_ok(body);
    let wrapped = parse_ok(&format!("<testsuites>{body}</testsuites>"));
    let testrun = parse_ok(&format!("<testrun><testsuites>{body}</testsuites></testrun>"));

    assert_eq!(plain.suites.len(), 1);
    assert_eq!(plain.suites[0].name, "suite1");
    assert_eq!(content(&plain), content(&wrapped));
    assert_eq!(content(&plain), content(&testrun));
    assert_eq!(wrapped.suites[0].name, testrun.suites[0].name);
}

#[test]
fn unrecognized_root_is_an_error() {
    let err = parse::parse_string("<html><body/></html>").unwrap_err();
    match err {
        ParseError::UnrecognizedRoot { root } => assert_eq!(root.as_deref(), Some("html")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_document_is_an_error() {
    let err = parse::parse_string("").unwrap_err();
    assert!(matches!(err, ParseError::UnrecognizedRoot { root: None }));
}

#[test]
fn ill_formed_xml_is_an_error() {
    assert!(parse::parse_string("<testsuite name=\"x\"><testcase</testsuite>").is_err());
}

#[test]
fn durations_tolerate_grouping_commas_and_gaps() {
    let report = parse_ok(indoc! {r#"
        <testsuite name="s" time="2,000.25">
            <testcase name="grouped" classname="c" time="1,234.5"/>
            <testcase name="missing" classname="c"/>
            <testcase name="empty" classname="c" time=""/>
            <testcase name="words" classname="c" time="fast"/>
        </testsuite>
    "#});
    let suite = &report.suites[0];
    assert_eq!(suite.duration, 2000.25);
    let durations: Vec<f64> = suite.all().iter().map(|case| case.duration).collect();
    assert_eq!(durations, [1234.5, 0.0, 0.0, 0.0]);
}

#[test]
fn missing_classname_gets_the_sentinel() {
    let report = parse_ok(indoc! {r#"
        <testsuite name="s">
            <testcase name="anonymous"/>
            <testcase name="blank" classname=""/>
        </testsuite>
    "#});
    let suite = &report.suites[0];
    let class = suite.class(NO_TESTCLASS).expect("sentinel class exists");
    assert_eq!(class.cases.len(), 2);
}

#[test]
fn empty_markers_get_fixed_bodies() {
    let report = parse_ok(indoc! {r#"
        <testsuite name="s">
            <testcase name="skipped_empty" classname="c"><skipped/></testcase>
            <testcase name="failed_empty" classname="c"><failure></failure></testcase>
            <testcase name="errored_empty" classname="c"><error/></testcase>
        </testsuite>
    "#});
    let cases = report.suites[0].all();

    let skipped = cases[0].skipped.as_ref().expect("skipped marker present");
    assert_eq!(skipped.text, "skipped");
    assert_eq!(cases[0].outcome(), CaseResult::Skipped);

    let failed = cases[1].failure.as_ref().expect("failure marker present");
    assert_eq!(failed.text, "failed");
    assert_eq!(cases[1].outcome(), CaseResult::Failed);

    let errored = cases[2].failure.as_ref().expect("error maps to failure marker");
    assert_eq!(errored.text, "error");
    assert_eq!(cases[2].outcome(), CaseResult::Failed);
}

#[test]
fn error_elements_unify_with_failures() {
    let report = parse_ok(indoc! {r#"
        <testsuite name="s">
            <testcase name="t" classname="c">
                <error message="unexpected exception">trace here</error>
            </testcase>
        </testsuite>
    "#});
    let case = report.suites[0].all()[0].clone();
    let marker = case.failure.expect("marker present");
    assert_eq!(marker.message.as_deref(), Some("unexpected exception"));
    assert_eq!(marker.text, "trace here");
}

#[test]
fn suite_level_errors_and_output_are_recorded() {
    let report = parse_ok(indoc! {r#"
        <testsuite name="s">
            <error message="fixture exploded" type="SetupError">boom</error>
            <testcase name="t" classname="c"/>
            <system-out>suite wide output</system-out>
            <system-err>suite wide errors</system-err>
        </testsuite>
    "#});
    let suite = &report.suites[0];
    assert_eq!(suite.errors.len(), 1);
    assert_eq!(suite.errors[0].message.as_deref(), Some("fixture exploded"));
    assert_eq!(suite.errors[0].ty.as_deref(), Some("SetupError"));
    assert_eq!(suite.errors[0].text, "boom");
    assert_eq!(suite.system_out.as_deref(), Some("suite wide output"));
    assert_eq!(suite.system_err.as_deref(), Some("suite wide errors"));
    // The suite error does not fail the testcase.
    assert_eq!(suite.all()[0].outcome(), CaseResult::Passed);
}

#[test]
fn properties_attach_at_both_levels() {
    let report = parse_ok(indoc! {r#"
        <testsuite name="s">
            <properties>
                <property name="host" value="build-04"/>
                <property name="arch" value="x86_64"/>
            </properties>
            <testcase name="t" classname="c">
                <properties>
                    <property name="seed" value="1234"/>
                </properties>
            </testcase>
        </testsuite>
    "#});
    let suite = &report.suites[0];
    let names: Vec<&str> = suite.properties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["host", "arch"]);
    assert_eq!(suite.all()[0].properties.len(), 1);
    assert_eq!(suite.all()[0].properties[0].value, "1234");
}

#[test]
fn case_output_is_captured() {
    let report = parse_ok(indoc! {r#"
        <testsuite name="s">
            <testcase name="t" classname="c">
                <system-out>hello
world</system-out>
                <system-err><![CDATA[warning: <odd> & raw]]></system-err>
            </testcase>
        </testsuite>
    "#});
    let case = report.suites[0].all()[0].clone();
    assert_eq!(case.system_out.as_deref(), Some("hello\nworld"));
    assert_eq!(case.system_err.as_deref(), Some("warning: <odd> & raw"));
}

#[test]
fn unnamed_suites_are_synthesized_in_order() {
    let report = parse_ok(indoc! {r#"
        <testsuites>
            <testsuite><testcase name="a" classname="c"/></testsuite>
            <testsuite name=""><testcase name="b" classname="c"/></testsuite>
            <testsuite name="real"><testcase name="d" classname="c"/></testsuite>
        </testsuites>
    "#});
    let names: Vec<&str> = report.suites.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["suite-0", "suite-1", "real"]);
}

#[test]
fn reinserted_class_appends_rather_than_replacing() {
    let report = parse_ok(indoc! {r#"
        <testsuite name="s">
            <testcase name="one" classname="alpha"/>
            <testcase name="two" classname="beta"/>
            <testcase name="three" classname="alpha"/>
        </testsuite>
    "#});
    let suite = &report.suites[0];
    let alpha: Vec<&str> = suite
        .class("alpha")
        .expect("alpha class exists")
        .cases
        .iter()
        .map(|case| case.name.as_str())
        .collect();
    assert_eq!(alpha, ["one", "three"]);
    // Flattened order is class order then case order.
    let all: Vec<&str> = suite.all().iter().map(|case| case.name.as_str()).collect();
    assert_eq!(all, ["one", "three", "two"]);
}

#[test]
fn unicode_content_survives() {
    let report = parse_ok(indoc! {r#"
        <testsuite name="s">
            <testcase name="Euro € Test Case" classname="A Class with a cent ¢"/>
        </testsuite>
    "#});
    let case = report.suites[0].all()[0].clone();
    assert_eq!(case.name, "Euro € Test Case");
    assert_eq!(case.classname, "A Class with a cent ¢");
}

#[test]
fn outcome_priority_is_skip_then_fail() {
    let report = parse_ok(indoc! {r#"
        <testsuite name="s">
            <testcase name="t" classname="c">
                <failure message="x">boom</failure>
                <skipped message="y"/>
            </testcase>
        </testsuite>
    "#});
    assert_eq!(report.suites[0].all()[0].outcome(), CaseResult::Skipped);
}

#[test]
fn unrecognized_elements_are_ignored() {
    let report = parse_ok(indoc! {r#"
        <testsuite name="s" hostname="build-04">
            <custom-metadata some="thing"/>
            <testcase name="t" classname="c" file="src/lib.rs" line="10">
                <rerunFailure message="flaky">first try</rerunFailure>
            </testcase>
        </testsuite>
    "#});
    let case = report.suites[0].all()[0].clone();
    assert_eq!(case.name, "t");
    // The rerun element is unknown to this dialect; its presence neither
    // fails the case nor aborts the parse.
    assert_eq!(case.outcome(), CaseResult::Passed);
}
