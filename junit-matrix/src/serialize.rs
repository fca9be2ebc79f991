// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialize suites back to the JUnit wire format.

use crate::{
    errors::SerializeError,
    report::{Case, Property, Suite},
};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{self, Write};

static TESTSUITES_TAG: &str = "testsuites";
static TESTSUITE_TAG: &str = "testsuite";
static TESTCASE_TAG: &str = "testcase";
static PROPERTIES_TAG: &str = "properties";
static PROPERTY_TAG: &str = "property";
static FAILURE_TAG: &str = "failure";
static SKIPPED_TAG: &str = "skipped";
static SYSTEM_OUT_TAG: &str = "system-out";
static SYSTEM_ERR_TAG: &str = "system-err";

/// Writes a `<testsuites>` document containing the given suites.
pub(crate) fn serialize_document<'a>(
    total_duration: f64,
    suites: impl IntoIterator<Item = &'a Suite>,
    writer: impl io::Write,
) -> Result<(), SerializeError> {
    let mut writer = Writer::new_with_indent(writer, b' ', 4);

    let decl = BytesDecl::new("1.0", Some("utf-8"), None);
    writer.write_event(Event::Decl(decl))?;

    let mut testsuites_tag = BytesStart::new(TESTSUITES_TAG);
    testsuites_tag.push_attribute(("duration", serialize_time(total_duration).as_str()));
    writer.write_event(Event::Start(testsuites_tag))?;

    for suite in suites {
        serialize_suite(suite, &mut writer)?;
    }

    serialize_end_tag(TESTSUITES_TAG, &mut writer)?;

    // Trailing newline.
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

fn serialize_suite(
    suite: &Suite,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    let mut testsuite_tag = BytesStart::new(TESTSUITE_TAG);
    testsuite_tag.push_attribute(("name", suite.name.as_str()));
    testsuite_tag.push_attribute(("time", serialize_time(suite.duration).as_str()));
    if let Some(package) = &suite.package {
        testsuite_tag.push_attribute(("package", package.as_str()));
    }
    writer.write_event(Event::Start(testsuite_tag))?;

    serialize_properties(&suite.properties, writer)?;

    for case in suite.all() {
        serialize_case(case, writer)?;
    }

    serialize_end_tag(TESTSUITE_TAG, writer)
}

// Child order is fixed: system-err, system-out, failure, skipped, properties.
fn serialize_case(case: &Case, writer: &mut Writer<impl io::Write>) -> Result<(), SerializeError> {
    let mut testcase_tag = BytesStart::new(TESTCASE_TAG);
    testcase_tag.extend_attributes([
        ("name", case.name.as_str()),
        ("classname", case.classname.as_str()),
    ]);
    testcase_tag.push_attribute(("time", serialize_time(case.duration).as_str()));
    writer.write_event(Event::Start(testcase_tag))?;

    if let Some(system_err) = &case.system_err {
        serialize_text_element(SYSTEM_ERR_TAG, system_err, writer)?;
    }
    if let Some(system_out) = &case.system_out {
        serialize_text_element(SYSTEM_OUT_TAG, system_out, writer)?;
    }
    if let Some(failure) = &case.failure {
        serialize_marker(FAILURE_TAG, failure.message.as_deref(), &failure.text, writer)?;
    }
    if let Some(skipped) = &case.skipped {
        serialize_marker(SKIPPED_TAG, skipped.message.as_deref(), &skipped.text, writer)?;
    }
    serialize_properties(&case.properties, writer)?;

    serialize_end_tag(TESTCASE_TAG, writer)
}

fn serialize_properties(
    properties: &[Property],
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    if properties.is_empty() {
        return Ok(());
    }
    writer.write_event(Event::Start(BytesStart::new(PROPERTIES_TAG)))?;
    for property in properties {
        let mut property_tag = BytesStart::new(PROPERTY_TAG);
        property_tag.extend_attributes([
            ("name", property.name.as_str()),
            ("value", property.value.as_str()),
        ]);
        writer.write_event(Event::Empty(property_tag))?;
    }
    serialize_end_tag(PROPERTIES_TAG, writer)
}

fn serialize_marker(
    tag_name: &'static str,
    message: Option<&str>,
    text: &str,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    let mut tag = BytesStart::new(tag_name);
    if let Some(message) = message {
        tag.push_attribute(("message", message));
    }
    if text.is_empty() {
        writer.write_event(Event::Empty(tag))?;
    } else {
        writer.write_event(Event::Start(tag))?;
        writer.write_event(Event::Text(BytesText::new(text)))?;
        serialize_end_tag(tag_name, writer)?;
    }
    Ok(())
}

fn serialize_text_element(
    tag_name: &'static str,
    text: &str,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    writer.write_event(Event::Start(BytesStart::new(tag_name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    serialize_end_tag(tag_name, writer)
}

fn serialize_end_tag(
    tag_name: &'static str,
    writer: &mut Writer<impl io::Write>,
) -> Result<(), SerializeError> {
    writer.write_event(Event::End(BytesEnd::new(tag_name)))?;
    Ok(())
}

// Seconds with 3 decimal points, as the input dialect writes them.
fn serialize_time(time: f64) -> String {
    format!("{time:.3}")
}
