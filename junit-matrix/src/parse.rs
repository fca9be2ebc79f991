// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tolerant ingestion of JUnit/XUnit XML into a [`Report`].
//!
//! Real-world producers of this format disagree on the details, so parsing is
//! deliberately forgiving: locale-formatted or missing numbers become zero,
//! missing class names become a sentinel, undecodable bytes become `?`, and
//! empty outcome markers get a fixed body so presence checks stay truthful.
//! The only hard failures are unreadable input, ill-formed XML, and a
//! document rooted at none of `testsuite`, `testsuites`, or `testrun`.

use crate::{
    errors::ParseError,
    report::{Case, Marker, Property, Report, Suite, SuiteError},
};
use camino::{Utf8Path, Utf8PathBuf};
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use std::io::{self, Read};

const TESTSUITE_TAG: &[u8] = b"testsuite";
const TESTSUITES_TAG: &[u8] = b"testsuites";
const TESTRUN_TAG: &[u8] = b"testrun";
const TESTCASE_TAG: &[u8] = b"testcase";
const SKIPPED_TAG: &[u8] = b"skipped";
const FAILURE_TAG: &[u8] = b"failure";
const ERROR_TAG: &[u8] = b"error";
const SYSTEM_OUT_TAG: &[u8] = b"system-out";
const SYSTEM_ERR_TAG: &[u8] = b"system-err";
const PROPERTY_TAG: &[u8] = b"property";

/// One source of report XML.
#[derive(Clone, Debug)]
pub enum ReportInput {
    /// A file on disk.
    Path(Utf8PathBuf),
    /// Standard input.
    Stdin,
    /// A literal XML string.
    Text(String),
}

impl ReportInput {
    /// Maps a command-line argument to an input: `-` reads standard input,
    /// anything else is a path.
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            ReportInput::Stdin
        } else {
            ReportInput::Path(Utf8PathBuf::from(arg))
        }
    }

    /// A short name for error messages.
    pub fn describe(&self) -> String {
        match self {
            ReportInput::Path(path) => path.to_string(),
            ReportInput::Stdin => "<stdin>".to_owned(),
            ReportInput::Text(_) => "<string>".to_owned(),
        }
    }
}

/// Parses one input into a [`Report`].
pub fn parse(input: &ReportInput) -> Result<Report, ParseError> {
    match input {
        ReportInput::Path(path) => parse_file(path),
        ReportInput::Stdin => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .map_err(ParseError::Stdin)?;
            parse_document(&decode(&bytes))
        }
        ReportInput::Text(text) => parse_string(text),
    }
}

/// Parses a report from a file on disk.
pub fn parse_file(path: &Utf8Path) -> Result<Report, ParseError> {
    let bytes = fs_err::read(path).map_err(|error| ParseError::Read {
        path: path.to_owned(),
        error,
    })?;
    let mut report = parse_document(&decode(&bytes))?;
    report.source = Some(path.to_owned());
    Ok(report)
}

/// Parses a report from a literal XML string.
pub fn parse_string(text: &str) -> Result<Report, ParseError> {
    parse_document(text)
}

/// Whole-document decode. Undecodable bytes become U+FFFD here and `?` once
/// the value-level pass in [`clean_text`] sees them.
fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn parse_document(text: &str) -> Result<Report, ParseError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut builder = DocBuilder::default();
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => builder.handle(event),
        }
    }
    builder.finish()
}

/// Which open element is currently collecting character data.
#[derive(Debug)]
enum TextTarget {
    CaseSkipped,
    CaseFailure {
        /// Body substituted when the element is textually empty: `failed`
        /// for `<failure>`, `error` for `<error>`.
        default: &'static str,
    },
    SuiteError,
    SystemOut,
    SystemErr,
}

#[derive(Debug, Default)]
struct DocBuilder {
    suites: Vec<Suite>,
    /// Open `<testsuite>` elements, innermost last.
    stack: Vec<Suite>,
    case: Option<Case>,
    text: Option<TextTarget>,
    root: Option<String>,
}

impl DocBuilder {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(e) => {
                self.note_root(&e);
                match e.name().as_ref() {
                    TESTSUITE_TAG => self.open_suite(&e),
                    TESTCASE_TAG => self.open_case(&e),
                    SKIPPED_TAG => self.open_skipped(&e),
                    FAILURE_TAG => self.open_failure(&e, "failed"),
                    ERROR_TAG => self.open_error(&e),
                    SYSTEM_OUT_TAG => self.text = Some(TextTarget::SystemOut),
                    SYSTEM_ERR_TAG => self.text = Some(TextTarget::SystemErr),
                    PROPERTY_TAG => self.add_property(&e),
                    // testrun, testsuites, properties and anything
                    // unrecognized are transparent wrappers here.
                    _ => {}
                }
            }
            Event::Empty(e) => {
                self.note_root(&e);
                match e.name().as_ref() {
                    TESTSUITE_TAG => {
                        self.open_suite(&e);
                        self.close_suite();
                    }
                    TESTCASE_TAG => {
                        self.open_case(&e);
                        self.close_case();
                    }
                    SKIPPED_TAG => {
                        self.open_skipped(&e);
                        self.close_text();
                    }
                    FAILURE_TAG => {
                        self.open_failure(&e, "failed");
                        self.close_text();
                    }
                    ERROR_TAG => {
                        self.open_error(&e);
                        self.close_text();
                    }
                    PROPERTY_TAG => self.add_property(&e),
                    _ => {}
                }
            }
            Event::End(e) => match e.name().as_ref() {
                TESTSUITE_TAG => self.close_suite(),
                TESTCASE_TAG => self.close_case(),
                SKIPPED_TAG | FAILURE_TAG | ERROR_TAG | SYSTEM_OUT_TAG | SYSTEM_ERR_TAG => {
                    self.close_text();
                }
                _ => {}
            },
            Event::Text(e) => {
                let text = match e.unescape() {
                    Ok(text) => text.into_owned(),
                    Err(_) => String::from_utf8_lossy(&e).into_owned(),
                };
                self.append_text(&clean_text(&text));
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                self.append_text(&clean_text(&text));
            }
            // Decl, comments, processing instructions, doctypes.
            _ => {}
        }
    }

    fn note_root(&mut self, e: &BytesStart<'_>) {
        if self.root.is_none() {
            self.root = Some(String::from_utf8_lossy(e.name().as_ref()).into_owned());
        }
    }

    fn open_suite(&mut self, e: &BytesStart<'_>) {
        let ordinal = self.suites.len() + self.stack.len();
        let name = attr_text(e, "name")
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("suite-{ordinal}"));
        let mut suite = Suite::new(name);
        suite.package = attr_text(e, "package");
        suite.duration = attr_seconds(e, "time");
        self.stack.push(suite);
    }

    fn close_suite(&mut self) {
        if let Some(suite) = self.stack.pop() {
            self.suites.push(suite);
        }
    }

    fn open_case(&mut self, e: &BytesStart<'_>) {
        let name = attr_text(e, "name").unwrap_or_default();
        let classname = attr_text(e, "classname").unwrap_or_default();
        let mut case = Case::new(name, classname);
        case.duration = attr_seconds(e, "time");
        self.case = Some(case);
    }

    fn close_case(&mut self) {
        if let Some(case) = self.case.take() {
            match self.stack.last_mut() {
                Some(suite) => {
                    suite.add_case(case);
                }
                None => {
                    tracing::debug!(name = %case.name, "testcase outside any testsuite, dropped");
                }
            }
        }
    }

    fn open_skipped(&mut self, e: &BytesStart<'_>) {
        let Some(case) = self.case.as_mut() else {
            return;
        };
        let mut marker = Marker::new("");
        if let Some(message) = attr_text(e, "message") {
            marker.set_message(message);
        }
        case.skipped = Some(marker);
        self.text = Some(TextTarget::CaseSkipped);
    }

    fn open_failure(&mut self, e: &BytesStart<'_>, default: &'static str) {
        let Some(case) = self.case.as_mut() else {
            return;
        };
        let mut marker = Marker::new("");
        if let Some(message) = attr_text(e, "message") {
            marker.set_message(message);
        }
        case.failure = Some(marker);
        self.text = Some(TextTarget::CaseFailure { default });
    }

    /// `error` inside a testcase is a failure for ranking purposes; at suite
    /// level it is recorded as a suite error.
    fn open_error(&mut self, e: &BytesStart<'_>) {
        if self.case.is_some() {
            self.open_failure(e, "error");
        } else if let Some(suite) = self.stack.last_mut() {
            suite.errors.push(SuiteError {
                message: attr_text(e, "message"),
                ty: attr_text(e, "type"),
                text: String::new(),
            });
            self.text = Some(TextTarget::SuiteError);
        }
    }

    fn add_property(&mut self, e: &BytesStart<'_>) {
        let name = attr_text(e, "name").unwrap_or_default();
        let value = attr_text(e, "value").unwrap_or_default();
        let property = Property::new(name, value);
        if let Some(case) = self.case.as_mut() {
            case.properties.push(property);
        } else if let Some(suite) = self.stack.last_mut() {
            suite.add_property(property);
        }
    }

    fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(sink) = self.sink() {
            sink.push_str(text);
        }
    }

    /// The buffer the current text-bearing element writes into.
    fn sink(&mut self) -> Option<&mut String> {
        match self.text.as_ref()? {
            TextTarget::CaseSkipped => self
                .case
                .as_mut()?
                .skipped
                .as_mut()
                .map(|marker| &mut marker.text),
            TextTarget::CaseFailure { .. } => self
                .case
                .as_mut()?
                .failure
                .as_mut()
                .map(|marker| &mut marker.text),
            TextTarget::SuiteError => self
                .stack
                .last_mut()?
                .errors
                .last_mut()
                .map(|error| &mut error.text),
            TextTarget::SystemOut => match self.case.as_mut() {
                Some(case) => Some(case.system_out.get_or_insert_with(String::new)),
                None => self
                    .stack
                    .last_mut()
                    .map(|suite| suite.system_out.get_or_insert_with(String::new)),
            },
            TextTarget::SystemErr => match self.case.as_mut() {
                Some(case) => Some(case.system_err.get_or_insert_with(String::new)),
                None => self
                    .stack
                    .last_mut()
                    .map(|suite| suite.system_err.get_or_insert_with(String::new)),
            },
        }
    }

    /// Closes the open text-bearing element, substituting fixed marker
    /// bodies for empty ones.
    fn close_text(&mut self) {
        match self.text.take() {
            Some(TextTarget::CaseSkipped) => {
                if let Some(marker) = self.case.as_mut().and_then(|case| case.skipped.as_mut()) {
                    if marker.text.is_empty() {
                        marker.text = "skipped".to_owned();
                    }
                }
            }
            Some(TextTarget::CaseFailure { default }) => {
                if let Some(marker) = self.case.as_mut().and_then(|case| case.failure.as_mut()) {
                    if marker.text.is_empty() {
                        marker.text = default.to_owned();
                    }
                }
            }
            Some(TextTarget::SuiteError) => {
                if let Some(error) = self
                    .stack
                    .last_mut()
                    .and_then(|suite| suite.errors.last_mut())
                {
                    if error.text.is_empty() {
                        error.text = "error".to_owned();
                    }
                }
            }
            Some(TextTarget::SystemOut) | Some(TextTarget::SystemErr) | None => {}
        }
    }

    fn finish(mut self) -> Result<Report, ParseError> {
        // Unbalanced documents fail in the reader before getting here, but
        // close anything still open rather than losing it.
        while let Some(suite) = self.stack.pop() {
            self.suites.push(suite);
        }
        match self.root.as_deref() {
            Some(root)
                if [TESTSUITE_TAG, TESTSUITES_TAG, TESTRUN_TAG].contains(&root.as_bytes()) =>
            {
                Ok(Report {
                    source: None,
                    suites: self.suites,
                })
            }
            root => Err(ParseError::UnrecognizedRoot {
                root: root.map(str::to_owned),
            }),
        }
    }
}

/// Reads an attribute as tolerant text: entity escapes resolved where
/// possible, undecodable content replaced rather than rejected, and U+FFFD
/// mapped to `?` so no placeholder glyph reaches rendered output.
fn attr_text(e: &BytesStart<'_>, name: &str) -> Option<String> {
    let attr = e.try_get_attribute(name).ok().flatten()?;
    let value = match attr.unescape_value() {
        Ok(value) => value.into_owned(),
        Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
    };
    Some(clean_text(&value))
}

fn attr_seconds(e: &BytesStart<'_>, name: &str) -> f64 {
    parse_seconds(attr_text(e, name).as_deref().unwrap_or(""))
}

fn clean_text(value: &str) -> String {
    value.replace('\u{FFFD}', "?")
}

/// Parses a duration attribute, stripping grouping commas first. Missing,
/// empty and malformed values are all zero; a bad number is not worth
/// discarding an otherwise-usable report over.
fn parse_seconds(value: &str) -> f64 {
    let ungrouped: String = value.chars().filter(|&c| c != ',').collect();
    let trimmed = ungrouped.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse().unwrap_or_else(|_| {
        tracing::debug!(value, "unparseable duration treated as zero");
        0.0
    })
}
