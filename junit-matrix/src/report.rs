// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The in-memory model for one parsed test-result document.

use crate::outcome::CaseResult;
use camino::Utf8PathBuf;
use indexmap::IndexMap;

/// Class name recorded for cases whose `classname` attribute is missing or
/// empty, so such cases are never silently dropped.
pub const NO_TESTCLASS: &str = "no-testclass";

/// A name/value pair attached to a suite or a case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    /// The name of the property.
    pub name: String,

    /// The value of the property.
    pub value: String,
}

impl Property {
    /// Creates a new `Property`.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<T> From<(T, T)> for Property
where
    T: Into<String>,
{
    fn from((name, value): (T, T)) -> Self {
        Property::new(name, value)
    }
}

/// An outcome marker (`skipped` or `failure`/`error`) attached to a case.
///
/// Presence of the marker decides the outcome; `text` is the element body and
/// is always non-empty after ingestion (empty bodies are replaced with a
/// fixed literal).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    /// The `message` attribute, if any.
    pub message: Option<String>,

    /// The element body.
    pub text: String,
}

impl Marker {
    /// Creates a new marker with the given body text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            message: None,
            text: text.into(),
        }
    }

    /// Sets the `message` attribute.
    pub fn set_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.message = Some(message.into());
        self
    }
}

/// One test execution.
#[derive(Clone, Debug)]
pub struct Case {
    /// The name of the test case.
    pub name: String,

    /// The owning class name. Never empty; see [`NO_TESTCLASS`].
    pub classname: String,

    /// Wall-clock duration in seconds. Missing or malformed input values
    /// normalize to zero.
    pub duration: f64,

    /// Set when the case was skipped.
    pub skipped: Option<Marker>,

    /// Set when the case failed or errored.
    pub failure: Option<Marker>,

    /// Captured standard output, if any.
    pub system_out: Option<String>,

    /// Captured standard error, if any.
    pub system_err: Option<String>,

    /// Case-scoped properties, in document order.
    pub properties: Vec<Property>,
}

impl Case {
    /// Creates a new case. An empty `classname` is normalized to
    /// [`NO_TESTCLASS`].
    pub fn new(name: impl Into<String>, classname: impl Into<String>) -> Self {
        let classname = classname.into();
        let classname = if classname.is_empty() {
            NO_TESTCLASS.to_owned()
        } else {
            classname
        };
        Self {
            name: name.into(),
            classname,
            duration: 0.0,
            skipped: None,
            failure: None,
            system_out: None,
            system_err: None,
            properties: vec![],
        }
    }

    /// Sets the duration in seconds.
    pub fn set_duration(&mut self, duration: f64) -> &mut Self {
        self.duration = duration;
        self
    }

    /// Marks this case skipped.
    pub fn set_skipped(&mut self, marker: Marker) -> &mut Self {
        self.skipped = Some(marker);
        self
    }

    /// Marks this case failed. Failures and errors share this one marker.
    pub fn set_failure(&mut self, marker: Marker) -> &mut Self {
        self.failure = Some(marker);
        self
    }

    /// The derived outcome of this case.
    ///
    /// A pure function of marker presence: skipped wins over failed, failed
    /// wins over passed. Message text and duration never matter.
    pub fn outcome(&self) -> CaseResult {
        if self.skipped.is_some() {
            CaseResult::Skipped
        } else if self.failure.is_some() {
            CaseResult::Failed
        } else {
            CaseResult::Passed
        }
    }

    /// The case name with the owning class name stripped as a prefix.
    ///
    /// Display-only compaction: the result can legitimately be empty (when
    /// the name equals the class name) and can collide between cases, so it
    /// must never be used as a lookup key.
    pub fn basename(&self) -> &str {
        self.name
            .strip_prefix(self.classname.as_str())
            .unwrap_or(&self.name)
    }

    /// `"<classname> : <casename>"`.
    pub fn fullname(&self) -> String {
        format!("{} : {}", self.classname, self.name)
    }
}

/// A named grouping of cases, usually a test class or a suite file.
#[derive(Clone, Debug)]
pub struct Class {
    /// The class name.
    pub name: String,

    /// Owned cases, in document order.
    pub cases: Vec<Case>,
}

impl Class {
    /// Creates a new, empty class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: vec![],
        }
    }
}

/// A suite-level `error` record.
#[derive(Clone, Debug)]
pub struct SuiteError {
    /// The `message` attribute, if any.
    pub message: Option<String>,

    /// The `type` attribute, if any.
    pub ty: Option<String>,

    /// The element body.
    pub text: String,
}

/// One `<testsuite>` occurrence.
#[derive(Clone, Debug)]
pub struct Suite {
    /// The suite name. Synthesized (`suite-<n>`) when the document omits it.
    pub name: String,

    /// The `package` attribute, if any.
    pub package: Option<String>,

    /// The suite's own reported duration in seconds.
    pub duration: f64,

    /// Suite-scoped properties, in document order.
    pub properties: Vec<Property>,

    /// Suite-level error records.
    pub errors: Vec<SuiteError>,

    /// Suite-level captured standard output, if any.
    pub system_out: Option<String>,

    /// Suite-level captured standard error, if any.
    pub system_err: Option<String>,

    classes: IndexMap<String, Class>,
}

impl Suite {
    /// Creates a new, empty suite.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: None,
            duration: 0.0,
            properties: vec![],
            errors: vec![],
            system_out: None,
            system_err: None,
            classes: IndexMap::new(),
        }
    }

    /// Adds a case under its own class name.
    ///
    /// Class names are unique within a suite: a case whose class was already
    /// seen appends to the existing class rather than replacing it.
    pub fn add_case(&mut self, case: Case) -> &mut Self {
        self.classes
            .entry(case.classname.clone())
            .or_insert_with(|| Class::new(&case.classname))
            .cases
            .push(case);
        self
    }

    /// Adds a suite-scoped property.
    pub fn add_property(&mut self, property: impl Into<Property>) -> &mut Self {
        self.properties.push(property.into());
        self
    }

    /// Returns the class with the given name.
    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }

    /// Iterates over classes in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.values()
    }

    /// All cases, class order then case order.
    pub fn all(&self) -> Vec<&Case> {
        self.classes
            .values()
            .flat_map(|class| class.cases.iter())
            .collect()
    }

    /// All failed cases, in [`Self::all`] order.
    pub fn failed(&self) -> Vec<&Case> {
        self.filtered(CaseResult::Failed)
    }

    /// All skipped cases, in [`Self::all`] order.
    pub fn skipped(&self) -> Vec<&Case> {
        self.filtered(CaseResult::Skipped)
    }

    /// All passing cases, in [`Self::all`] order.
    pub fn passed(&self) -> Vec<&Case> {
        self.filtered(CaseResult::Passed)
    }

    fn filtered(&self, outcome: CaseResult) -> Vec<&Case> {
        self.all()
            .into_iter()
            .filter(|case| case.outcome() == outcome)
            .collect()
    }
}

/// One parsed test-result document.
#[derive(Clone, Debug)]
pub struct Report {
    /// The source path, when the document came from a file.
    pub source: Option<Utf8PathBuf>,

    /// The suites in this document, in document order.
    pub suites: Vec<Suite>,
}

impl Report {
    /// Creates an empty report with no source.
    pub fn new() -> Self {
        Self {
            source: None,
            suites: vec![],
        }
    }

    /// The label used for this report's matrix axis: the source file name,
    /// or a placeholder for string and stdin input.
    pub fn label(&self) -> String {
        self.source
            .as_deref()
            .and_then(|path| path.file_name())
            .unwrap_or("<unnamed>")
            .to_owned()
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(name: &str, classname: &str) -> Case {
        Case::new(name, classname)
    }

    #[test]
    fn outcome_depends_only_on_marker_presence() {
        let mut passed = case("t", "c");
        passed.set_duration(12.0);
        assert_eq!(passed.outcome(), CaseResult::Passed);

        let mut failed = case("t", "c");
        failed.set_failure(Marker::new("boom"));
        assert_eq!(failed.outcome(), CaseResult::Failed);

        // A skipped marker outranks a failure marker.
        let mut both = case("t", "c");
        both.set_failure(Marker::new("boom"));
        both.set_skipped(Marker::new("later"));
        assert_eq!(both.outcome(), CaseResult::Skipped);
    }

    #[test]
    fn empty_classname_uses_sentinel() {
        assert_eq!(case("t", "").classname, NO_TESTCLASS);
    }

    #[test]
    fn basename_strips_class_prefix() {
        assert_eq!(case("com.acme.Thing.test_a", "com.acme.Thing").basename(), ".test_a");
        assert_eq!(case("test_a", "com.acme.Thing").basename(), "test_a");
        // Equal name and class produce an empty basename; accepted.
        assert_eq!(case("com.acme.Thing", "com.acme.Thing").basename(), "");
    }

    #[test]
    fn fullname_joins_class_and_name() {
        assert_eq!(case("test_a", "Thing").fullname(), "Thing : test_a");
    }

    #[test]
    fn reinserted_class_appends_cases() {
        let mut suite = Suite::new("s");
        suite.add_case(case("a", "one"));
        suite.add_case(case("b", "two"));
        suite.add_case(case("c", "one"));

        let one = suite.class("one").expect("class one exists");
        let names: Vec<_> = one.cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);

        // Flattened traversal is class order then case order.
        let all: Vec<_> = suite.all().into_iter().map(|c| c.name.as_str()).collect();
        assert_eq!(all, ["a", "c", "b"]);
    }

    #[test]
    fn suite_filters_partition_all() {
        let mut suite = Suite::new("s");
        suite.add_case(case("ok", "c"));
        let mut failing = case("bad", "c");
        failing.set_failure(Marker::new("boom"));
        suite.add_case(failing);
        let mut ignored = case("skip", "c");
        ignored.set_skipped(Marker::new("nope"));
        suite.add_case(ignored);

        assert_eq!(suite.all().len(), 3);
        assert_eq!(suite.failed().len(), 1);
        assert_eq!(suite.skipped().len(), 1);
        assert_eq!(suite.passed().len(), 1);
        assert_eq!(suite.failed()[0].name, "bad");
    }
}
