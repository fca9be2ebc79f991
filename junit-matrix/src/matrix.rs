// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cross-report indexing and the combined-outcome algorithm.

use crate::{
    container::ReportContainer,
    errors::ParseError,
    outcome::CaseResult,
    parse::{self, ReportInput},
    report::{Case, Report, Suite},
};
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Accumulates several parsed reports and exposes, for every `(class, case)`
/// pair seen anywhere, its outcome on each axis plus one combined verdict.
///
/// Axes are labeled by source file basename. The indices are append-only:
/// `add` only ever inserts, and nothing is mutated after indexing.
#[derive(Clone, Debug, Default)]
pub struct Matrix {
    reports: IndexMap<String, Report>,
    /// class name → case name → axis label → the indexed case.
    cases: IndexMap<String, IndexMap<String, IndexMap<String, Case>>>,
    /// class name → case name → outcome history, in ingestion order.
    case_results: IndexMap<String, IndexMap<String, Vec<CaseResult>>>,
    result_stats: BTreeMap<CaseResult, usize>,
}

impl Matrix {
    /// Creates an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests one already-parsed report.
    ///
    /// Every case is recorded under this report's axis, its outcome appended
    /// to the per-case history, and the global tally bumped. A duplicate case
    /// name within one class leaves only its last occurrence in the axis
    /// slot (a producer re-running a test in one file reports the final
    /// execution), though each occurrence still counts toward history and
    /// tally.
    pub fn add(&mut self, report: Report) {
        let axis = report.label();
        for suite in &report.suites {
            for class in suite.classes() {
                for case in &class.cases {
                    let casename = case.name.trim().to_owned();
                    self.cases
                        .entry(class.name.clone())
                        .or_default()
                        .entry(casename.clone())
                        .or_default()
                        .insert(axis.clone(), case.clone());

                    let outcome = case.outcome();
                    self.case_results
                        .entry(class.name.clone())
                        .or_default()
                        .entry(casename)
                        .or_default()
                        .push(outcome);
                    *self.result_stats.entry(outcome).or_insert(0) += 1;
                }
            }
        }
        self.reports.insert(axis, report);
    }

    /// The ingested reports, keyed by axis label in ingestion order.
    pub fn reports(&self) -> &IndexMap<String, Report> {
        &self.reports
    }

    /// Axis labels, sorted.
    pub fn report_order(&self) -> Vec<&str> {
        self.reports.keys().map(String::as_str).sorted().collect()
    }

    /// Class names seen in any report, sorted.
    pub fn class_names(&self) -> Vec<&str> {
        self.cases.keys().map(String::as_str).sorted().collect()
    }

    /// Case names seen under a class in any report, sorted.
    pub fn case_names(&self, classname: &str) -> Vec<&str> {
        self.cases
            .get(classname)
            .map(|cases| cases.keys().map(String::as_str).sorted().collect())
            .unwrap_or_default()
    }

    /// The case indexed for `(classname, casename)` on the given axis, if
    /// that report contained it.
    pub fn case(&self, classname: &str, casename: &str, axis: &str) -> Option<&Case> {
        self.cases
            .get(classname)?
            .get(casename)?
            .get(axis)
    }

    /// The per-axis outcome for one cell; [`CaseResult::Absent`] when the
    /// report did not contain the case.
    pub fn outcome(&self, classname: &str, casename: &str, axis: &str) -> CaseResult {
        self.case(classname, casename, axis)
            .map_or(CaseResult::Absent, Case::outcome)
    }

    /// The combined verdict over every run of `(classname, casename)`.
    ///
    /// # Panics
    ///
    /// Panics when the pair was never indexed; asking for it is a caller
    /// bug, not a data problem. Absent axes never panic — they are simply
    /// not part of the history.
    pub fn combined(&self, classname: &str, casename: &str) -> CaseResult {
        let results = self
            .case_results
            .get(classname)
            .and_then(|cases| cases.get(casename))
            .unwrap_or_else(|| panic!("case `{classname} : {casename}` was never indexed"));
        combined_result(results)
    }

    /// The global outcome tally across every ingested case, in label order.
    pub fn result_stats(&self) -> &BTreeMap<CaseResult, usize> {
        &self.result_stats
    }
}

impl ReportContainer for Matrix {
    fn add_source(&mut self, input: &ReportInput) -> Result<(), ParseError> {
        let report = parse::parse(input)?;
        self.add(report);
        Ok(())
    }

    fn suites(&self) -> Vec<&Suite> {
        self.reports
            .values()
            .flat_map(|report| report.suites.iter())
            .collect()
    }
}

/// Folds an unordered list of per-run outcomes into one combined verdict.
///
/// First matching rule wins:
///
/// 1. passed and failed both present → partial failure
/// 2. passed present → passed
/// 3. failed present → failed
/// 4. skipped present → untested
/// 5. a folded-back partial pass present → partial pass
/// 6. a folded-back total failure present → total failure
/// 7. otherwise → unknown (blank marker)
///
/// Only membership matters, so the verdict is independent of list order and
/// duplicate counts.
pub fn combined_result(results: &[CaseResult]) -> CaseResult {
    let has = |outcome| results.contains(&outcome);
    if has(CaseResult::Passed) {
        if has(CaseResult::Failed) {
            CaseResult::PartialFail
        } else {
            CaseResult::Passed
        }
    } else if has(CaseResult::Failed) {
        CaseResult::Failed
    } else if has(CaseResult::Skipped) {
        CaseResult::Untested
    } else if has(CaseResult::PartialPass) {
        CaseResult::PartialPass
    } else if has(CaseResult::TotalFail) {
        CaseResult::TotalFail
    } else {
        CaseResult::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::CaseResult::*;
    use test_case::test_case;

    #[test_case(&[Passed, Failed], PartialFail; "pass plus fail")]
    #[test_case(&[Failed, Passed], PartialFail; "order does not matter")]
    #[test_case(&[Passed, Failed, Skipped], PartialFail; "skips ignored next to pass and fail")]
    #[test_case(&[Passed, Skipped], Passed; "pass plus skip")]
    #[test_case(&[Passed], Passed; "single pass")]
    #[test_case(&[Failed, Failed], Failed; "all failed")]
    #[test_case(&[Skipped, Skipped], Untested; "all skipped")]
    #[test_case(&[PartialPass], PartialPass; "folded-back partial pass")]
    #[test_case(&[TotalFail], TotalFail; "folded-back total failure")]
    #[test_case(&[], Unknown; "empty history")]
    #[test_case(&[Absent], Unknown; "only unrecognized entries")]
    fn combined_precedence(results: &[CaseResult], expected: CaseResult) {
        assert_eq!(combined_result(results), expected);
    }

    #[test]
    #[should_panic(expected = "never indexed")]
    fn combining_unindexed_case_panics() {
        Matrix::new().combined("ghost", "case");
    }
}
