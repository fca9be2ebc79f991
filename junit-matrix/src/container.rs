// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The shared interface of everything that accumulates reports.

use crate::{
    errors::ParseError,
    parse::ReportInput,
    report::{Case, Suite},
};

/// A container that folds report sources into accumulated state.
///
/// Implemented by [`Matrix`](crate::Matrix) and [`Merger`](crate::Merger);
/// the bulk collectors are written once here against the two required
/// operations.
pub trait ReportContainer {
    /// Ingests one source into the accumulated state.
    fn add_source(&mut self, input: &ReportInput) -> Result<(), ParseError>;

    /// All suites accumulated so far, in ingestion order.
    fn suites(&self) -> Vec<&Suite>;

    /// Every failed case across all accumulated suites.
    fn failures(&self) -> Vec<&Case> {
        self.suites().into_iter().flat_map(Suite::failed).collect()
    }

    /// Every skipped case across all accumulated suites.
    fn skips(&self) -> Vec<&Case> {
        self.suites().into_iter().flat_map(Suite::skipped).collect()
    }
}
