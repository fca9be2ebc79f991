// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Tolerant JUnit/XUnit XML ingestion, cross-run outcome matrices, and
//! report merging.
//!
//! One document parses into a [`Report`]; several reports fold into a
//! [`Matrix`] that shows, for every test case, its outcome in each run plus
//! one combined verdict; a [`Merger`] unions suites from many files into a
//! single exportable document. Parsing is deliberately forgiving of the
//! dialect zoo real producers emit — see [`parse`] for the tolerance rules.

mod container;
mod errors;
mod matrix;
mod merge;
mod outcome;
pub mod parse;
pub mod render;
mod report;
mod serialize;

pub use container::ReportContainer;
pub use errors::{ParseError, SerializeError};
pub use matrix::{combined_result, Matrix};
pub use merge::Merger;
pub use outcome::{CaseResult, GlyphTable};
pub use report::{Case, Class, Marker, Property, Report, Suite, SuiteError, NO_TESTCLASS};
