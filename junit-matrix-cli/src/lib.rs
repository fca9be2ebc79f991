// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Command-line interface for rendering, comparing, and merging JUnit/XUnit
//! XML reports.
//!
//! The interesting logic lives in the `junit-matrix` library; this crate is
//! argument parsing, logging setup, file placement, and exit-code policy.

mod dispatch;
mod errors;

pub use dispatch::App;
pub use errors::{ExpectedError, MatrixExitCode};
