// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expected CLI failures and their documented exit codes.

use camino::Utf8PathBuf;
use junit_matrix::{ParseError, SerializeError};
use std::{error::Error, io};
use thiserror::Error;

/// Documented exit codes for `junit-matrix` failures.
///
/// Unknown/unexpected failures always exit with code 1.
pub enum MatrixExitCode {}

impl MatrixExitCode {
    /// No errors occurred.
    pub const OK: i32 = 0;

    /// `--max-failures` was given and at least that many failing cases were
    /// observed.
    pub const MAX_FAILURES_EXCEEDED: i32 = 100;

    /// `--max-skipped` was given and at least that many skipped cases were
    /// observed.
    pub const MAX_SKIPPED_EXCEEDED: i32 = 101;
}

/// An anticipated failure: something went wrong in a way the tool
/// understands and can report cleanly.
#[derive(Debug, Error)]
pub enum ExpectedError {
    /// An input could not be parsed.
    #[error("failed to parse `{input}`")]
    Parse {
        /// A short name for the input.
        input: String,
        /// The underlying parse error.
        #[source]
        error: ParseError,
    },

    /// An output file could not be written.
    #[error("failed to write `{path}`")]
    Write {
        /// The path that failed to write.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// The merged document could not be serialized.
    #[error("failed to serialize merged report")]
    Serialize {
        /// The underlying serialize error.
        #[source]
        error: SerializeError,
    },

    /// More failing cases than `--max-failures` allows.
    #[error("{count} failing test cases, limit is {limit}")]
    MaxFailuresExceeded {
        /// Failing cases observed.
        count: usize,
        /// The `--max-failures` value.
        limit: usize,
    },

    /// More skipped cases than `--max-skipped` allows.
    #[error("{count} skipped test cases, limit is {limit}")]
    MaxSkippedExceeded {
        /// Skipped cases observed.
        count: usize,
        /// The `--max-skipped` value.
        limit: usize,
    },
}

impl ExpectedError {
    /// The exit code this failure maps to.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            ExpectedError::Parse { .. }
            | ExpectedError::Write { .. }
            | ExpectedError::Serialize { .. } => 1,
            ExpectedError::MaxFailuresExceeded { .. } => MatrixExitCode::MAX_FAILURES_EXCEEDED,
            ExpectedError::MaxSkippedExceeded { .. } => MatrixExitCode::MAX_SKIPPED_EXCEEDED,
        }
    }

    /// Prints this error and its source chain to standard error.
    pub fn display_to_stderr(&self) {
        let mut next: Option<&dyn Error> = Some(self);
        let mut first = true;
        while let Some(error) = next {
            if first {
                eprintln!("error: {error}");
            } else {
                eprintln!("  caused by: {error}");
            }
            first = false;
            next = error.source();
        }
    }
}
