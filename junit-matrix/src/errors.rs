// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while reading and writing reports.

use camino::Utf8PathBuf;
use std::io;
use thiserror::Error;

/// An error that occurred while parsing one input document.
///
/// Malformed individual attribute values are never errors; the ingestor
/// substitutes tolerant defaults for them. This error means the input could
/// not be read at all, was not well-formed XML, or carried none of the
/// recognized root shapes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input could not be read.
    #[error("error reading `{path}`")]
    Read {
        /// The path that failed to read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        error: io::Error,
    },

    /// Standard input could not be read.
    #[error("error reading standard input")]
    Stdin(#[source] io::Error),

    /// The document is not well-formed XML.
    #[error("malformed XML")]
    Xml(#[from] quick_xml::Error),

    /// No `testsuite`, `testsuites` or `testrun` element roots the document.
    #[error(
        "no testsuite, testsuites or testrun root element found{}",
        .root.as_deref().map(|root| format!(" (document root is `{root}`)")).unwrap_or_default()
    )]
    UnrecognizedRoot {
        /// The root element that was found instead, if any.
        root: Option<String>,
    },
}

/// An error that occurred while serializing a merged document.
#[derive(Debug, Error)]
#[error("error serializing merged report")]
pub struct SerializeError {
    #[from]
    inner: io::Error,
}
