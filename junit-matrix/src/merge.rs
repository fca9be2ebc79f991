// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Union of suites from several reports into one exportable document.

use crate::{
    container::ReportContainer,
    errors::{ParseError, SerializeError},
    parse::{self, ReportInput},
    report::{Report, Suite},
    serialize::serialize_document,
};
use camino::Utf8Path;
use std::io;
use walkdir::WalkDir;

/// Collects suites from files, directory trees, and in-memory reports, and
/// serializes them back out as one merged `<testsuites>` document.
#[derive(Clone, Debug, Default)]
pub struct Merger {
    suites: Vec<Suite>,
}

impl Merger {
    /// Creates an empty merger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests a file or a directory.
    ///
    /// A directly named file must parse; the error propagates. A directory
    /// is walked recursively (entries sorted by file name, so merged output
    /// is reproducible) and every regular file is attempted, silently
    /// skipping any that fail to parse — heterogeneous directories are an
    /// expected input shape.
    pub fn add_path(&mut self, path: &Utf8Path) -> Result<(), ParseError> {
        if path.is_dir() {
            self.add_directory(path);
            Ok(())
        } else {
            let report = parse::parse_file(path)?;
            self.absorb(report);
            Ok(())
        }
    }

    fn add_directory(&mut self, path: &Utf8Path) {
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::debug!(%error, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(file_path) = Utf8Path::from_path(entry.path()) else {
                tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 path");
                continue;
            };
            match parse::parse_file(file_path) {
                Ok(report) => self.absorb(report),
                Err(error) => {
                    tracing::debug!(path = %file_path, %error, "skipping unparseable file");
                }
            }
        }
    }

    /// Adds one in-memory suite.
    pub fn add_suite(&mut self, suite: Suite) {
        self.suites.push(suite);
    }

    fn absorb(&mut self, report: Report) {
        self.suites.extend(report.suites);
    }

    /// Sum of every case's duration across all collected suites.
    ///
    /// Suite-level durations are not added in; counting them as well would
    /// double-bill a suite's own reported time against its cases'.
    pub fn total_duration(&self) -> f64 {
        self.suites
            .iter()
            .flat_map(|suite| suite.all())
            .map(|case| case.duration)
            .sum()
    }

    /// Serializes the merged document to the given writer.
    pub fn serialize(&self, writer: impl io::Write) -> Result<(), SerializeError> {
        serialize_document(self.total_duration(), &self.suites, writer)
    }

    /// Serializes the merged document to a string.
    pub fn to_document(&self) -> Result<String, SerializeError> {
        let mut buf = Vec::new();
        self.serialize(&mut buf)?;
        String::from_utf8(buf).map_err(|error| {
            SerializeError::from(io::Error::new(io::ErrorKind::InvalidData, error))
        })
    }
}

impl ReportContainer for Merger {
    fn add_source(&mut self, input: &ReportInput) -> Result<(), ParseError> {
        match input {
            ReportInput::Path(path) => self.add_path(path),
            other => {
                let report = parse::parse(other)?;
                self.absorb(report);
                Ok(())
            }
        }
    }

    fn suites(&self) -> Vec<&Suite> {
        self.suites.iter().collect()
    }
}
