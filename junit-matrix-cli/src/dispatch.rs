// Copyright (c) The junit-matrix Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argument parsing and command dispatch.

use crate::errors::{ExpectedError, MatrixExitCode};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser};
use junit_matrix::{
    parse::{self, ReportInput},
    render, Matrix, Merger, ReportContainer,
};
use tracing::level_filters::LevelFilter;

/// Render JUnit/XUnit XML test reports as HTML, compare several runs as a
/// matrix, or merge them into one document.
#[derive(Debug, Parser)]
#[command(name = "junit-matrix", version)]
pub struct App {
    #[command(flatten)]
    output: OutputOpts,

    /// Print a text matrix of all inputs to stdout
    #[arg(long, conflicts_with = "merge")]
    summary_matrix: bool,

    /// Write an HTML matrix to DIR, plus one rendered page per input
    #[arg(long, value_name = "DIR", conflicts_with = "merge")]
    report_matrix: Option<Utf8PathBuf>,

    /// Merge all inputs into a single XML document written to PATH
    #[arg(long, value_name = "PATH")]
    merge: Option<Utf8PathBuf>,

    /// Exit non-zero once N failing test cases have been seen (ignored when
    /// merging)
    #[arg(long, value_name = "N")]
    max_failures: Option<usize>,

    /// Exit non-zero once N skipped test cases have been seen (ignored when
    /// merging)
    #[arg(long, value_name = "N")]
    max_skipped: Option<usize>,

    /// Input reports; `-` reads standard input. Without a matrix or merge
    /// flag, the first argument is rendered as HTML and an optional second
    /// argument names the output file
    #[arg(required = true, value_name = "REPORT")]
    inputs: Vec<String>,
}

#[derive(Debug, Args)]
struct OutputOpts {
    /// Verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

impl OutputOpts {
    fn init(&self) {
        let level = if self.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        };
        // try_init: a second init (e.g. from tests driving `exec` twice) is
        // fine to ignore.
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

impl App {
    /// Executes the app, returning the process exit code.
    pub fn exec(self) -> Result<i32, ExpectedError> {
        self.output.init();

        if let Some(out) = self.merge.clone() {
            self.exec_merge(&out)
        } else if self.summary_matrix || self.report_matrix.is_some() {
            self.exec_matrix()
        } else {
            self.exec_single()
        }
    }

    fn exec_merge(&self, out: &Utf8Path) -> Result<i32, ExpectedError> {
        let mut merger = Merger::new();
        for arg in &self.inputs {
            let input = ReportInput::from_arg(arg);
            // A directly named file that fails to parse is fatal here;
            // only directory-walk failures are swallowed by the merger.
            merger
                .add_source(&input)
                .map_err(|error| ExpectedError::Parse {
                    input: input.describe(),
                    error,
                })?;
        }

        let document = merger
            .to_document()
            .map_err(|error| ExpectedError::Serialize { error })?;
        fs_err::write(out, document).map_err(|error| ExpectedError::Write {
            path: out.to_owned(),
            error,
        })?;
        Ok(MatrixExitCode::OK)
    }

    fn exec_matrix(&self) -> Result<i32, ExpectedError> {
        let mut matrix = Matrix::new();
        for arg in &self.inputs {
            let input = ReportInput::from_arg(arg);
            // One bad file must not sink a multi-report comparison.
            if let Err(error) = matrix.add_source(&input) {
                tracing::error!(input = %input.describe(), %error, "skipping unparseable report");
            }
        }

        if let Some(dir) = &self.report_matrix {
            fs_err::create_dir_all(dir).map_err(|error| ExpectedError::Write {
                path: dir.clone(),
                error,
            })?;
            for (axis, report) in matrix.reports() {
                let path = dir.join(format!("{axis}.html"));
                fs_err::write(&path, render::render_report(report)).map_err(|error| {
                    ExpectedError::Write { path, error }
                })?;
            }
            let index = dir.join("index.html");
            fs_err::write(&index, render::render_html_matrix(&matrix)).map_err(|error| {
                ExpectedError::Write { path: index, error }
            })?;
        }

        if self.summary_matrix {
            print!("{}", render::render_text_matrix(&matrix));
        }

        self.check_limits(matrix.failures().len(), matrix.skips().len())?;
        Ok(MatrixExitCode::OK)
    }

    fn exec_single(&self) -> Result<i32, ExpectedError> {
        let report_arg = self.inputs[0].as_str();
        let input = ReportInput::from_arg(report_arg);
        let report = parse::parse(&input).map_err(|error| ExpectedError::Parse {
            input: input.describe(),
            error,
        })?;

        let out = match self.inputs.get(1) {
            Some(out) => Utf8PathBuf::from(out),
            None => Utf8PathBuf::from(format!("{report_arg}.html")),
        };
        fs_err::write(&out, render::render_report(&report)).map_err(|error| {
            ExpectedError::Write { path: out, error }
        })?;

        let failures = report.suites.iter().map(|suite| suite.failed().len()).sum();
        let skips = report.suites.iter().map(|suite| suite.skipped().len()).sum();
        self.check_limits(failures, skips)?;
        Ok(MatrixExitCode::OK)
    }

    fn check_limits(&self, failures: usize, skips: usize) -> Result<(), ExpectedError> {
        if let Some(limit) = self.max_failures {
            if failures >= limit {
                return Err(ExpectedError::MaxFailuresExceeded {
                    count: failures,
                    limit,
                });
            }
        }
        if let Some(limit) = self.max_skipped {
            if skips >= limit {
                return Err(ExpectedError::MaxSkippedExceeded {
                    count: skips,
                    limit,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn clap_definition_is_valid() {
        App::command().debug_assert();
    }

    #[test]
    fn merge_conflicts_with_matrix_flags() {
        let result = App::try_parse_from([
            "junit-matrix",
            "--merge",
            "out.xml",
            "--summary-matrix",
            "a.xml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn inputs_are_required() {
        assert!(App::try_parse_from(["junit-matrix"]).is_err());
    }

    #[test]
    fn verbose_and_modes_parse() {
        let app = App::try_parse_from([
            "junit-matrix",
            "--summary-matrix",
            "--max-failures",
            "3",
            "-v",
            "a.xml",
            "b.xml",
        ])
        .expect("arguments parse");
        assert!(app.summary_matrix);
        assert_eq!(app.max_failures, Some(3));
        assert!(app.output.verbose);
        assert_eq!(app.inputs, ["a.xml", "b.xml"]);
    }
}
