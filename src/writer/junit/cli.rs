// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI configuration for JUnit XML writer.

use std::{fs, io, path::PathBuf};

use crate::error::ReportInitError;

use super::JUnit;

/// CLI options of a [`JUnit`] [`Writer`].
///
/// Meant to be flattened into the CLI of a runner.
///
/// [`Writer`]: crate::Writer
#[derive(Clone, Debug, Default, clap::Args)]
#[group(skip)]
pub struct Cli {
    /// Path to write JUnit XML report into.
    #[arg(
        id = "junit-out",
        long = "junit-out",
        value_name = "path",
        global = true
    )]
    pub out: Option<PathBuf>,
}

impl Cli {
    /// Creates a new [`Cli`] writing into the given `path`.
    #[must_use]
    pub fn with_out(path: impl Into<PathBuf>) -> Self {
        Self {
            out: Some(path.into()),
        }
    }

    /// Opens a file-backed [`JUnit`] [`Writer`] at the configured path.
    ///
    /// # Errors
    ///
    /// - [`ReportInitError::MissingDestination`] if no path is configured.
    /// - [`ReportInitError::Open`] if the file cannot be created.
    ///
    /// [`Writer`]: crate::Writer
    pub fn open(
        &self,
    ) -> Result<JUnit<io::BufWriter<fs::File>>, ReportInitError> {
        let path =
            self.out.as_ref().ok_or(ReportInitError::MissingDestination)?;
        JUnit::from_path(path)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Opts {
        #[command(flatten)]
        junit: Cli,
    }

    #[test]
    fn cli_default_has_no_destination() {
        let cli = Cli::default();
        assert_eq!(cli.out, None);
        assert!(matches!(cli.open(), Err(ReportInitError::MissingDestination)));
    }

    #[test]
    fn parses_junit_out() {
        let opts = Opts::try_parse_from(["runner", "--junit-out", "report.xml"])
            .unwrap_or_else(|e| panic!("failed to parse: {e}"));
        assert_eq!(opts.junit.out, Some(PathBuf::from("report.xml")));
    }

    #[test]
    fn parses_without_junit_out() {
        let opts = Opts::try_parse_from(["runner"])
            .unwrap_or_else(|e| panic!("failed to parse: {e}"));
        assert_eq!(opts.junit.out, None);
    }

    #[test]
    fn open_fails_for_unwritable_path() {
        let dir = tempfile::tempdir()
            .unwrap_or_else(|e| panic!("failed to create temp dir: {e}"));
        let path = dir.path().join("missing").join("report.xml");

        let err = Cli::with_out(&path).open().err();

        assert!(
            matches!(&err, Some(ReportInitError::Open { path: p, .. }) if *p == path),
            "{err:?}",
        );
    }
}
