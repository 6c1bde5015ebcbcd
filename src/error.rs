// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of creating and writing a JUnit XML report.
//!
//! Both kinds are fatal: a report either gets written completely once, or
//! not at all. Malformed event sequences are never reported as errors.

use std::{io, path::PathBuf};

use derive_more::with_trait::{Display, Error};

/// Error of acquiring a report destination.
#[derive(Debug, Display, Error)]
pub enum ReportInitError {
    /// Destination file cannot be created.
    #[display("Failed to open JUnit report `{}`: {source}", path.display())]
    Open {
        /// Path of the destination file.
        #[error(not(source))]
        path: PathBuf,

        /// Underlying I/O error.
        source: io::Error,
    },

    /// No destination was configured.
    #[display("No JUnit report destination was configured")]
    MissingDestination,
}

impl ReportInitError {
    /// Creates a new [`ReportInitError::Open`].
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    /// Returns the path of the destination failed to be opened, if any.
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Open { path, .. } => Some(path),
            Self::MissingDestination => None,
        }
    }
}

/// Error of serializing a report into its destination.
#[derive(Debug, Display, Error)]
pub enum ReportWriteError {
    /// XML serialization failed.
    #[display("XML generation failed: {_0}")]
    Xml(quick_xml::Error),

    /// Destination failed to accept or flush the report.
    #[display("I/O error: {_0}")]
    Io(io::Error),

    /// Report has already been written.
    #[display("JUnit report has already been written")]
    AlreadyWritten,
}

/// Result type alias for report writing.
pub type ReportResult<T> = Result<T, ReportWriteError>;

impl ReportWriteError {
    /// Returns `true` if this is an I/O error.
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }

    /// Returns `true` if this is an XML error.
    #[must_use]
    pub const fn is_xml_error(&self) -> bool {
        matches!(self, Self::Xml(_))
    }

    /// Returns `true` if the report has already been written before.
    #[must_use]
    pub const fn is_already_written(&self) -> bool {
        matches!(self, Self::AlreadyWritten)
    }
}

impl From<io::Error> for ReportWriteError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<quick_xml::Error> for ReportWriteError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err)
    }
}
