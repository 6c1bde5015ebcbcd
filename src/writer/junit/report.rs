// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [JUnit XML report][1] data model and its serialization.
//!
//! [1]: https://llg.cubic.org/docs/junit

use std::io;

use quick_xml::{
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, Event},
    Writer,
};

use crate::error::ReportResult;

static TESTSUITE_TAG: &str = "testsuite";
static TESTCASE_TAG: &str = "testcase";
static FAILURE_TAG: &str = "failure";
static SKIPPED_TAG: &str = "skipped";
static SYSTEM_OUT_TAG: &str = "system-out";

/// Number of nanoseconds in a second.
const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Final classification of a [`ReportEntry`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Verdict {
    /// At least one result failed.
    Failed {
        /// Message of the last failed result.
        message: String,
    },

    /// Nothing failed, but at least one result was undefined or pending.
    Skipped,

    /// Everything passed.
    Passed,
}

impl Verdict {
    /// Indicates whether this is a [`Verdict::Failed`].
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Finalized JUnit test case.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportEntry {
    /// Dotted namespace of the feature this entry belongs to.
    pub namespace: String,

    /// Class name of the feature this entry belongs to.
    pub class_name: String,

    /// Method name of this entry.
    pub name: String,

    /// Total duration in nanoseconds.
    pub duration: u64,

    /// Rendered step log, with a stack trace appended on failure.
    pub log: String,

    /// [`Verdict`] of this entry.
    pub verdict: Verdict,
}

impl ReportEntry {
    /// Renders the [`ReportEntry::duration`] in seconds.
    ///
    /// See [`format_seconds()`] for details.
    #[must_use]
    pub fn time(&self) -> String {
        format_seconds(self.duration)
    }
}

/// Renders the given number of nanoseconds as seconds.
///
/// Rounds the binary `f64` value of the seconds to at most 6 fractional
/// digits, trims trailing zeros and never uses an exponent or a
/// locale-specific decimal separator.
///
/// ```rust
/// # use cucumber_junit::writer::junit::report::format_seconds;
/// assert_eq!(format_seconds(1_500_000_000), "1.5");
/// assert_eq!(format_seconds(3_000_000_000), "3");
/// assert_eq!(format_seconds(1_234), "0.000001");
/// ```
#[allow(clippy::cast_precision_loss)] // matches `double` based reports
#[must_use]
pub fn format_seconds(nanos: u64) -> String {
    let secs = nanos as f64 / NANOS_PER_SEC;
    let fixed = format!("{secs:.6}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Run-wide counters of a [`Report`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunTotals {
    /// Number of started scenarios.
    pub tests: usize,

    /// Number of failed [`ReportEntry`]s, once the run has finished.
    pub failures: Option<usize>,
}

/// JUnit XML report of a single run, rendered as a single `testsuite`.
#[derive(Clone, Debug, Default)]
pub struct Report {
    /// Namespace of the last tagged feature.
    package: Option<String>,

    /// Class name of the last tagged feature.
    name: Option<String>,

    /// Run-wide counters.
    totals: RunTotals,

    /// Finalized entries in completion order.
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Creates a new empty [`Report`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `package` and `name` attributes of the root element.
    pub fn set_suite(&mut self, package: String, name: String) {
        self.package = Some(package);
        self.name = Some(name);
    }

    /// Counts a started scenario.
    pub fn count_test(&mut self) {
        self.totals.tests += 1;
    }

    /// Appends the given [`ReportEntry`].
    pub fn add_entry(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// Returns the buffered [`ReportEntry`]s in completion order.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Returns the current [`RunTotals`].
    #[must_use]
    pub const fn totals(&self) -> RunTotals {
        self.totals
    }

    /// Returns the `package` attribute of the root element, if set.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Returns the `name` attribute of the root element, if set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Counts failed entries and serializes this [`Report`] into the given
    /// `sink`.
    ///
    /// # Errors
    ///
    /// If XML serialization or writing into the `sink` fails.
    pub fn finalize_and_serialize(
        &mut self,
        sink: impl io::Write,
    ) -> ReportResult<()> {
        let failures =
            self.entries.iter().filter(|e| e.verdict.is_failed()).count();
        self.totals.failures = Some(failures);
        self.write_xml(sink)
    }

    /// Serializes this [`Report`] as indented XML into the given `sink`.
    ///
    /// # Errors
    ///
    /// If XML serialization or writing into the `sink` fails.
    pub fn write_xml(&self, sink: impl io::Write) -> ReportResult<()> {
        let mut writer = Writer::new_with_indent(sink, b' ', 4);
        writer.write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some("UTF-8"),
            None,
        )))?;

        let tests = self.totals.tests.to_string();
        let failures = self.totals.failures.unwrap_or_default().to_string();
        let mut testsuite = BytesStart::new(TESTSUITE_TAG);
        if let Some(package) = &self.package {
            testsuite.push_attribute(("package", package.as_str()));
        }
        if let Some(name) = &self.name {
            testsuite.push_attribute(("name", name.as_str()));
        }
        testsuite.push_attribute(("tests", tests.as_str()));
        testsuite.push_attribute(("failures", failures.as_str()));

        if self.entries.is_empty() {
            writer.write_event(Event::Empty(testsuite))?;
        } else {
            writer.write_event(Event::Start(testsuite))?;
            for entry in &self.entries {
                serialize_entry(entry, &mut writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new(TESTSUITE_TAG)))?;
        }

        // Add a trailing newline.
        writer.write_indent()?;
        Ok(())
    }
}

fn serialize_entry(
    entry: &ReportEntry,
    writer: &mut Writer<impl io::Write>,
) -> ReportResult<()> {
    let time = entry.time();
    let mut testcase = BytesStart::new(TESTCASE_TAG);
    testcase.push_attribute(("classname", entry.class_name.as_str()));
    testcase.push_attribute(("name", entry.name.as_str()));
    testcase.push_attribute(("time", time.as_str()));
    writer.write_event(Event::Start(testcase))?;

    let tag = match &entry.verdict {
        Verdict::Failed { message } => {
            let mut failure = BytesStart::new(FAILURE_TAG);
            failure.push_attribute(("message", message.as_str()));
            writer.write_event(Event::Start(failure))?;
            FAILURE_TAG
        }
        Verdict::Skipped => {
            writer.write_event(Event::Start(BytesStart::new(SKIPPED_TAG)))?;
            SKIPPED_TAG
        }
        Verdict::Passed => {
            writer.write_event(Event::Start(BytesStart::new(SYSTEM_OUT_TAG)))?;
            SYSTEM_OUT_TAG
        }
    };
    serialize_cdata(&entry.log, writer)?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;

    writer.write_event(Event::End(BytesEnd::new(TESTCASE_TAG)))?;
    Ok(())
}

/// Writes the given `text` as CDATA, splitting it into adjacent sections
/// around any `]]>` it contains.
fn serialize_cdata(
    text: &str,
    writer: &mut Writer<impl io::Write>,
) -> ReportResult<()> {
    for chunk in cdata_chunks(text) {
        writer.write_event(Event::CData(BytesCData::new(chunk)))?;
    }
    Ok(())
}

/// Splits the given `text` so that no chunk contains `]]>`.
fn cdata_chunks(text: &str) -> Vec<&str> {
    let mut chunks = vec![];
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        // Cut between `]]` and `>`.
        let (head, tail) = rest.split_at(pos + 2);
        chunks.push(head);
        rest = tail;
    }
    chunks.push(rest);
    chunks
}
