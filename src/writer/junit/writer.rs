// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Main JUnit XML writer implementation.

use std::{
    fs,
    io::{self, Write as _},
    path::Path,
};

use crate::{
    error::{ReportInitError, ReportWriteError},
    event::{Feature, HookType, Scenario, Status, Step, TestResult},
    Writer,
};

use super::{
    case::{Attribution, Case, ExamplesCounter},
    report::Report,
};

/// [JUnit XML report][1] [`Writer`] implementation outputting XML to an
/// [`io::Write`] implementor.
///
/// Aggregates [`Step`]s and their [`TestResult`]s into test cases as they
/// complete, and writes the whole report once on [`Writer::done()`].
///
/// [1]: https://llg.cubic.org/docs/junit
#[derive(Debug)]
pub struct JUnit<Out: io::Write> {
    /// [`io::Write`] implementor to output XML report into.
    output: Out,

    /// [`Attribution`] of the current [`Feature`].
    feature: Attribution,

    /// Currently open [`Case`].
    case: Option<Case>,

    /// Countdown of the current [Examples] table rows.
    ///
    /// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
    examples: ExamplesCounter,

    /// Report being accumulated.
    report: Report,

    /// Indicates whether the report has been written already.
    finished: bool,
}

impl JUnit<io::BufWriter<fs::File>> {
    /// Creates a new [`JUnit`] [`Writer`] outputting XML report into a file
    /// at the given `path`, creating or truncating it.
    ///
    /// # Errors
    ///
    /// If the file cannot be created.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReportInitError> {
        let path = path.as_ref();
        let file = fs::File::create(path)
            .map_err(|e| ReportInitError::open(path, e))?;
        Ok(Self::new(io::BufWriter::new(file)))
    }
}

impl<Out: io::Write> JUnit<Out> {
    /// Creates a new [`JUnit`] [`Writer`] outputting XML report into the
    /// given `output`.
    ///
    /// The `output` isn't touched until [`Writer::done()`].
    #[must_use]
    pub fn new(output: Out) -> Self {
        Self {
            output,
            feature: Attribution::default(),
            case: None,
            examples: ExamplesCounter::default(),
            report: Report::new(),
            finished: false,
        }
    }

    /// Returns the [`Report`] accumulated so far.
    #[must_use]
    pub const fn report(&self) -> &Report {
        &self.report
    }

    /// Returns the currently open [`Case`], if any.
    #[must_use]
    pub const fn open_case(&self) -> Option<&Case> {
        self.case.as_ref()
    }

    /// Returns the current [`ExamplesCounter`].
    #[must_use]
    pub const fn examples_left(&self) -> ExamplesCounter {
        self.examples
    }

    /// Unwraps this [`JUnit`] [`Writer`] into its output.
    #[must_use]
    pub fn into_output(self) -> Out {
        self.output
    }

    /// Indicates whether notifications may still be accepted, logging the
    /// ignored `notification` otherwise.
    fn is_accepting(&self, notification: &str) -> bool {
        if self.finished {
            tracing::warn!(
                notification,
                "ignoring notification after JUnit report was written",
            );
        }
        !self.finished
    }

    /// Finalizes the open [`Case`] into the [`Report`], if it's complete.
    fn finalize_if_complete(&mut self) {
        if !self.case.as_ref().is_some_and(Case::is_complete) {
            return;
        }
        if let Some(case) = self.case.take() {
            let entry = case.finalize(&mut self.examples);
            tracing::debug!(
                classname = %entry.class_name,
                name = %entry.name,
                verdict = ?entry.verdict,
                "JUnit test case finalized",
            );
            self.report.add_entry(entry);
        }
    }
}

impl<Out: io::Write> Writer for JUnit<Out> {
    type Error = ReportWriteError;

    fn feature(&mut self, feature: Feature) {
        if !self.is_accepting("feature") {
            return;
        }
        self.feature = Attribution::of(&feature);
        if !feature.tags.is_empty() {
            self.report.set_suite(
                self.feature.namespace.clone(),
                self.feature.class_name.clone(),
            );
        }
    }

    fn background(&mut self) {
        if !self.is_accepting("background") {
            return;
        }
        if let Some(discarded) = self.case.take() {
            tracing::warn!(
                case = ?discarded,
                "discarding incomplete case on background start",
            );
        }
        self.case = Some(Case::unbound(self.feature.clone()));
    }

    fn scenario(&mut self, scenario: Scenario) {
        if !self.is_accepting("scenario") {
            return;
        }
        match &mut self.case {
            Some(case) => case.bind(scenario),
            None => {
                self.case = Some(Case::bound(scenario, self.feature.clone()));
            }
        }
        self.report.count_test();
    }

    fn step(&mut self, step: Step) {
        if !self.is_accepting("step") {
            return;
        }
        match &mut self.case {
            Some(case) => case.push_step(step),
            None => tracing::warn!(?step, "ignoring step without open case"),
        }
    }

    fn examples(&mut self, rows: usize) {
        if !self.is_accepting("examples") {
            return;
        }
        self.examples.reset(rows);
    }

    fn hook(&mut self, ty: HookType, result: TestResult) {
        if !self.is_accepting("hook") {
            return;
        }
        if result.status != Status::Failed {
            tracing::trace!(
                hook = %ty,
                status = %result.status,
                "ignoring non-failed hook result",
            );
            return;
        }
        self.case
            .get_or_insert_with(|| Case::unbound(self.feature.clone()))
            .push_result(result);
    }

    fn result(&mut self, result: TestResult) {
        if !self.is_accepting("result") {
            return;
        }
        let Some(case) = &mut self.case else {
            tracing::warn!(?result, "ignoring step result without open case");
            return;
        };
        case.push_result(result);
        self.finalize_if_complete();
    }

    fn done(&mut self) -> Result<(), Self::Error> {
        if self.finished {
            return Err(ReportWriteError::AlreadyWritten);
        }
        self.finished = true;

        if let Some(case) = &self.case {
            tracing::warn!(?case, "dropping incomplete case at the end of run");
        }
        self.report.finalize_and_serialize(&mut self.output)?;
        self.output.flush()?;

        let totals = self.report.totals();
        tracing::debug!(
            tests = totals.tests,
            failures = totals.failures.unwrap_or_default(),
            "JUnit report written",
        );
        Ok(())
    }
}
