// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Key occurrences in the lifecycle of a Cucumber execution, as reported by
//! a runner to its formatters.
//!
//! The top-level enum here is [`Event`]. Each of its variants corresponds to
//! exactly one notification method of a [`Writer`], so a recorded stream of
//! [`Event`]s may be replayed into any [`Writer`] via
//! [`Writer::handle_event()`].
//!
//! [`Writer`]: crate::Writer
//! [`Writer::handle_event()`]: crate::Writer::handle_event

use derive_more::with_trait::Display;

/// [Feature] as seen by a formatter: its name and tags.
///
/// [Feature]: https://cucumber.io/docs/gherkin/reference#feature
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Feature {
    /// Free-text name of this [`Feature`].
    pub name: String,

    /// Tags of this [`Feature`], including their leading `@`.
    pub tags: Vec<String>,
}

impl Feature {
    /// Creates a new untagged [`Feature`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: vec![],
        }
    }

    /// Adds the given `tag` to this [`Feature`].
    #[must_use]
    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// [Scenario] (or a single [Examples] row of a [Scenario Outline]).
///
/// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
/// [Scenario]: https://cucumber.io/docs/gherkin/reference#example
/// [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Scenario {
    /// Free-text name of this [`Scenario`].
    pub name: String,
}

impl Scenario {
    /// Creates a new [`Scenario`] with the given `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// [Step] of a [`Scenario`] or a [Background].
///
/// [Background]: https://cucumber.io/docs/gherkin/reference#background
/// [Step]: https://cucumber.io/docs/gherkin/reference#steps
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Step {
    /// Keyword of this [`Step`] exactly as written, usually with a trailing
    /// space (`"Given "`, `"And "`, ...).
    pub keyword: String,

    /// Text of this [`Step`] following its keyword.
    pub text: String,
}

impl Step {
    /// Creates a new [`Step`].
    #[must_use]
    pub fn new(keyword: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            text: text.into(),
        }
    }
}

/// Outcome of a [`Step`] or a hook.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Status {
    /// Executed successfully.
    #[display("passed")]
    Passed,

    /// Executed and failed.
    #[display("failed")]
    Failed,

    /// Not executed, usually because a previous [`Step`] failed.
    #[display("skipped")]
    Skipped,

    /// No matching step definition exists.
    #[display("undefined")]
    Undefined,

    /// Step definition exists, but isn't implemented yet.
    #[display("pending")]
    Pending,

    /// More than one step definition matches.
    #[display("ambiguous")]
    Ambiguous,
}

impl Status {
    /// Indicates whether this [`Status`] makes a test case count as skipped,
    /// unless it failed.
    #[must_use]
    pub const fn is_skipped_like(self) -> bool {
        matches!(self, Self::Undefined | Self::Pending)
    }
}

/// Error carried by a [`Status::Failed`] [`TestResult`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Failure {
    /// Short message of the error.
    pub message: String,

    /// Fully rendered stack trace of the error.
    pub stack_trace: String,
}

impl Failure {
    /// Creates a new [`Failure`].
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        stack_trace: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            stack_trace: stack_trace.into(),
        }
    }
}

/// Result of a [`Step`] or a hook execution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestResult {
    /// [`Status`] of the execution.
    pub status: Status,

    /// Duration of the execution in nanoseconds, if measured.
    pub duration: Option<u64>,

    /// Error of a [`Status::Failed`] execution.
    pub error: Option<Failure>,
}

impl TestResult {
    /// Creates a new [`TestResult`] without duration and error.
    #[must_use]
    pub const fn new(status: Status) -> Self {
        Self {
            status,
            duration: None,
            error: None,
        }
    }

    /// Creates a new [`Status::Passed`] [`TestResult`].
    #[must_use]
    pub fn passed(duration_nanos: u64) -> Self {
        Self::new(Status::Passed).with_duration(duration_nanos)
    }

    /// Creates a new [`Status::Failed`] [`TestResult`] with the given
    /// [`Failure`].
    #[must_use]
    pub fn failed(duration_nanos: u64, error: Failure) -> Self {
        Self {
            status: Status::Failed,
            duration: Some(duration_nanos),
            error: Some(error),
        }
    }

    /// Sets the duration of this [`TestResult`] in nanoseconds.
    #[must_use]
    pub fn with_duration(mut self, duration_nanos: u64) -> Self {
        self.duration = Some(duration_nanos);
        self
    }

    /// Indicates whether this [`TestResult`] is a [`Status::Failed`] one.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == Status::Failed
    }
}

/// Kind of a hook a [`TestResult`] was reported for.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum HookType {
    /// Executing before every [`Scenario`].
    #[display("Before")]
    Before,

    /// Executing after every [`Scenario`].
    #[display("After")]
    After,
}

/// Single notification of a runner.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// [`Feature`] started. Becomes the current one.
    Feature(Feature),

    /// [Background] started.
    ///
    /// [Background]: https://cucumber.io/docs/gherkin/reference#background
    Background,

    /// [Scenario Outline] declaration was seen.
    ///
    /// [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline
    ScenarioOutline(Scenario),

    /// [Examples] table of a [Scenario Outline] with the given number of
    /// rows, including its header.
    ///
    /// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
    /// [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline
    Examples {
        /// Number of rows, including the header one.
        rows: usize,
    },

    /// Execution of a [`Scenario`] is about to begin.
    StartOfScenarioLifeCycle(Scenario),

    /// [`Scenario`] started.
    Scenario(Scenario),

    /// [`Step`] declaration was seen.
    Step(Step),

    /// [`Step`] was matched with its definition.
    Match,

    /// [`TestResult`] of a hook.
    Hook(HookType, TestResult),

    /// [`TestResult`] of a [`Step`].
    Result(TestResult),

    /// Execution of a [`Scenario`] has ended.
    EndOfScenarioLifeCycle(Scenario),

    /// Data was attached to the current [`Scenario`].
    Embedding {
        /// MIME type of the `data`.
        mime_type: String,

        /// Raw attached bytes.
        data: Vec<u8>,
    },

    /// Text was written to the current [`Scenario`].
    Write(String),

    /// Feature file at the given URI is being processed.
    Uri(String),

    /// Feature file failed to parse.
    SyntaxError {
        /// State of the parser.
        state: String,

        /// Unexpected parser event.
        event: String,

        /// Parser events that were legal in the `state`.
        legal_events: Vec<String>,

        /// URI of the feature file.
        uri: String,

        /// Line of the error, if known.
        line: Option<usize>,
    },

    /// Processing of a feature file has ended.
    Eof,

    /// Output stream is being closed.
    Close,

    /// Whole run finished.
    Done,
}
