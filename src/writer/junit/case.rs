// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Aggregation of [`Step`]s and their [`TestResult`]s into a single JUnit
//! test case.

use crate::event::{Feature, Scenario, Status, Step, TestResult};

use super::{
    naming,
    report::{ReportEntry, Verdict},
};

/// Minimal width of a [`Step`] line in a step log, before its status.
pub const STEP_LOG_WIDTH: usize = 140;

/// Character padding [`Step`] lines up to the [`STEP_LOG_WIDTH`].
pub const STEP_LOG_FILL: char = '.';

/// Naming of a [`Feature`], snapshotted by every [`Case`] at its creation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Attribution {
    /// Dotted namespace derived from the [`Feature`] tags.
    pub namespace: String,

    /// Class name derived from the [`Feature`] name.
    pub class_name: String,
}

impl Attribution {
    /// Derives an [`Attribution`] of the given [`Feature`].
    #[must_use]
    pub fn of(feature: &Feature) -> Self {
        Self {
            namespace: naming::to_namespace(&feature.tags),
            class_name: naming::to_class_name(&feature.name),
        }
    }
}

/// Countdown of [Examples] rows, used to disambiguate test cases generated
/// from a single [Scenario Outline].
///
/// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
/// [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExamplesCounter(usize);

impl ExamplesCounter {
    /// Resets this counter to the number of data rows of an [Examples]
    /// table having the given number of `rows` (including its header).
    ///
    /// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
    pub fn reset(&mut self, rows: usize) {
        self.0 = rows.saturating_sub(1);
    }

    /// Returns the current value of this counter.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Suffixes the given `name` with the current value and counts down, if
    /// any rows are left.
    fn take_suffixed(&mut self, name: &str) -> String {
        if self.0 == 0 {
            return name.to_owned();
        }
        let suffixed = format!("{name}_{}", self.0);
        self.0 -= 1;
        suffixed
    }
}

/// In-progress JUnit test case.
///
/// Opened either by a [Background] (unbound, without a [`Scenario`] yet) or
/// by a [`Scenario`], or by a failed hook when nothing else is open.
///
/// [Background]: https://cucumber.io/docs/gherkin/reference#background
#[derive(Clone, Debug)]
pub struct Case {
    /// [`Scenario`] this [`Case`] is bound to.
    scenario: Option<Scenario>,

    /// [`Attribution`] of the [`Feature`] current at the creation.
    attribution: Attribution,

    /// Seen [`Step`]s in emission order.
    steps: Vec<Step>,

    /// Seen [`TestResult`]s in emission order.
    results: Vec<TestResult>,
}

impl Case {
    /// Opens a new unbound [`Case`].
    #[must_use]
    pub const fn unbound(attribution: Attribution) -> Self {
        Self {
            scenario: None,
            attribution,
            steps: vec![],
            results: vec![],
        }
    }

    /// Opens a new [`Case`] bound to the given [`Scenario`].
    #[must_use]
    pub fn bound(scenario: Scenario, attribution: Attribution) -> Self {
        Self {
            scenario: Some(scenario),
            ..Self::unbound(attribution)
        }
    }

    /// Binds this [`Case`] to the given [`Scenario`], replacing any
    /// previously bound one.
    pub fn bind(&mut self, scenario: Scenario) {
        self.scenario = Some(scenario);
    }

    /// Returns the [`Scenario`] this [`Case`] is bound to, if any.
    #[must_use]
    pub const fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    /// Returns the [`Attribution`] snapshotted by this [`Case`].
    #[must_use]
    pub const fn attribution(&self) -> &Attribution {
        &self.attribution
    }

    /// Records the given [`Step`].
    pub fn push_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Records the given [`TestResult`].
    pub fn push_result(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Indicates whether this [`Case`] is bound and has a [`TestResult`] for
    /// each of its [`Step`]s.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.scenario.is_some() && self.results.len() == self.steps.len()
    }

    /// Finalizes this [`Case`] into a [`ReportEntry`].
    ///
    /// Consumes a row of the [`ExamplesCounter`], if any left.
    #[must_use]
    pub fn finalize(self, examples: &mut ExamplesCounter) -> ReportEntry {
        let scenario_name =
            self.scenario.as_ref().map_or("", |sc| sc.name.as_str());
        let name = naming::to_method_name(&examples.take_suffixed(scenario_name));

        let duration = self
            .results
            .iter()
            .filter_map(|r| r.duration)
            .fold(0_u64, u64::saturating_add);

        let mut log = self.step_log();
        let verdict = match self.verdict() {
            Classified::Failed(failed) => {
                let (message, trace) = failed
                    .error
                    .as_ref()
                    .map_or(("", ""), |e| {
                        (e.message.as_str(), e.stack_trace.as_str())
                    });
                log.push_str("\nStackTrace:\n");
                log.push_str(trace);
                Verdict::Failed {
                    message: message.to_owned(),
                }
            }
            Classified::Skipped => Verdict::Skipped,
            Classified::Passed => Verdict::Passed,
        };

        ReportEntry {
            namespace: self.attribution.namespace,
            class_name: self.attribution.class_name,
            name,
            duration,
            log,
            verdict,
        }
    }

    /// Renders every [`Step`] with its [`Status`] on a separate line.
    fn step_log(&self) -> String {
        let mut log = String::new();
        for (step, result) in self.steps.iter().zip(&self.results) {
            let line = format!("{}{}", step.keyword, step.text);
            let fill = STEP_LOG_WIDTH
                .saturating_sub(line.chars().count())
                .max(1);
            log.push_str(&line);
            log.extend(std::iter::repeat(STEP_LOG_FILL).take(fill));
            log.push_str(&result.status.to_string());
            log.push('\n');
        }
        log
    }

    /// Classifies the [`TestResult`]s of this [`Case`] in [`Step`] order.
    fn verdict(&self) -> Classified<'_> {
        let mut failed = None;
        let mut skipped = None;
        for result in self.results.iter().take(self.steps.len()) {
            if result.status == Status::Failed {
                failed = Some(result);
            }
            if result.status.is_skipped_like() {
                skipped = Some(result);
            }
        }
        match (failed, skipped) {
            (Some(f), _) => Classified::Failed(f),
            (None, Some(_)) => Classified::Skipped,
            (None, None) => Classified::Passed,
        }
    }
}

/// Outcome of classifying [`TestResult`]s of a [`Case`].
#[derive(Debug)]
enum Classified<'r> {
    /// Last seen failed [`TestResult`].
    Failed(&'r TestResult),
    Skipped,
    Passed,
}

#[cfg(test)]
mod tests {
    use crate::event::Failure;

    use super::*;

    fn attribution() -> Attribution {
        Attribution::of(&Feature::new("Shopping cart").tagged("@smoke"))
    }

    fn case_of(results: Vec<TestResult>) -> Case {
        let mut case = Case::bound(Scenario::new("Add item"), attribution());
        for i in 0..results.len() {
            case.push_step(Step::new("Given ", format!("step {i}")));
        }
        for r in results {
            case.push_result(r);
        }
        case
    }

    #[test]
    fn attribution_snapshots_feature() {
        let attr = attribution();
        assert_eq!(attr.namespace, "smoke");
        assert_eq!(attr.class_name, "ShoppingCart");
    }

    #[test]
    fn completes_when_bound_and_every_step_has_result() {
        let mut case = Case::bound(Scenario::new("x"), attribution());
        case.push_step(Step::new("Given ", "a"));
        assert!(!case.is_complete());
        case.push_result(TestResult::passed(1));
        assert!(case.is_complete());
    }

    #[test]
    fn unbound_case_is_never_complete() {
        let mut case = Case::unbound(attribution());
        assert!(!case.is_complete());
        case.push_step(Step::new("Given ", "a"));
        case.push_result(TestResult::passed(1));
        assert!(!case.is_complete());

        case.bind(Scenario::new("late"));
        assert!(case.is_complete());
        assert_eq!(case.scenario().map(|s| s.name.as_str()), Some("late"));
    }

    #[test]
    fn all_passed_yields_passed() {
        let entry = case_of(vec![
            TestResult::passed(1),
            TestResult::passed(1),
            TestResult::passed(1),
        ])
        .finalize(&mut ExamplesCounter::default());

        assert_eq!(entry.verdict, Verdict::Passed);
        assert_eq!(entry.class_name, "ShoppingCart");
        assert_eq!(entry.namespace, "smoke");
        assert_eq!(entry.name, "addItem");
        assert_eq!(entry.log.lines().count(), 3);
        assert!(!entry.log.contains("StackTrace"));
    }

    #[test]
    fn any_failure_yields_failed_with_trace() {
        let entry = case_of(vec![
            TestResult::passed(1),
            TestResult::failed(1, Failure::new("boom", "Error: boom\n\tat x")),
            TestResult::new(Status::Skipped),
        ])
        .finalize(&mut ExamplesCounter::default());

        assert_eq!(
            entry.verdict,
            Verdict::Failed {
                message: "boom".into()
            },
        );
        assert!(entry.log.contains("step 0"));
        assert!(entry.log.contains("step 1"));
        assert!(entry.log.contains("step 2"));
        assert!(entry.log.ends_with("\nStackTrace:\nError: boom\n\tat x"));
    }

    #[test]
    fn failure_wins_over_later_undefined() {
        let entry = case_of(vec![
            TestResult::failed(1, Failure::new("first", "")),
            TestResult::new(Status::Undefined),
        ])
        .finalize(&mut ExamplesCounter::default());

        assert!(entry.verdict.is_failed());
    }

    #[test]
    fn last_failure_provides_message() {
        let entry = case_of(vec![
            TestResult::failed(1, Failure::new("first", "")),
            TestResult::failed(1, Failure::new("second", "")),
        ])
        .finalize(&mut ExamplesCounter::default());

        assert_eq!(
            entry.verdict,
            Verdict::Failed {
                message: "second".into()
            },
        );
    }

    #[test]
    fn failure_without_error_has_empty_message() {
        let entry = case_of(vec![TestResult::new(Status::Failed)])
            .finalize(&mut ExamplesCounter::default());

        assert_eq!(
            entry.verdict,
            Verdict::Failed {
                message: String::new()
            },
        );
        assert!(entry.log.ends_with("\nStackTrace:\n"));
    }

    #[test]
    fn undefined_or_pending_yields_skipped() {
        let undefined = case_of(vec![
            TestResult::passed(1),
            TestResult::new(Status::Undefined),
        ])
        .finalize(&mut ExamplesCounter::default());
        assert_eq!(undefined.verdict, Verdict::Skipped);

        let pending = case_of(vec![TestResult::new(Status::Pending)])
            .finalize(&mut ExamplesCounter::default());
        assert_eq!(pending.verdict, Verdict::Skipped);
    }

    #[test]
    fn skipped_results_alone_yield_passed() {
        let entry = case_of(vec![
            TestResult::new(Status::Skipped),
            TestResult::new(Status::Skipped),
        ])
        .finalize(&mut ExamplesCounter::default());

        assert_eq!(entry.verdict, Verdict::Passed);
        assert!(entry.log.contains("skipped\n"));
    }

    #[test]
    fn sums_durations_treating_absent_as_zero() {
        let entry = case_of(vec![
            TestResult::passed(1_000_000_000),
            TestResult::new(Status::Passed),
            TestResult::passed(500_000_000),
        ])
        .finalize(&mut ExamplesCounter::default());

        assert_eq!(entry.duration, 1_500_000_000);
        assert_eq!(entry.time(), "1.5");
    }

    #[test]
    fn pads_step_lines_to_fixed_width() {
        let entry = case_of(vec![TestResult::passed(0)])
            .finalize(&mut ExamplesCounter::default());

        let line = entry.log.lines().next().unwrap_or_default();
        assert!(line.starts_with("Given step 0...."));
        assert!(line.ends_with("passed"));
        assert_eq!(line.chars().count(), STEP_LOG_WIDTH + "passed".len());
    }

    #[test]
    fn long_step_lines_get_single_fill() {
        let text = "x".repeat(STEP_LOG_WIDTH + 10);
        let mut case = Case::bound(Scenario::new("long"), attribution());
        case.push_step(Step::new("Then ", text.clone()));
        case.push_result(TestResult::passed(0));

        let entry = case.finalize(&mut ExamplesCounter::default());

        assert_eq!(entry.log, format!("Then {text}.passed\n"));
    }

    #[test]
    fn examples_counter_suffixes_in_reverse_order() {
        let mut examples = ExamplesCounter::default();
        examples.reset(4);
        assert_eq!(examples.get(), 3);

        let names = (0..4)
            .map(|_| {
                let mut case =
                    Case::bound(Scenario::new("Check X"), attribution());
                case.push_step(Step::new("Given ", "x"));
                case.push_result(TestResult::passed(0));
                case.finalize(&mut examples).name
            })
            .collect::<Vec<_>>();

        assert_eq!(names, ["checkX3", "checkX2", "checkX1", "checkX"]);
        assert_eq!(examples.get(), 0);
    }

    #[test]
    fn empty_examples_table_does_not_underflow() {
        let mut examples = ExamplesCounter::default();
        examples.reset(0);
        assert_eq!(examples.get(), 0);
        examples.reset(1);
        assert_eq!(examples.get(), 0);
    }
}
