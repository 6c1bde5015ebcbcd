// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Core trait for formatters of runner notifications.

use crate::event::{Event, Feature, HookType, Scenario, Step, TestResult};

/// Formatter of runner notifications into some output.
///
/// A runner delivers notifications one at a time, synchronously, in the
/// order execution produces them. Implementors must tolerate out-of-order or
/// partial sequences: no notification except [`Writer::done()`] can fail.
///
/// Notifications carrying nothing reportable have no-op default
/// implementations.
pub trait Writer {
    /// Error of finishing the output in [`Writer::done()`].
    type Error;

    /// [`Feature`] started.
    fn feature(&mut self, feature: Feature);

    /// [Background] started.
    ///
    /// [Background]: https://cucumber.io/docs/gherkin/reference#background
    fn background(&mut self);

    /// [`Scenario`] started.
    fn scenario(&mut self, scenario: Scenario);

    /// [`Step`] declaration was seen.
    fn step(&mut self, step: Step);

    /// [Examples] table with the given number of `rows` (including its
    /// header) was seen.
    ///
    /// [Examples]: https://cucumber.io/docs/gherkin/reference#examples
    fn examples(&mut self, rows: usize);

    /// Hook of the given [`HookType`] finished with the given [`TestResult`].
    fn hook(&mut self, ty: HookType, result: TestResult);

    /// [`Step`] finished with the given [`TestResult`].
    fn result(&mut self, result: TestResult);

    /// Whole run finished.
    ///
    /// # Errors
    ///
    /// If the output cannot be finished.
    fn done(&mut self) -> Result<(), Self::Error>;

    /// [Scenario Outline] declaration was seen.
    ///
    /// [Scenario Outline]: https://cucumber.io/docs/gherkin/reference#scenario-outline
    fn scenario_outline(&mut self, _outline: Scenario) {}

    /// Execution of a [`Scenario`] is about to begin.
    fn start_of_scenario_life_cycle(&mut self, _scenario: Scenario) {}

    /// Execution of a [`Scenario`] has ended.
    fn end_of_scenario_life_cycle(&mut self, _scenario: Scenario) {}

    /// [`Step`] was matched with its definition.
    fn step_match(&mut self) {}

    /// Data was attached to the current [`Scenario`].
    fn embedding(&mut self, _mime_type: String, _data: Vec<u8>) {}

    /// Text was written to the current [`Scenario`].
    fn write(&mut self, _text: String) {}

    /// Feature file at the given `uri` is being processed.
    fn uri(&mut self, _uri: String) {}

    /// Feature file failed to parse.
    fn syntax_error(
        &mut self,
        _state: String,
        _event: String,
        _legal_events: Vec<String>,
        _uri: String,
        _line: Option<usize>,
    ) {
    }

    /// Processing of a feature file has ended.
    fn eof(&mut self) {}

    /// Output stream is being closed.
    fn close(&mut self) {}

    /// Dispatches the given [`Event`] to the matching notification method.
    ///
    /// # Errors
    ///
    /// If the [`Event::Done`] fails to finish the output.
    fn handle_event(&mut self, event: Event) -> Result<(), Self::Error> {
        match event {
            Event::Feature(f) => self.feature(f),
            Event::Background => self.background(),
            Event::ScenarioOutline(sc) => self.scenario_outline(sc),
            Event::Examples { rows } => self.examples(rows),
            Event::StartOfScenarioLifeCycle(sc) => {
                self.start_of_scenario_life_cycle(sc);
            }
            Event::Scenario(sc) => self.scenario(sc),
            Event::Step(st) => self.step(st),
            Event::Match => self.step_match(),
            Event::Hook(ty, res) => self.hook(ty, res),
            Event::Result(res) => self.result(res),
            Event::EndOfScenarioLifeCycle(sc) => {
                self.end_of_scenario_life_cycle(sc);
            }
            Event::Embedding { mime_type, data } => {
                self.embedding(mime_type, data);
            }
            Event::Write(text) => self.write(text),
            Event::Uri(uri) => self.uri(uri),
            Event::SyntaxError {
                state,
                event,
                legal_events,
                uri,
                line,
            } => self.syntax_error(state, event, legal_events, uri, line),
            Event::Eof => self.eof(),
            Event::Close => self.close(),
            Event::Done => return self.done(),
        }
        Ok(())
    }
}
