// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [JUnit XML report][1] formatter for [Cucumber] runners.
//!
//! A runner feeds its notifications (features, scenarios, steps, hook and
//! step results) into a [`Writer`], one at a time. The [`JUnit`] [`Writer`]
//! aggregates them into test cases and writes a single report on
//! [`Writer::done()`].
//!
//! ```rust
//! use cucumber_junit::{
//!     event::{Feature, Scenario, Step, TestResult},
//!     JUnit, Writer as _,
//! };
//!
//! # fn main() -> Result<(), cucumber_junit::error::ReportWriteError> {
//! let mut junit = JUnit::new(Vec::new());
//! junit.feature(Feature::new("Animals").tagged("@pets"));
//! junit.scenario(Scenario::new("A cat is hungry"));
//! junit.step(Step::new("Given ", "a hungry cat"));
//! junit.result(TestResult::passed(1_500_000_000));
//! junit.done()?;
//!
//! let xml = String::from_utf8(junit.into_output()).unwrap();
//! assert!(xml.contains(r#"name="aCatIsHungry" time="1.5""#));
//! # Ok(())
//! # }
//! ```
//!
//! [1]: https://llg.cubic.org/docs/junit
//! [Cucumber]: https://cucumber.io

#![forbid(non_ascii_idents, unsafe_code)]
#![warn(missing_docs, unreachable_pub)]

pub mod error;
pub mod event;
pub mod writer;

#[doc(inline)]
pub use self::{
    error::{ReportInitError, ReportWriteError},
    writer::{junit::Cli, JUnit, Writer},
};
