// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [JUnit XML report][1] [`Writer`] implementation.
//!
//! The implementation is split across several focused modules:
//!
//! - [`cli`]: CLI configuration of the report destination
//! - [`naming`]: sanitization of tags and names into JUnit identifiers
//! - [`case`]: aggregation of steps and results into test cases
//! - [`report`]: report data model and its XML serialization
//! - [`writer`]: the [`Writer`] routing runner notifications
//!
//! [`Writer`]: crate::Writer
//! [1]: https://llg.cubic.org/docs/junit

pub mod case;
pub mod cli;
pub mod naming;
pub mod report;
pub mod writer;

pub use cli::Cli;
pub use writer::JUnit;
