// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sanitization of free-form names into JUnit identifiers.
//!
//! JUnit consumers treat `package`, `classname` and `name` attributes as
//! Java identifiers, so feature tags, feature names and scenario names are
//! normalized here before landing in a report.

use unicode_normalization::UnicodeNormalization as _;

/// Characters splitting a phrase into words, in addition to whitespace.
const DELIMITERS: &[char] = &[',', '\'', '"', '.', '-', '/', '_', '>'];

/// Turns the given `tag` into a single dotted namespace segment.
///
/// ```rust
/// # use cucumber_junit::writer::junit::naming::to_namespace_segment;
/// assert_eq!(to_namespace_segment("@Smoke-Test"), "smoke_test");
/// ```
#[must_use]
pub fn to_namespace_segment(tag: &str) -> String {
    tag.to_lowercase().replace('-', "_").replace('@', "")
}

/// Joins [`to_namespace_segment()`]s of the given `tags` with dots.
#[must_use]
pub fn to_namespace<T: AsRef<str>>(tags: &[T]) -> String {
    tags.iter()
        .map(|t| to_namespace_segment(t.as_ref()))
        .collect::<Vec<_>>()
        .join(".")
}

/// Turns an arbitrary phrase into a PascalCase identifier.
///
/// The phrase is split on whitespace and punctuation, every word is
/// lower-cased and stripped of its diacritics, then capitalized.
///
/// ```rust
/// # use cucumber_junit::writer::junit::naming::to_class_name;
/// assert_eq!(to_class_name("Crème brûlée/recipe"), "CremeBruleeRecipe");
/// ```
#[must_use]
pub fn to_class_name(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || DELIMITERS.contains(&c))
        .filter(|word| !word.is_empty())
        .map(|word| strip_diacritics(&word.to_lowercase()))
        .filter(|word| !word.is_empty())
        .map(|word| capitalize(&word))
        .collect()
}

/// Turns an arbitrary phrase into a camelCase identifier.
///
/// Same as [`to_class_name()`], but with the very first character
/// lower-cased.
#[must_use]
pub fn to_method_name(text: &str) -> String {
    let class_name = to_class_name(text);
    let mut chars = class_name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

/// Decomposes the given `word` canonically (NFD) and drops the combining
/// diacritical marks.
fn strip_diacritics(word: &str) -> String {
    word.nfd()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .collect()
}

/// Upper-cases the first character of the given `word`.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
