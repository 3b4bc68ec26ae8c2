//! Pattern compiler turning a [`Query`] into a compiled matcher.

use super::types::Query;
use crate::error::CompilationError;
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// First and last Hiragana code points that have a Katakana counterpart.
const HIRAGANA: (char, char) = ('\u{3041}', '\u{3096}');
/// First and last Katakana code points that have a Hiragana counterpart.
const KATAKANA: (char, char) = ('\u{30A1}', '\u{30F6}');
/// Distance between a Hiragana code point and its Katakana twin.
const KANA_OFFSET: u32 = 0x60;

/// A compiled, always-global matcher.
///
/// Cloning is cheap; the underlying regex is reference counted.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    regex: Regex,
}

impl CompiledMatcher {
    /// Byte ranges of all non-overlapping matches, left to right.
    pub fn find_ranges<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Range<usize>> + 'a {
        self.regex.find_iter(text).map(|m| m.range())
    }

    /// Whether the text contains at least one match.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Compiles queries into matchers, reusing the last result when the query
/// and both options are unchanged.
#[derive(Debug, Default)]
pub struct PatternCompiler {
    /// Cached compiled matcher for the last successful query.
    cached: Option<(Query, CompiledMatcher)>,
}

impl PatternCompiler {
    /// Create a new compiler with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a query, or return a structured error for an invalid pattern.
    ///
    /// Never panics; literal (non-regex) queries always compile.
    pub fn compile(&mut self, query: &Query) -> Result<CompiledMatcher, CompilationError> {
        if let Some((cached_query, matcher)) = &self.cached
            && cached_query == query
        {
            log::trace!("Reusing cached matcher for {:?}", query.text);
            return Ok(matcher.clone());
        }

        let pattern = Self::build_pattern(query);
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!query.match_case)
            .build()
            .map_err(|e| {
                log::debug!("Invalid search pattern '{}': {}", query.text, e);
                CompilationError::from(e)
            })?;

        let matcher = CompiledMatcher { regex };
        self.cached = Some((query.clone(), matcher.clone()));
        Ok(matcher)
    }

    /// Produce the regex source for a query.
    ///
    /// Literal queries have every metacharacter escaped. Case-insensitive
    /// queries additionally fold Hiragana and Katakana into a character
    /// class so either script matches.
    pub fn build_pattern(query: &Query) -> String {
        let pattern = if query.use_regex {
            query.text.clone()
        } else {
            regex::escape(&query.text)
        };

        if query.match_case {
            pattern
        } else {
            fold_kana(&pattern)
        }
    }
}

/// Replace each kana with a class holding both its Hiragana and Katakana
/// forms, using the fixed 0x60 code point offset between the two blocks.
fn fold_kana(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 3);
    for c in pattern.chars() {
        let (hiragana, katakana) = if (HIRAGANA.0..=HIRAGANA.1).contains(&c) {
            (c, shift_kana(c, KANA_OFFSET as i64))
        } else if (KATAKANA.0..=KATAKANA.1).contains(&c) {
            (shift_kana(c, -(KANA_OFFSET as i64)), c)
        } else {
            out.push(c);
            continue;
        };
        out.push('[');
        out.push(hiragana);
        out.push(katakana);
        out.push(']');
    }
    out
}

fn shift_kana(c: char, offset: i64) -> char {
    u32::try_from(c as i64 + offset)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(c)
}
