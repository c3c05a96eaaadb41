//! Failure message assembly.
//!
//! Messages have a one-line headline followed by `name: value` detail lines
//! and finally the validator's context entries:
//!
//! ```text
//! age must be greater than 10.
//! actual: 5
//! request_id: "r-17"
//! ```

use std::fmt::Write as _;

use super::state::ValidatorCore;

/// Values whose rendered form is at least this long get a diff hint.
pub(crate) const DIFF_THRESHOLD: usize = 32;

/// Builds the message of one failure.
#[derive(Debug)]
pub struct MessageBuilder<'a> {
    core: &'a ValidatorCore,
    headline: String,
    details: Vec<(String, String)>,
}

impl<'a> MessageBuilder<'a> {
    pub(crate) fn new(core: &'a ValidatorCore, headline: impl Into<String>) -> Self {
        Self {
            core,
            headline: headline.into(),
            details: Vec::new(),
        }
    }

    /// Adds a `name: value` line.
    #[must_use = "builder methods must be chained or built"]
    pub fn detail(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.push((name.into(), value.into()));
        self
    }

    /// Adds a line describing where `actual` starts to differ from `expected`
    /// if the configuration asks for diffs and either value is long or spans
    /// several lines.
    #[must_use = "builder methods must be chained or built"]
    pub fn diff(self, actual: &str, expected: &str) -> Self {
        if !self.core.configuration().include_diff() || !needs_diff(actual, expected) {
            return self;
        }
        match first_difference(actual, expected) {
            Some(index) => self.detail("diff", format!("values differ starting at character {index}")),
            None => self,
        }
    }

    pub fn build(self) -> String {
        let mut message = self.headline;
        for (name, value) in &self.details {
            let _ = write!(message, "\n{name}: {value}");
        }
        for (name, value) in self.core.context() {
            let _ = write!(message, "\n{name}: {value}");
        }
        message
    }
}

fn needs_diff(actual: &str, expected: &str) -> bool {
    actual.len() >= DIFF_THRESHOLD
        || expected.len() >= DIFF_THRESHOLD
        || actual.contains('\n')
        || expected.contains('\n')
}

/// Returns the index of the first character at which the strings differ.
fn first_difference(actual: &str, expected: &str) -> Option<usize> {
    let mut expected_chars = expected.chars();
    for (index, a) in actual.chars().enumerate() {
        match expected_chars.next() {
            Some(e) if e == a => {}
            _ => return Some(index),
        }
    }
    expected_chars.next().map(|_| actual.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference("abc", "abc"), None);
        assert_eq!(first_difference("abc", "abd"), Some(2));
        assert_eq!(first_difference("ab", "abc"), Some(2));
        assert_eq!(first_difference("abc", "ab"), Some(2));
        assert_eq!(first_difference("", "x"), Some(0));
    }

    #[test]
    fn test_needs_diff() {
        assert!(!needs_diff("short", "other"));
        assert!(needs_diff("line\nbreak", "x"));
        assert!(needs_diff(&"a".repeat(DIFF_THRESHOLD), "b"));
    }
}
