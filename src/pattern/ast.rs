//! Validated, immutable pattern trees.
//!
//! Trees are only produced by [`PatternSpec::build`](super::PatternSpec::build),
//! which rejects malformed configuration, so every tree reaching the matcher
//! is well-formed.

use std::ops::RangeInclusive;

use regex::Regex;

use crate::fuzzy::FuzzyConfig;

/// Default floor for [`BestOf::min_score`]: a little tolerance below
/// `distance == max_distance`.
pub const DEFAULT_MIN_SCORE: i64 = -15;

/// One node of a pattern tree.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub name: Option<String>,
    /// Grouping nodes that should not produce an entry of their own.
    pub skip_recording: bool,
    pub kind: PatternKind,
}

impl Pattern {
    /// The key this node records under, if it records at all.
    pub fn record_key(&self) -> Option<&str> {
        if self.skip_recording {
            return None;
        }
        self.name.as_deref()
    }
}

#[derive(Debug, Clone)]
pub enum PatternKind {
    Literal(Literal),
    /// All children, contiguously and in order.
    Sequence(Vec<Pattern>),
    /// The first child that matches.
    Alternation(Vec<Pattern>),
    BestOf(BestOf),
}

/// Inclusive range of window sizes, in tokens. `from <= to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRange {
    from: usize,
    to: usize,
}

impl WindowRange {
    /// `None` when `from > to`.
    pub fn new(from: usize, to: usize) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    pub fn smallest(&self) -> usize {
        self.from
    }

    pub fn largest(&self) -> usize {
        self.to
    }

    /// Window sizes to try, smallest first. No range means a single
    /// one-token window.
    pub fn sizes(range: Option<WindowRange>) -> RangeInclusive<usize> {
        match range {
            Some(r) => r.from..=r.to,
            None => 1..=1,
        }
    }
}

/// The test a literal applies to each window.
#[derive(Debug, Clone)]
pub enum LiteralTest {
    /// Case-insensitive equality.
    Exact(String),
    Fuzzy { text: String, config: FuzzyConfig },
    /// Anchored at both ends, so the whole window must match.
    Regex(Regex),
}

#[derive(Debug, Clone)]
pub struct Literal {
    pub test: LiteralTest,
    pub window: Option<WindowRange>,
}

impl Literal {
    /// The value to record if `window` passes the test.
    pub fn check(&self, window: &str) -> Option<String> {
        match &self.test {
            LiteralTest::Exact(text) => (text.to_lowercase() == window.to_lowercase()).then(|| text.clone()),
            LiteralTest::Fuzzy { text, config } => config.matches(window, text).then(|| text.clone()),
            LiteralTest::Regex(re) => re.is_match(window).then(|| window.to_owned()),
        }
    }
}

/// Pick the closest of several candidate strings.
#[derive(Debug, Clone)]
pub struct BestOf {
    pub candidates: Vec<String>,
    pub fuzzy: FuzzyConfig,
    pub window: Option<WindowRange>,
    /// Lowest score still accepted. May be below zero.
    pub min_score: i64,
    /// Record the consumed text instead of the winning candidate.
    pub record_text: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_range_rejects_inverted() {
        assert!(WindowRange::new(3, 2).is_none());
        let r = WindowRange::new(2, 2).unwrap();
        assert_eq!((r.smallest(), r.largest()), (2, 2));
    }

    #[test]
    fn test_window_sizes() {
        assert_eq!(WindowRange::sizes(None).collect::<Vec<_>>(), vec![1]);
        assert_eq!(WindowRange::sizes(WindowRange::new(1, 3)).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_literal_exact_is_case_insensitive() {
        let literal = Literal {
            test: LiteralTest::Exact("Piens".into()),
            window: None,
        };
        assert_eq!(literal.check("PIENS").as_deref(), Some("Piens"));
        assert_eq!(literal.check("piena"), None);
    }

    #[test]
    fn test_literal_regex_records_window() {
        let literal = Literal {
            test: LiteralTest::Regex(Regex::new(r"^(?:\d+)$").unwrap()),
            window: None,
        };
        assert_eq!(literal.check("12").as_deref(), Some("12"));
        assert_eq!(literal.check("12a"), None);
    }
}
