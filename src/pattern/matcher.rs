//! Pattern matcher: evaluate a [`Pattern`] tree against a [`WordBuffer`].
//!
//! Every evaluator takes the cursor it should match at and either succeeds,
//! leaving the cursor just past the consumed tokens, or fails and leaves it
//! where it was. Trial work always happens on a branch of the cursor, and
//! every branch is released before the evaluator returns.

use tracing::{debug, trace};

use crate::buffer::{Cursor, WordBuffer};
use crate::match_map::MatchMap;

use super::ast::*;

// ─── Public API ─────────────────────────────────────────────────────────────

/// Tokenize `text` and match `pattern` from its first token.
///
/// Returns the recorded values when the root matched. A failed attempt
/// returns `None` and nothing recorded along the way is kept.
pub fn pattern_match(pattern: &Pattern, text: &str) -> Option<MatchMap> {
    let mut buffer = WordBuffer::from_text(text);
    let cursor = buffer.cursor_at_start();
    let result = match_from(pattern, &mut buffer, &cursor);
    buffer.release(cursor);
    result
}

/// Match `pattern` at `cursor` in an existing buffer.
///
/// On success `cursor` is advanced past the match; on failure it is left in
/// place. `cursor` must have been issued by `buffer`.
///
/// # Panics
///
/// If `cursor` belongs to another buffer and has no slot in this one.
pub fn match_from(pattern: &Pattern, buffer: &mut WordBuffer, cursor: &Cursor) -> Option<MatchMap> {
    let mut matches = MatchMap::new();
    if match_node(pattern, buffer, cursor, &mut matches) {
        debug!(name = ?pattern.name, recorded = matches.len(), "pattern matched");
        Some(matches)
    } else {
        debug!(name = ?pattern.name, "pattern did not match");
        None
    }
}

/// Evaluate one node at `cursor`, recording into `matches`.
pub fn match_node(pattern: &Pattern, buffer: &mut WordBuffer, cursor: &Cursor, matches: &mut MatchMap) -> bool {
    let matched = match &pattern.kind {
        PatternKind::Literal(literal) => match_literal(pattern, literal, buffer, cursor, matches),
        PatternKind::Sequence(children) => match_sequence(pattern, children, buffer, cursor, matches),
        PatternKind::Alternation(children) => match_alternation(pattern, children, buffer, cursor, matches),
        PatternKind::BestOf(best) => match_best_of(pattern, best, buffer, cursor, matches),
    };
    trace!(name = ?pattern.name, at = buffer.position(cursor), matched, "evaluated node");
    matched
}

// ─── Windows ────────────────────────────────────────────────────────────────

/// Text of the next `size` tokens at `cursor`, without moving it.
///
/// `None` when no token is left to read; a shorter window is returned when
/// only some are.
fn window_text(buffer: &mut WordBuffer, cursor: &Cursor, size: usize) -> Option<String> {
    let words = buffer.with_branch(cursor, |buffer, branch| buffer.read_words(branch, size));
    if words.is_empty() {
        return None;
    }
    Some(words.join(" "))
}

// ─── Node evaluation ────────────────────────────────────────────────────────

/// Smallest window that passes the literal's test wins; larger windows are
/// not tried once one has matched.
fn match_literal(
    pattern: &Pattern,
    literal: &Literal,
    buffer: &mut WordBuffer,
    cursor: &Cursor,
    matches: &mut MatchMap,
) -> bool {
    let found = WindowRange::sizes(literal.window).find_map(|size| {
        let text = window_text(buffer, cursor, size)?;
        literal.check(&text).map(|value| (value, size))
    });
    let Some((value, size)) = found else {
        return false;
    };
    buffer.read_words(cursor, size);
    if let Some(name) = pattern.record_key() {
        matches.record(name, value);
    }
    true
}

/// All children in order on a branch; the caller's cursor only moves when
/// every child matched.
fn match_sequence(
    pattern: &Pattern,
    children: &[Pattern],
    buffer: &mut WordBuffer,
    cursor: &Cursor,
    matches: &mut MatchMap,
) -> bool {
    let branch = buffer.branch(cursor);
    for child in children {
        if !match_node(child, buffer, &branch, matches) {
            buffer.release(branch);
            return false;
        }
    }
    if let Some(name) = pattern.record_key() {
        matches.record(name, buffer.peek_span(cursor, &branch));
    }
    buffer.reposition(cursor, &branch);
    buffer.release(branch);
    true
}

/// First child that matches wins. Scores are never compared across children.
fn match_alternation(
    pattern: &Pattern,
    children: &[Pattern],
    buffer: &mut WordBuffer,
    cursor: &Cursor,
    matches: &mut MatchMap,
) -> bool {
    for child in children {
        let branch = buffer.branch(cursor);
        if match_node(child, buffer, &branch, matches) {
            if let Some(name) = pattern.record_key() {
                matches.record(name, buffer.peek_span(cursor, &branch));
            }
            buffer.reposition(cursor, &branch);
            buffer.release(branch);
            return true;
        }
        buffer.release(branch);
    }
    false
}

/// Best (candidate, window size) pair over the whole cross product.
///
/// Candidates are tried in list order and window sizes in increasing order
/// within each candidate; a pair only replaces the current best when it
/// scores strictly higher, so ties go to the earlier pair.
fn match_best_of(
    pattern: &Pattern,
    best_of: &BestOf,
    buffer: &mut WordBuffer,
    cursor: &Cursor,
    matches: &mut MatchMap,
) -> bool {
    let windows: Vec<(usize, String)> = WindowRange::sizes(best_of.window)
        .filter_map(|size| window_text(buffer, cursor, size).map(|text| (size, text)))
        .collect();

    let mut best: Option<(i64, &str, usize)> = None;
    for candidate in &best_of.candidates {
        for (size, text) in &windows {
            let score = best_of.fuzzy.score(text, candidate);
            trace!(candidate = candidate.as_str(), window = text.as_str(), score, "scored candidate");
            if score < best_of.min_score {
                continue;
            }
            if best.is_none_or(|(top, _, _)| score > top) {
                best = Some((score, candidate.as_str(), *size));
            }
        }
    }

    let Some((score, candidate, size)) = best else {
        return false;
    };
    debug!(name = ?pattern.name, candidate, size, score, "picked closest candidate");
    let text = buffer.read(cursor, size);
    if let Some(name) = pattern.record_key() {
        let value = if best_of.record_text { text } else { candidate.to_owned() };
        matches.record(name, value);
    }
    true
}
