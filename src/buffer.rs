//! Word buffer and cursor registry.
//!
//! The buffer owns the tokens of a transcript and a registry of live cursors.
//! Cursors are handles into that registry rather than references into the
//! token storage, so the buffer is free to drop tokens that no cursor can
//! reach any more and rewrite every cursor position in place.

use itertools::Itertools;
use tracing::trace;

/// Split text on whitespace. Runs of whitespace collapse; nothing else is
/// normalised.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

/// A position handle into a [`WordBuffer`].
///
/// Deliberately neither `Clone` nor `Copy`: a second cursor at the same
/// position is made with [`WordBuffer::branch`], and a cursor is given back
/// with [`WordBuffer::release`], which consumes it.
///
/// A cursor is only meaningful to the buffer that issued it. Handing it to
/// another buffer reads or moves an unrelated slot there, or panics when
/// that buffer has no such slot.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Cursor(usize);

/// Tokens plus the positions of every live cursor.
#[derive(Debug, Default)]
pub struct WordBuffer {
    words: Vec<String>,
    /// Cursor slots. `None` marks a released slot available for reuse.
    cursors: Vec<Option<usize>>,
    /// Number of leading tokens compacted away so far.
    dropped: usize,
}

// Constructors
impl WordBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding the tokens of `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            words: tokenize(text),
            ..Self::default()
        }
    }
}

// Buffer contents
impl WordBuffer {
    /// Append the tokens of `text`. Live cursors keep their positions.
    pub fn push_text(&mut self, text: &str) {
        self.words.extend(tokenize(text));
    }

    /// Number of tokens still held.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Tokens still held, oldest first.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Total number of tokens dropped by compaction.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn live_cursors(&self) -> usize {
        self.cursors.iter().flatten().count()
    }
}

// Cursor lifecycle
impl WordBuffer {
    /// Issue a cursor at the first token still held.
    pub fn cursor_at_start(&mut self) -> Cursor {
        self.alloc(0)
    }

    /// Issue an independent cursor at the same position as `cursor`.
    pub fn branch(&mut self, cursor: &Cursor) -> Cursor {
        let position = self.position(cursor);
        self.alloc(position)
    }

    /// Detach `cursor` from the buffer and compact.
    pub fn release(&mut self, cursor: Cursor) {
        self.cursors[cursor.0] = None;
        self.compact();
    }

    /// Move `cursor` to wherever `target` currently is.
    pub fn reposition(&mut self, cursor: &Cursor, target: &Cursor) {
        let position = self.position(target);
        self.set_position(cursor, position);
        self.compact();
    }

    /// Run `work` with a temporary branch of `cursor`, releasing the branch
    /// afterwards whatever `work` returned.
    pub fn with_branch<R>(&mut self, cursor: &Cursor, work: impl FnOnce(&mut Self, &Cursor) -> R) -> R {
        let branch = self.branch(cursor);
        let result = work(self, &branch);
        self.release(branch);
        result
    }

    /// Current index of `cursor` into [`words`](Self::words).
    ///
    /// # Panics
    ///
    /// If `cursor` was issued by a different buffer.
    pub fn position(&self, cursor: &Cursor) -> usize {
        self.cursors[cursor.0].expect("cursor was issued by another buffer")
    }

    fn set_position(&mut self, cursor: &Cursor, position: usize) {
        self.cursors[cursor.0] = Some(position);
    }

    fn alloc(&mut self, position: usize) -> Cursor {
        match self.cursors.iter().position(Option::is_none) {
            Some(slot) => {
                self.cursors[slot] = Some(position);
                Cursor(slot)
            }
            None => {
                self.cursors.push(Some(position));
                Cursor(self.cursors.len() - 1)
            }
        }
    }
}

// Reading
impl WordBuffer {
    /// Read up to `count` tokens at `cursor` and advance past them.
    ///
    /// Fewer tokens are returned when the buffer runs out; that is not an
    /// error.
    pub fn read_words(&mut self, cursor: &Cursor, count: usize) -> Vec<String> {
        let start = self.position(cursor);
        let end = start.saturating_add(count).min(self.words.len());
        let words = self.words[start..end].to_vec();
        self.set_position(cursor, end);
        self.compact();
        words
    }

    /// Like [`read_words`](Self::read_words), joined with single spaces.
    pub fn read(&mut self, cursor: &Cursor, count: usize) -> String {
        self.read_words(cursor, count).join(" ")
    }

    /// The tokens between two cursors, in either order, joined with spaces.
    pub fn peek_span(&self, a: &Cursor, b: &Cursor) -> String {
        let (a, b) = (self.position(a), self.position(b));
        let (from, to) = if a <= b { (a, b) } else { (b, a) };
        self.words[from..to].iter().join(" ")
    }

    /// How many tokens starting at `cursor` are needed to cover at least
    /// `chars` characters, counting one separator between adjacent tokens.
    /// Stops early at the end of the buffer.
    pub fn words_for_min_chars(&self, cursor: &Cursor, chars: usize) -> usize {
        let start = self.position(cursor);
        let mut count = 0;
        let mut covered = 0;
        while covered + count <= chars && start + count < self.words.len() {
            covered += self.words[start + count].chars().count();
            count += 1;
        }
        count
    }

    /// Read as many tokens as [`words_for_min_chars`](Self::words_for_min_chars)
    /// estimates.
    pub fn read_min_chars(&mut self, cursor: &Cursor, chars: usize) -> String {
        let count = self.words_for_min_chars(cursor, chars);
        self.read(cursor, count)
    }
}

// Compaction
impl WordBuffer {
    /// Drop the prefix no live cursor can reach and rebase every cursor.
    ///
    /// With no live cursors nothing is dropped, so a later
    /// [`cursor_at_start`](Self::cursor_at_start) still sees the oldest
    /// retained token.
    fn compact(&mut self) {
        let Some(min) = self.cursors.iter().flatten().min().copied() else {
            return;
        };
        if min == 0 {
            return;
        }
        self.words.drain(..min);
        for pos in self.cursors.iter_mut().flatten() {
            *pos -= min;
        }
        self.dropped += min;
        trace!(dropped = min, retained = self.words.len(), "compacted word buffer");
    }
}
