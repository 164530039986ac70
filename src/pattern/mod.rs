//! Fuzzy word-pattern engine.
//!
//! A pattern tree is matched against whitespace-separated tokens. Leaves
//! consume a window of one or more tokens; combinators arrange leaves.
//!
//! | Node            | Matches                                               |
//! |-----------------|-------------------------------------------------------|
//! | `literal`       | Text (exact or fuzzy, case-insensitive) or a regex    |
//! | `sequence`      | Every child, contiguously and in order                |
//! | `alternation`   | The first child that matches                          |
//! | `best_of`       | The closest candidate over every window size in range |
//!
//! Leaves with a `window` of `[from, to]` try each window size from `from`
//! to `to`; without one they look at a single token.

pub mod ast;
pub mod matcher;
pub mod spec;

pub use ast::{BestOf, DEFAULT_MIN_SCORE, Literal, LiteralTest, Pattern, PatternKind, WindowRange};
pub use matcher::{match_from, match_node, pattern_match};
pub use spec::{BestOfSpec, GroupSpec, LiteralSpec, NodeMeta, PatternError, PatternSpec};
