//! Pattern descriptions as written in configuration, and their validation
//! into [`Pattern`] trees.
//!
//! A [`PatternSpec`] can be deserialised from JSON or assembled in code:
//!
//! ```rust
//! use wordmatch::{FuzzyConfig, LiteralSpec, PatternSpec};
//!
//! let spec = PatternSpec::sequence(vec![
//!     LiteralSpec::text("bojāts produkts")
//!         .fuzzy(FuzzyConfig::new(3))
//!         .window(2, 3)
//!         .named("keyword")
//!         .into(),
//!     LiteralSpec::regex(r"\d+").named("amount").into(),
//! ]);
//! let pattern = spec.build().unwrap();
//! assert_eq!(wordmatch::pattern_match(&pattern, "bojats produkts 12").unwrap().get("amount"), Some("12"));
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fuzzy::FuzzyConfig;

use super::ast::*;

/// A malformed pattern description. The tree must not be used.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("literal {node} sets both text and regex")]
    TextAndRegex { node: String },
    #[error("literal {node} combines fuzzy matching with a regex")]
    FuzzyRegex { node: String },
    #[error("literal {node} sets neither text nor regex")]
    EmptyLiteral { node: String },
    #[error("window range of {node} is inverted: from {from} > to {to}")]
    InvertedWindow { node: String, from: usize, to: usize },
    #[error("window range of {node} starts at zero tokens")]
    EmptyWindow { node: String },
    #[error("invalid regex in {node}")]
    InvalidRegex {
        node: String,
        #[source]
        source: regex::Error,
    },
    #[error("best-of {node} has no candidates")]
    NoCandidates { node: String },
}

fn label(name: &Option<String>) -> String {
    match name {
        Some(name) => format!("'{name}'"),
        None => "<unnamed>".to_owned(),
    }
}

/// Name and recording flag shared by every node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skip_recording: bool,
}

macro_rules! node_meta_setters {
    ($($ty:ty),*) => {$(
        impl $ty {
            /// Record matches of this node under `name`.
            pub fn named(mut self, name: impl Into<String>) -> Self {
                self.meta.name = Some(name.into());
                self
            }

            /// Keep the name for structure but never record this node itself.
            pub fn skip_recording(mut self) -> Self {
                self.meta.skip_recording = true;
                self
            }
        }
    )*};
}

node_meta_setters!(LiteralSpec, GroupSpec, BestOfSpec);

/// Unvalidated pattern tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternSpec {
    Literal(LiteralSpec),
    Sequence(GroupSpec),
    Alternation(GroupSpec),
    BestOf(BestOfSpec),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiteralSpec {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub text: Option<String>,
    pub regex: Option<String>,
    pub fuzzy: Option<FuzzyConfig>,
    /// Inclusive `[from, to]` window sizes in tokens.
    pub window: Option<(usize, usize)>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupSpec {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub patterns: Vec<PatternSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BestOfSpec {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub candidates: Vec<String>,
    pub fuzzy: FuzzyConfig,
    pub window: Option<(usize, usize)>,
    pub min_score: i64,
    pub record_text: bool,
}

impl Default for BestOfSpec {
    fn default() -> Self {
        Self {
            meta: NodeMeta::default(),
            candidates: Vec::new(),
            fuzzy: FuzzyConfig::default(),
            window: None,
            min_score: DEFAULT_MIN_SCORE,
            record_text: false,
        }
    }
}

impl From<LiteralSpec> for PatternSpec {
    fn from(spec: LiteralSpec) -> Self {
        Self::Literal(spec)
    }
}

impl From<BestOfSpec> for PatternSpec {
    fn from(spec: BestOfSpec) -> Self {
        Self::BestOf(spec)
    }
}

impl LiteralSpec {
    /// Case-insensitive match against `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// The whole window must match `regex`.
    pub fn regex(regex: impl Into<String>) -> Self {
        Self {
            regex: Some(regex.into()),
            ..Self::default()
        }
    }

    pub fn fuzzy(mut self, config: FuzzyConfig) -> Self {
        self.fuzzy = Some(config);
        self
    }

    pub fn window(mut self, from: usize, to: usize) -> Self {
        self.window = Some((from, to));
        self
    }

    fn build(self) -> Result<Pattern, PatternError> {
        let node = label(&self.meta.name);
        let window = build_window(&node, self.window)?;
        let test = match (self.text, self.regex, self.fuzzy) {
            (Some(_), Some(_), _) => return Err(PatternError::TextAndRegex { node }),
            (None, Some(_), Some(_)) => return Err(PatternError::FuzzyRegex { node }),
            (None, None, _) => return Err(PatternError::EmptyLiteral { node }),
            (Some(text), None, None) => LiteralTest::Exact(text),
            (Some(text), None, Some(config)) => LiteralTest::Fuzzy { text, config },
            (None, Some(regex), None) => {
                // Validate as written, then anchor so only whole windows match
                let anchored = Regex::new(&regex)
                    .and_then(|_| Regex::new(&format!("^(?:{regex})$")))
                    .map_err(|source| PatternError::InvalidRegex { node, source })?;
                LiteralTest::Regex(anchored)
            }
        };
        Ok(Pattern {
            name: self.meta.name,
            skip_recording: self.meta.skip_recording,
            kind: PatternKind::Literal(Literal { test, window }),
        })
    }
}

impl GroupSpec {
    pub fn new(patterns: Vec<PatternSpec>) -> Self {
        Self {
            meta: NodeMeta::default(),
            patterns,
        }
    }
}

impl BestOfSpec {
    pub fn new<S: Into<String>>(candidates: impl IntoIterator<Item = S>, fuzzy: FuzzyConfig) -> Self {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            fuzzy,
            ..Self::default()
        }
    }

    pub fn window(mut self, from: usize, to: usize) -> Self {
        self.window = Some((from, to));
        self
    }

    pub fn min_score(mut self, min_score: i64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Record the consumed text rather than the winning candidate.
    pub fn record_text(mut self) -> Self {
        self.record_text = true;
        self
    }

    fn build(self) -> Result<Pattern, PatternError> {
        let node = label(&self.meta.name);
        let window = build_window(&node, self.window)?;
        if self.candidates.is_empty() {
            return Err(PatternError::NoCandidates { node });
        }
        Ok(Pattern {
            name: self.meta.name,
            skip_recording: self.meta.skip_recording,
            kind: PatternKind::BestOf(BestOf {
                candidates: self.candidates,
                fuzzy: self.fuzzy,
                window,
                min_score: self.min_score,
                record_text: self.record_text,
            }),
        })
    }
}

fn build_window(node: &str, window: Option<(usize, usize)>) -> Result<Option<WindowRange>, PatternError> {
    window
        .map(|(from, to)| {
            if from == 0 {
                return Err(PatternError::EmptyWindow { node: node.to_owned() });
            }
            WindowRange::new(from, to).ok_or_else(|| PatternError::InvertedWindow {
                node: node.to_owned(),
                from,
                to,
            })
        })
        .transpose()
}

fn build_all(patterns: Vec<PatternSpec>) -> Result<Vec<Pattern>, PatternError> {
    patterns.into_iter().map(PatternSpec::build).collect()
}

impl PatternSpec {
    pub fn sequence(patterns: Vec<PatternSpec>) -> Self {
        Self::Sequence(GroupSpec::new(patterns))
    }

    pub fn alternation(patterns: Vec<PatternSpec>) -> Self {
        Self::Alternation(GroupSpec::new(patterns))
    }

    /// Record matches of this node under `name`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.meta_mut().name = Some(name.into());
        self
    }

    pub fn skip_recording(mut self) -> Self {
        self.meta_mut().skip_recording = true;
        self
    }

    pub fn meta(&self) -> &NodeMeta {
        match self {
            Self::Literal(spec) => &spec.meta,
            Self::Sequence(spec) | Self::Alternation(spec) => &spec.meta,
            Self::BestOf(spec) => &spec.meta,
        }
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        match self {
            Self::Literal(spec) => &mut spec.meta,
            Self::Sequence(spec) | Self::Alternation(spec) => &mut spec.meta,
            Self::BestOf(spec) => &mut spec.meta,
        }
    }

    /// Validate the whole tree.
    ///
    /// Unnamed direct children of a named alternation take the
    /// alternation's name, so whichever branch wins records under it.
    pub fn build(self) -> Result<Pattern, PatternError> {
        match self {
            Self::Literal(spec) => spec.build(),
            Self::BestOf(spec) => spec.build(),
            Self::Sequence(group) => Ok(Pattern {
                kind: PatternKind::Sequence(build_all(group.patterns)?),
                name: group.meta.name,
                skip_recording: group.meta.skip_recording,
            }),
            Self::Alternation(mut group) => {
                if let Some(name) = &group.meta.name {
                    for child in &mut group.patterns {
                        let meta = child.meta_mut();
                        if meta.name.is_none() {
                            meta.name = Some(name.clone());
                        }
                    }
                }
                Ok(Pattern {
                    kind: PatternKind::Alternation(build_all(group.patterns)?),
                    name: group.meta.name,
                    skip_recording: group.meta.skip_recording,
                })
            }
        }
    }
}
