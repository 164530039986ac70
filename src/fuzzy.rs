//! Fuzzy string scoring with a weighted edit distance.
//!
//! A score is `max_distance - distance`, so higher is better and anything at
//! or above zero is within tolerance.

use rphonetic::{Cologne, Encoder};
use serde::{Deserialize, Serialize};

/// How the two strings are compared before the edit distance is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyAlgorithm {
    /// Edit distance over the lower-cased strings.
    #[default]
    Levenshtein,
    /// Edit distance over the Kölner Phonetik codes of the lower-cased strings.
    ColognePhonetics,
}

/// Per-operation costs, applied when turning the heard text into the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditWeights {
    pub insertion: u32,
    pub deletion: u32,
    pub substitution: u32,
}

impl Default for EditWeights {
    fn default() -> Self {
        Self {
            insertion: 1,
            deletion: 1,
            substitution: 1,
        }
    }
}

impl EditWeights {
    pub fn new(insertion: u32, deletion: u32, substitution: u32) -> Self {
        Self {
            insertion,
            deletion,
            substitution,
        }
    }
}

/// Tolerance settings shared by fuzzy literals and best-of-candidates nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    pub algorithm: FuzzyAlgorithm,
    pub max_distance: u32,
    pub weights: EditWeights,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            algorithm: FuzzyAlgorithm::Levenshtein,
            max_distance: 3,
            weights: EditWeights::default(),
        }
    }
}

impl FuzzyConfig {
    /// Levenshtein with unit weights and the given tolerance.
    pub fn new(max_distance: u32) -> Self {
        Self {
            max_distance,
            ..Self::default()
        }
    }

    pub fn with_weights(mut self, insertion: u32, deletion: u32, substitution: u32) -> Self {
        self.weights = EditWeights::new(insertion, deletion, substitution);
        self
    }

    pub fn with_algorithm(mut self, algorithm: FuzzyAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// `max_distance` minus the weighted distance from `text` to `target`.
    pub fn score(&self, text: &str, target: &str) -> i64 {
        let (text, target) = (text.to_lowercase(), target.to_lowercase());
        let distance = match self.algorithm {
            FuzzyAlgorithm::Levenshtein => weighted_distance(&text, &target, self.weights),
            FuzzyAlgorithm::ColognePhonetics => {
                let cologne = Cologne;
                weighted_distance(&cologne.encode(&text), &cologne.encode(&target), self.weights)
            }
        };
        let distance = i64::try_from(distance).unwrap_or(i64::MAX);
        i64::from(self.max_distance).saturating_sub(distance)
    }

    /// Whether `text` is within tolerance of `target`.
    pub fn matches(&self, text: &str, target: &str) -> bool {
        self.score(text, target) >= 0
    }
}

/// Minimum cost of turning `from` into `to` by inserting, deleting and
/// substituting characters. Comparison is exact; callers fold case first.
/// Costs saturate at `u64::MAX`.
pub fn weighted_distance(from: &str, to: &str, weights: EditWeights) -> u64 {
    let from: Vec<char> = from.chars().collect();
    let to: Vec<char> = to.chars().collect();
    let (insertion, deletion, substitution) = (
        u64::from(weights.insertion),
        u64::from(weights.deletion),
        u64::from(weights.substitution),
    );

    // prev[j]: cost of turning from[..i-1] into to[..j]
    let mut prev: Vec<u64> = (0..=to.len() as u64).map(|j| j.saturating_mul(insertion)).collect();
    let mut curr = vec![0u64; to.len() + 1];

    for (i, &f) in from.iter().enumerate() {
        curr[0] = (i as u64 + 1).saturating_mul(deletion);
        for (j, &t) in to.iter().enumerate() {
            let substitute = prev[j].saturating_add(if f == t { 0 } else { substitution });
            let delete = prev[j + 1].saturating_add(deletion);
            let insert = curr[j].saturating_add(insertion);
            curr[j + 1] = substitute.min(delete).min(insert);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[to.len()]
}
