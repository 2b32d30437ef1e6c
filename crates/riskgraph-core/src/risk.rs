//! Risk vectors: severity-bucketed counts with a rank order

use crate::RiskVectorError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Count of occurrences per severity level, together with the numeric rank of
/// each level. Both maps always have the same key set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRiskVector")]
pub struct RiskVector {
    counts: BTreeMap<String, u64>,
    ranks: BTreeMap<String, i64>,
}

#[derive(Deserialize)]
struct RawRiskVector {
    counts: BTreeMap<String, u64>,
    ranks: BTreeMap<String, i64>,
}

impl TryFrom<RawRiskVector> for RiskVector {
    type Error = RiskVectorError;

    fn try_from(raw: RawRiskVector) -> Result<Self, Self::Error> {
        RiskVector::new(raw.counts, raw.ranks)
    }
}

impl RiskVector {
    /// Build a vector from level counts and level ranks.
    ///
    /// Fails with [`RiskVectorError::KeyMismatch`] unless every counted level has
    /// a rank and every ranked level has a count.
    pub fn new<C, R, K, L>(counts: C, ranks: R) -> Result<Self, RiskVectorError>
    where
        C: IntoIterator<Item = (K, u64)>,
        R: IntoIterator<Item = (L, i64)>,
        K: ToString,
        L: ToString,
    {
        let counts: BTreeMap<String, u64> = counts
            .into_iter()
            .map(|(level, count)| (level.to_string(), count))
            .collect();
        let ranks: BTreeMap<String, i64> = ranks
            .into_iter()
            .map(|(level, rank)| (level.to_string(), rank))
            .collect();

        let missing_ranks: Vec<String> = counts
            .keys()
            .filter(|level| !ranks.contains_key(*level))
            .cloned()
            .collect();
        let missing_counts: Vec<String> = ranks
            .keys()
            .filter(|level| !counts.contains_key(*level))
            .cloned()
            .collect();
        if !missing_ranks.is_empty() || !missing_counts.is_empty() {
            return Err(RiskVectorError::KeyMismatch {
                missing_ranks,
                missing_counts,
            });
        }

        Ok(Self { counts, ranks })
    }

    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    pub fn ranks(&self) -> &BTreeMap<String, i64> {
        &self.ranks
    }

    /// Count for `level`, zero when the level is not present
    pub fn count(&self, level: &str) -> u64 {
        self.counts.get(level).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Levels ordered from the highest rank to the lowest
    pub fn sorted_levels(&self) -> Vec<(&str, i64)> {
        let mut levels: Vec<(&str, i64)> = self
            .ranks
            .iter()
            .map(|(level, rank)| (level.as_str(), *rank))
            .collect();
        levels.sort_by(|a, b| b.1.cmp(&a.1));
        levels
    }

    /// Highest-ranked level of the vector.
    ///
    /// This is the top of the rank order whether or not that level has any
    /// occurrences; `None` only for an empty vector.
    pub fn overall_level(&self) -> Option<&str> {
        self.sorted_levels().first().map(|(level, _)| *level)
    }

    /// True at the first level, scanning from the least severe, where this
    /// vector has more occurrences than `other`
    pub fn greater_than(&self, other: &RiskVector) -> bool {
        self.scan(other, |mine, theirs| mine > theirs)
    }

    /// True at the first level, scanning from the least severe, where this
    /// vector has fewer occurrences than `other`
    pub fn less_than(&self, other: &RiskVector) -> bool {
        self.scan(other, |mine, theirs| mine < theirs)
    }

    fn scan<F>(&self, other: &RiskVector, decides: F) -> bool
    where
        F: Fn(u64, u64) -> bool,
    {
        self.merged_levels(other)
            .into_iter()
            .any(|(level, _)| decides(self.count(&level), other.count(&level)))
    }

    /// Union of both rank maps sorted by ascending rank; `other` wins on
    /// conflicting ranks
    fn merged_levels(&self, other: &RiskVector) -> Vec<(String, i64)> {
        let mut merged = self.ranks.clone();
        for (level, rank) in &other.ranks {
            if let Some(previous) = merged.insert(level.clone(), *rank) {
                if previous != *rank {
                    tracing::warn!(
                        level = %level,
                        left = previous,
                        right = *rank,
                        "risk vectors disagree on the rank of a level"
                    );
                }
            }
        }
        let mut levels: Vec<(String, i64)> = merged.into_iter().collect();
        levels.sort_by_key(|(_, rank)| *rank);
        levels
    }

    /// Level names of this vector
    pub fn levels(&self) -> BTreeSet<&str> {
        self.ranks.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Display for RiskVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .sorted_levels()
            .into_iter()
            .map(|(level, _)| format!("{}: {}", level, self.count(level)))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}
