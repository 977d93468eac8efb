//! Occurrence counting and top-k ranking.

use num_bigint::BigUint;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A ranked value and how many times it occurs in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequentValue {
    #[serde(serialize_with = "serialize_decimal")]
    pub value: BigUint,
    pub count: u64,
}

/// Occurrence count per distinct corpus value.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<BigUint, u64>,
}

impl FrequencyTable {
    /// Count every value of `corpus`.
    ///
    /// Each rayon task counts its own partition into a private map; the
    /// partial maps are merged pairwise once all partitions are done.
    pub fn build(corpus: &[BigUint]) -> Self {
        let counts = corpus
            .par_iter()
            .fold(HashMap::new, |mut local, value| {
                *local.entry(value).or_insert(0u64) += 1;
                local
            })
            .reduce(HashMap::new, merge_counts);

        FrequencyTable {
            counts: counts
                .into_iter()
                .map(|(value, count)| (value.clone(), count))
                .collect(),
        }
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, equal to the corpus length.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn count_of(&self, value: &BigUint) -> u64 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// The `k` most frequent values, by count descending and then by value
    /// ascending.
    ///
    /// When fewer than `k` distinct values exist, every value is returned and
    /// the result is shorter than `k`.
    pub fn top(&self, k: usize) -> Vec<FrequentValue> {
        if k == 0 {
            return Vec::new();
        }
        let mut entries: Vec<(&BigUint, u64)> =
            self.counts.iter().map(|(value, &count)| (value, count)).collect();
        if k < entries.len() {
            entries.select_nth_unstable_by(k - 1, rank_order);
            entries.truncate(k);
        }
        entries.sort_unstable_by(rank_order);

        entries
            .into_iter()
            .map(|(value, count)| FrequentValue {
                value: value.clone(),
                count,
            })
            .collect()
    }
}

/// Count the corpus and return its `k` most frequent values.
pub fn rank(corpus: &[BigUint], k: usize) -> Vec<FrequentValue> {
    FrequencyTable::build(corpus).top(k)
}

/// Higher counts first; equal counts fall back to the smaller value.
fn rank_order(a: &(&BigUint, u64), b: &(&BigUint, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Fold the smaller map into the larger one.
fn merge_counts<'a>(
    mut left: HashMap<&'a BigUint, u64>,
    mut right: HashMap<&'a BigUint, u64>,
) -> HashMap<&'a BigUint, u64> {
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }
    for (value, count) in right {
        *left.entry(value).or_insert(0) += count;
    }
    left
}

fn serialize_decimal<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(values: &[u64]) -> Vec<BigUint> {
        values.iter().map(|&v| BigUint::from(v)).collect()
    }

    fn pairs(ranked: &[FrequentValue]) -> Vec<(u64, u64)> {
        ranked
            .iter()
            .map(|f| (u64::try_from(&f.value).unwrap(), f.count))
            .collect()
    }

    #[test]
    fn test_rank_basic() {
        let c = corpus(&[5, 5, 5, 3, 3, 2, 9]);
        let table = FrequencyTable::build(&c);
        assert_eq!(table.total(), 7);
        assert_eq!(table.len(), 4);
        assert_eq!(pairs(&table.top(3)), vec![(5, 3), (3, 2), (2, 1)]);
    }

    #[test]
    fn test_short_result() {
        let c = corpus(&[5, 5, 5, 3, 3, 2, 9]);
        let ranked = rank(&c, 10);
        assert_eq!(ranked.len(), 4);
        assert_eq!(pairs(&ranked), vec![(5, 3), (3, 2), (2, 1), (9, 1)]);
    }

    #[test]
    fn test_ties_break_by_value() {
        let c = corpus(&[40, 7, 40, 7, 1000, 3, 1000, 12, 12]);
        assert_eq!(pairs(&rank(&c, 3)), vec![(7, 2), (12, 2), (40, 2)]);
    }

    #[test]
    fn test_counts_non_increasing() {
        let c: Vec<BigUint> = (0..5_000u64).map(|i| BigUint::from(i % 37 + i % 5)).collect();
        let ranked = rank(&c, 10);
        assert_eq!(ranked.len(), 10);
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_zero_k_and_empty_corpus() {
        let c = corpus(&[1, 1, 2]);
        assert!(rank(&c, 0).is_empty());

        let table = FrequencyTable::build(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert!(table.top(10).is_empty());
    }

    #[test]
    fn test_count_of() {
        let c = corpus(&[8, 8, 1]);
        let table = FrequencyTable::build(&c);
        assert_eq!(table.count_of(&BigUint::from(8u32)), 2);
        assert_eq!(table.count_of(&BigUint::from(4u32)), 0);
    }

    #[test]
    fn test_serializes_value_as_decimal() {
        let entry = FrequentValue {
            value: BigUint::from(u64::MAX) * 10u32,
            count: 3,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"value":"184467440737095516150","count":3}"#);
    }
}
