// Leave-one-out contrast: the scoring idea shared by the corpus, document
// and cluster strategies.
//
//   score(item, group) = d(item, group) - mean(d(item, g) for g in others)
//
// A word close to every group scores near zero; a word close to one group
// and far from the rest scores strongly negative for that group. With no
// other groups the mean is taken as 0 and the score is the raw distance.

use std::collections::HashMap;

use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::embedding::vector::cosine_distance;

/// Source of item-to-group distances.
pub trait DistanceSource {
    /// Distance between `item` and `group`, or `None` if the pair was never
    /// computed.
    fn distance(&self, item: usize, group: usize) -> Option<f64>;
}

/// Every item against every group, stored row-major by item.
#[derive(Debug, Clone)]
pub struct DenseDistances {
    rows: Vec<Vec<f64>>,
}

impl DenseDistances {
    /// Wrap one row of group distances per item.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Cosine distance of every item vector to every group vector.
    ///
    /// Rows are independent, so they are computed in parallel.
    pub fn cosine(items: &[Vec<f64>], groups: &[Vec<f64>]) -> Self {
        let rows = items
            .par_iter()
            .map(|item| groups.iter().map(|g| cosine_distance(item, g)).collect())
            .collect();
        Self { rows }
    }

    pub fn n_items(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, item: usize) -> &[f64] {
        &self.rows[item]
    }

    /// Contrast of every item against every group, each group's baseline
    /// being all the other groups. Indexed `[item][group]`.
    pub fn contrast_all(&self) -> Vec<Vec<f64>> {
        self.rows.par_iter().map(|row| contrast_row(row)).collect()
    }
}

/// Leave-one-out contrast for one full row of group distances.
///
/// Equal to calling `contrast` for each group with every other group as the
/// baseline, but reuses the row sum so a row costs O(groups).
pub fn contrast_row(row: &[f64]) -> Vec<f64> {
    let n = row.len();
    if n <= 1 {
        return row.to_vec();
    }
    let total: f64 = row.iter().sum();
    let others = (n - 1) as f64;
    row.iter().map(|&d| d - (total - d) / others).collect()
}

impl DistanceSource for DenseDistances {
    fn distance(&self, item: usize, group: usize) -> Option<f64> {
        self.rows.get(item).and_then(|row| row.get(group)).copied()
    }
}

/// Only the (item, group) pairs that mean something, e.g. a word and the
/// documents it occurs in.
#[derive(Debug, Clone, Default)]
pub struct SparseDistances {
    pairs: HashMap<(usize, usize), f64>,
}

impl SparseDistances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: usize, group: usize, distance: f64) {
        self.pairs.insert((item, group), distance);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl DistanceSource for SparseDistances {
    fn distance(&self, item: usize, group: usize) -> Option<f64> {
        self.pairs.get(&(item, group)).copied()
    }
}

/// Leave-one-out contrast of `item` for `group` against `other_groups`.
///
/// `other_groups` must not contain `group` itself. Fails if any requested
/// pair is missing from `distances`.
pub fn contrast<D, I>(distances: &D, item: usize, group: usize, other_groups: I) -> Result<f64>
where
    D: DistanceSource + ?Sized,
    I: IntoIterator<Item = usize>,
{
    let own = lookup(distances, item, group)?;

    let mut sum = 0.0;
    let mut count = 0usize;
    for other in other_groups {
        sum += lookup(distances, item, other)?;
        count += 1;
    }

    let baseline = if count > 0 { sum / count as f64 } else { 0.0 };
    Ok(own - baseline)
}

fn lookup<D: DistanceSource + ?Sized>(distances: &D, item: usize, group: usize) -> Result<f64> {
    distances.distance(item, group).ok_or_else(|| {
        anyhow::anyhow!("No distance recorded for item {item} and group {group}")
    })
}

/// One ranked word and its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordScore {
    pub word: String,
    pub score: f64,
}

impl WordScore {
    pub fn new(word: impl Into<String>, score: f64) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// Ranked words for one document, cluster or corpus.
pub type Ranking = Vec<WordScore>;

/// Sort ascending by score (most distinctive first). Ties keep their input
/// order.
pub fn rank_ascending(mut scored: Vec<WordScore>) -> Ranking {
    scored.sort_by(|a, b| a.score.total_cmp(&b.score));
    scored
}

/// Sort descending by score (largest weight first). Ties keep their input
/// order.
pub fn rank_descending(mut scored: Vec<WordScore>) -> Ranking {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}
