// Cluster-level specificity: which words characterize each cluster of
// documents.
//
// Clusters are identified by integer labels. Label -1 marks a document as
// noise; it contributes to no centroid and gets no ranking. Each cluster's
// centroid is the mean of its member document vectors, and every word is
// contrasted against every centroid.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use tracing::info;

use super::contrast::{rank_ascending, DenseDistances, Ranking, WordScore};
use crate::embedding::space::{embed_corpus, VectorSpace};
use crate::embedding::traits::EmbeddingProvider;
use crate::embedding::vector::mean_vector;

/// Label of documents that belong to no cluster.
pub const UNCLUSTERED: i64 = -1;

/// Cluster labels above `UNCLUSTERED`, deduplicated and sorted, with the
/// mean vector of each cluster's member documents.
pub fn cluster_centroids(space: &VectorSpace, labels: &[i64]) -> Result<Vec<(i64, Vec<f64>)>> {
    if labels.len() != space.n_docs() {
        anyhow::bail!(
            "Got {} cluster labels for {} documents",
            labels.len(),
            space.n_docs()
        );
    }

    let unique: BTreeSet<i64> = labels.iter().copied().filter(|&l| l > UNCLUSTERED).collect();

    let centroids = unique
        .into_iter()
        .map(|label| {
            let members = labels
                .iter()
                .zip(&space.doc_vectors)
                .filter(|(&l, _)| l == label)
                .map(|(_, v)| v.as_slice());
            (label, mean_vector(members, space.dimension))
        })
        .collect();

    Ok(centroids)
}

/// Rank every vocabulary word for every cluster.
///
/// The map is keyed by cluster label; `UNCLUSTERED` never appears. With a
/// single cluster there is nothing to contrast against and every score is
/// the word's raw distance to the centroid.
pub fn find_cluster_words(space: &VectorSpace, labels: &[i64]) -> Result<BTreeMap<i64, Ranking>> {
    let centroids = cluster_centroids(space, labels)?;
    let centroid_vectors: Vec<Vec<f64>> = centroids.iter().map(|(_, v)| v.clone()).collect();
    let distances = DenseDistances::cosine(space.vocabulary.vectors(), &centroid_vectors);
    let n_clusters = centroids.len();

    let scores = distances.contrast_all();

    let mut rankings = BTreeMap::new();
    for (c, (label, _)) in centroids.iter().enumerate() {
        let scored = scores
            .iter()
            .enumerate()
            .map(|(word, row)| WordScore::new(space.vocabulary.word(word), row[c]))
            .collect();
        rankings.insert(*label, rank_ascending(scored));
    }

    let noise = labels.iter().filter(|&&l| l <= UNCLUSTERED).count();
    info!(
        clusters = n_clusters,
        unclustered_docs = noise,
        words = space.n_words(),
        "Ranked cluster words"
    );

    Ok(rankings)
}

/// Embed the corpus and rank its words per cluster.
pub fn embedding_cluster_words(
    provider: &dyn EmbeddingProvider,
    token_lists: &[Vec<String>],
    labels: &[i64],
) -> Result<BTreeMap<i64, Ranking>> {
    let space = embed_corpus(provider, token_lists)?;
    find_cluster_words(&space, labels)
}
