// Document-level specificity: for each document, which of its own words are
// least generic.
//
// A word is only compared against the documents it actually occurs in, so
// distances are computed for (word, containing document) pairs only. A word
// found in a single document has nothing to contrast against and keeps its
// raw distance as its score.

use anyhow::Result;
use tracing::info;

use super::contrast::{contrast, rank_ascending, Ranking, SparseDistances, WordScore};
use crate::embedding::space::{embed_corpus, VectorSpace};
use crate::embedding::traits::EmbeddingProvider;
use crate::embedding::vector::cosine_distance;

/// Rank the distinct words of every document.
///
/// Returns one ranking per document containing each of its distinct words
/// once.
pub fn find_document_words(space: &VectorSpace) -> Result<Vec<Ranking>> {
    let mut distances = SparseDistances::new();
    for (word, docs) in space.word_docs.iter().enumerate() {
        let vector = space.vocabulary.vector(word);
        for &doc in docs {
            distances.insert(word, doc, cosine_distance(vector, &space.doc_vectors[doc]));
        }
    }

    let mut rankings = Vec::with_capacity(space.n_docs());
    for (doc, words) in space.doc_words.iter().enumerate() {
        let scored = words
            .iter()
            .map(|&word| {
                let others = space.word_docs[word].iter().copied().filter(|&d| d != doc);
                let score = contrast(&distances, word, doc, others)?;
                Ok(WordScore::new(space.vocabulary.word(word), score))
            })
            .collect::<Result<Vec<_>>>()?;
        rankings.push(rank_ascending(scored));
    }

    info!(
        documents = space.n_docs(),
        pairs = distances.len(),
        "Ranked document words"
    );

    Ok(rankings)
}

/// Embed the corpus and rank each document's own words.
pub fn embedding_document_words(
    provider: &dyn EmbeddingProvider,
    token_lists: &[Vec<String>],
) -> Result<Vec<Ranking>> {
    let space = embed_corpus(provider, token_lists)?;
    find_document_words(&space)
}
