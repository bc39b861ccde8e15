// Corpus-level specificity: which words characterize each document relative
// to the whole corpus.
//
// Every vocabulary word is contrasted against every document: its distance
// to the document minus its mean distance to all other documents.

use anyhow::Result;
use tracing::info;

use super::contrast::{rank_ascending, DenseDistances, Ranking, WordScore};
use crate::embedding::space::{embed_corpus, VectorSpace};
use crate::embedding::traits::EmbeddingProvider;

/// Rank every vocabulary word for every document.
///
/// Returns one ranking per document, each containing the full vocabulary once.
pub fn find_corpus_words(space: &VectorSpace) -> Result<Vec<Ranking>> {
    let distances = DenseDistances::cosine(space.vocabulary.vectors(), &space.doc_vectors);
    let n_docs = space.n_docs();

    let scores = distances.contrast_all();

    let rankings: Vec<Ranking> = (0..n_docs)
        .map(|doc| {
            let scored = scores
                .iter()
                .enumerate()
                .map(|(word, row)| WordScore::new(space.vocabulary.word(word), row[doc]))
                .collect();
            rank_ascending(scored)
        })
        .collect();

    info!(
        documents = n_docs,
        words = space.n_words(),
        "Ranked corpus words"
    );

    Ok(rankings)
}

/// Embed the corpus and rank its words per document.
pub fn embedding_corpus_words(
    provider: &dyn EmbeddingProvider,
    token_lists: &[Vec<String>],
) -> Result<Vec<Ranking>> {
    let space = embed_corpus(provider, token_lists)?;
    find_corpus_words(&space)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::static_vectors::StaticWordVectors;

    fn provider() -> StaticWordVectors {
        StaticWordVectors::from_pairs(
            3,
            [
                ("cat".to_string(), vec![1.0, 0.0, 0.0]),
                ("dog".to_string(), vec![0.0, 1.0, 0.0]),
                ("pet".to_string(), vec![0.5, 0.5, 0.0]),
            ],
        )
        .unwrap()
    }

    fn docs(texts: &[&str]) -> Vec<Vec<String>> {
        texts
            .iter()
            .map(|t| t.split_whitespace().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_every_word_ranked_once_per_document() {
        let rankings = embedding_corpus_words(&provider(), &docs(&["cat pet", "dog pet"])).unwrap();
        assert_eq!(rankings.len(), 2);
        for ranking in &rankings {
            let mut words: Vec<&str> = ranking.iter().map(|w| w.word.as_str()).collect();
            words.sort();
            assert_eq!(words, vec!["cat", "dog", "pet"]);
        }
    }

    #[test]
    fn test_document_specific_word_ranks_first() {
        let rankings =
            embedding_corpus_words(&provider(), &docs(&["cat cat pet", "dog dog pet"])).unwrap();
        assert_eq!(rankings[0][0].word, "cat");
        assert_eq!(rankings[1][0].word, "dog");
        assert!(rankings[0][0].score < 0.0);
    }

    #[test]
    fn test_single_document_falls_back_to_raw_distance() {
        let rankings = embedding_corpus_words(&provider(), &docs(&["cat"])).unwrap();
        let cat = rankings[0].iter().find(|w| w.word == "cat").unwrap();
        assert!(cat.score.abs() < 1e-12);
    }
}
