// TF-IDF ranking: each document's terms by descending weight.

use anyhow::Result;
use tracing::info;

use super::matrix::TermMatrix;
use super::traits::TermVectorizer;
use crate::specificity::contrast::{rank_descending, Ranking, WordScore};

/// Join each token sequence with spaces, the form vectorizers consume.
pub fn join_documents(token_lists: &[Vec<String>]) -> Vec<String> {
    token_lists.iter().map(|tokens| tokens.join(" ")).collect()
}

/// Rank one document's non-zero terms by descending weight.
pub fn rank_by_weight(matrix: &TermMatrix, doc: usize) -> Ranking {
    let scored = matrix
        .row(doc)
        .iter()
        .map(|&(col, weight)| WordScore::new(matrix.term(col), weight))
        .collect();
    rank_descending(scored)
}

/// Vectorize the corpus and rank every document's terms by weight.
pub fn tfidf_words(
    token_lists: &[Vec<String>],
    vectorizer: &dyn TermVectorizer,
) -> Result<Vec<Ranking>> {
    let matrix = vectorizer.fit_transform(&join_documents(token_lists))?;
    let rankings: Vec<Ranking> = (0..matrix.n_docs())
        .map(|doc| rank_by_weight(&matrix, doc))
        .collect();

    info!(documents = rankings.len(), "Ranked TF-IDF words");
    Ok(rankings)
}
