// Term vectorizer trait: swap-ready abstraction.
//
// The frequency strategies only need a document-term matrix and the term for
// each column. Whether the weights are raw counts or TF-IDF is a property of
// the vectorizer, not of the strategies.

use anyhow::Result;

use super::matrix::TermMatrix;

/// Trait for turning raw documents into a term-document matrix.
pub trait TermVectorizer {
    /// Learn the vocabulary of `documents` and return their weights.
    fn fit_transform(&self, documents: &[String]) -> Result<TermMatrix>;
}
