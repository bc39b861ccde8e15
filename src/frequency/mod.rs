// Frequency-based specificity: term-document matrices, TF-IDF ranking and
// hypergeometric enrichment.

pub mod traits;
pub mod matrix;
pub mod vectorizer;
pub mod tfidf;
pub mod enrichment;
