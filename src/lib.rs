// Distinctive: find the words that set a document, cluster or corpus apart
//
// This is the library root. Each module corresponds to one layer of the
// analysis: embeddings and taggers feed the specificity strategies, the
// frequency module covers the count-based alternatives.

pub mod config;
pub mod embedding;
pub mod frequency;
pub mod input;
pub mod output;
pub mod specificity;
pub mod tagging;
