// Corpus vector space: one vector per unique word, one per document.
//
// Every unique token is sent to the provider exactly once. Later occurrences,
// in the same document or another one, reuse the stored vector, so a
// non-deterministic provider still yields one consistent vector per word.

use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::traits::EmbeddingProvider;

/// Unique words with their vectors, in order of first occurrence.
///
/// Word indices are stable: the i-th inserted word keeps index i.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<String>,
    vectors: Vec<Vec<f64>>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new word and its vector, returning the word's index.
    ///
    /// Fails if the word is already present.
    pub fn insert(&mut self, word: &str, vector: Vec<f64>) -> Result<usize> {
        if self.index.contains_key(word) {
            anyhow::bail!("Word {word:?} is already in the vocabulary");
        }
        let idx = self.words.len();
        self.words.push(word.to_string());
        self.vectors.push(vector);
        self.index.insert(word.to_string(), idx);
        Ok(idx)
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn word(&self, idx: usize) -> &str {
        &self.words[idx]
    }

    pub fn vector(&self, idx: usize) -> &[f64] {
        &self.vectors[idx]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn vectors(&self) -> &[Vec<f64>] {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Everything the embedding strategies need about one corpus.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    /// Mean token vector per document
    pub doc_vectors: Vec<Vec<f64>>,
    /// Unique words and their vectors
    pub vocabulary: Vocabulary,
    /// For each word index, the documents containing it
    pub word_docs: Vec<BTreeSet<usize>>,
    /// For each document, its distinct word indices in first-occurrence order
    pub doc_words: Vec<Vec<usize>>,
    /// Vector length shared by every vector above
    pub dimension: usize,
}

impl VectorSpace {
    pub fn n_docs(&self) -> usize {
        self.doc_vectors.len()
    }

    pub fn n_words(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Embed a tokenized corpus into a `VectorSpace`.
///
/// Each document's vector is the mean of its token vectors, divided by that
/// document's own token count. An empty document gets the zero vector.
pub fn embed_corpus(
    provider: &dyn EmbeddingProvider,
    token_lists: &[Vec<String>],
) -> Result<VectorSpace> {
    let dim = provider.dimension();
    let mut vocabulary = Vocabulary::new();
    let mut word_docs: Vec<BTreeSet<usize>> = Vec::new();
    let mut doc_words: Vec<Vec<usize>> = Vec::with_capacity(token_lists.len());
    let mut doc_vectors: Vec<Vec<f64>> = Vec::with_capacity(token_lists.len());

    for (doc_idx, tokens) in token_lists.iter().enumerate() {
        // Tokens never seen before, deduplicated, in first-occurrence order
        let mut fresh: Vec<String> = Vec::new();
        let mut queued: HashSet<&str> = HashSet::new();
        for token in tokens {
            if !vocabulary.contains(token) && queued.insert(token.as_str()) {
                fresh.push(token.clone());
            }
        }

        if !fresh.is_empty() {
            let vectors = provider
                .embed_tokens(&fresh)
                .with_context(|| format!("Failed to embed tokens of document {doc_idx}"))?;
            if vectors.len() != fresh.len() {
                anyhow::bail!(
                    "Embedding provider returned {} vectors for {} tokens in document {}",
                    vectors.len(),
                    fresh.len(),
                    doc_idx
                );
            }
            for (token, vector) in fresh.iter().zip(vectors) {
                if vector.len() != dim {
                    anyhow::bail!(
                        "Embedding for {token:?} has dimension {}, expected {dim}",
                        vector.len()
                    );
                }
                vocabulary.insert(token, vector)?;
                word_docs.push(BTreeSet::new());
            }
        }

        let mut doc_vector = vec![0.0_f64; dim];
        let mut distinct: Vec<usize> = Vec::new();
        let n_tokens = tokens.len() as f64;

        for token in tokens {
            let Some(word_idx) = vocabulary.index_of(token) else {
                anyhow::bail!("Token {token:?} missing from vocabulary after embedding");
            };
            for (acc, &val) in doc_vector.iter_mut().zip(vocabulary.vector(word_idx)) {
                *acc += val / n_tokens;
            }
            if word_docs[word_idx].insert(doc_idx) {
                distinct.push(word_idx);
            }
        }

        debug!(
            doc = doc_idx,
            tokens = tokens.len(),
            distinct = distinct.len(),
            new_words = fresh.len(),
            "Embedded document"
        );

        doc_vectors.push(doc_vector);
        doc_words.push(distinct);
    }

    info!(
        documents = doc_vectors.len(),
        vocabulary = vocabulary.len(),
        dim = dim,
        "Embedded corpus"
    );

    Ok(VectorSpace {
        doc_vectors,
        vocabulary,
        word_docs,
        doc_words,
        dimension: dim,
    })
}

/// Embed a standalone phrase, delegating entirely to the provider.
pub fn embed_phrase(provider: &dyn EmbeddingProvider, text: &str) -> Result<Vec<f64>> {
    provider
        .embed_text(text)
        .with_context(|| format!("Failed to embed phrase {text:?}"))
}
