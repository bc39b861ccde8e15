// Term-frequency vectorizer producing raw counts or TF-IDF weights.
//
// The input documents are already tokenized and joined with spaces, so the
// default analyzer only splits on whitespace, lowercases, and drops tokens
// with no letter or digit. A custom regex pattern can replace the split.
//
// TF-IDF follows the usual smoothed formulation:
//
//   idf(t)  = ln((1 + n) / (1 + df(t))) + 1
//   w(d, t) = tf(d, t) * idf(t), each row then scaled to unit l2 norm
//
// where n is the number of documents and df(t) the number containing t.

use std::collections::{BTreeSet, HashMap, HashSet};

use anyhow::Result;
use regex_lite::Regex;
use stop_words::{get, LANGUAGE};
use tracing::{debug, info};

use super::matrix::TermMatrix;
use super::traits::TermVectorizer;

/// How matrix cells are weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weighting {
    /// Raw occurrence counts
    Count,
    /// Smoothed TF-IDF
    TfIdf,
}

/// Configurable count / TF-IDF vectorizer.
#[derive(Debug, Clone)]
pub struct FrequencyVectorizer {
    pub weighting: Weighting,
    /// Lowercase documents before tokenizing
    pub lowercase: bool,
    /// Use 1 + ln(tf) instead of tf (TF-IDF only)
    pub sublinear_tf: bool,
    /// Scale each TF-IDF row to unit l2 norm
    pub normalize: bool,
    /// Regex whose matches are the tokens; whitespace split when `None`
    pub token_pattern: Option<Regex>,
    /// Terms dropped after lowercasing
    pub stop_words: HashSet<String>,
}

impl Default for FrequencyVectorizer {
    fn default() -> Self {
        Self {
            weighting: Weighting::TfIdf,
            lowercase: true,
            sublinear_tf: false,
            normalize: true,
            token_pattern: None,
            stop_words: HashSet::new(),
        }
    }
}

impl FrequencyVectorizer {
    /// TF-IDF vectorizer with default settings.
    pub fn tfidf() -> Self {
        Self::default()
    }

    /// Raw-count vectorizer with default settings.
    pub fn counts() -> Self {
        Self {
            weighting: Weighting::Count,
            ..Self::default()
        }
    }

    /// Return a copy that produces raw counts, keeping the analyzer settings.
    pub fn as_counts(&self) -> Self {
        Self {
            weighting: Weighting::Count,
            ..self.clone()
        }
    }

    /// Tokenize with a custom regex pattern.
    pub fn with_token_pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| anyhow::anyhow!("Invalid token pattern {pattern:?}: {e}"))?;
        self.token_pattern = Some(regex);
        Ok(self)
    }

    /// Drop the stop words of `language` (e.g. "english").
    pub fn with_stop_words(mut self, language: &str) -> Result<Self> {
        let words: Vec<String> = get(stop_word_language(language)?);
        self.stop_words = words.into_iter().map(|w| w.to_lowercase()).collect();
        Ok(self)
    }

    fn analyze(&self, document: &str) -> Vec<String> {
        let text = if self.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };

        let tokens: Vec<String> = match &self.token_pattern {
            Some(re) => re.find_iter(&text).map(|m| m.as_str().to_string()).collect(),
            None => text
                .split_whitespace()
                .filter(|t| t.chars().any(char::is_alphanumeric))
                .map(String::from)
                .collect(),
        };

        tokens
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }
}

/// Map a language name to the stop-word list it selects.
pub fn stop_word_language(name: &str) -> Result<LANGUAGE> {
    let language = match name.to_lowercase().as_str() {
        "english" | "en" => LANGUAGE::English,
        "german" | "de" => LANGUAGE::German,
        "french" | "fr" => LANGUAGE::French,
        "spanish" | "es" => LANGUAGE::Spanish,
        "italian" | "it" => LANGUAGE::Italian,
        "portuguese" | "pt" => LANGUAGE::Portuguese,
        "russian" | "ru" => LANGUAGE::Russian,
        other => anyhow::bail!("No stop-word list for language {other:?}"),
    };
    Ok(language)
}

impl TermVectorizer for FrequencyVectorizer {
    fn fit_transform(&self, documents: &[String]) -> Result<TermMatrix> {
        if documents.is_empty() {
            anyhow::bail!("No documents to vectorize");
        }

        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| self.analyze(d)).collect();

        let terms: BTreeSet<&str> = analyzed.iter().flatten().map(String::as_str).collect();
        if terms.is_empty() {
            anyhow::bail!(
                "Empty vocabulary across {} documents; they may contain only stop words",
                documents.len()
            );
        }
        let vocabulary: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
        let column: HashMap<&str, usize> = terms.iter().enumerate().map(|(i, &t)| (t, i)).collect();

        let mut rows: Vec<Vec<(usize, f64)>> = analyzed
            .iter()
            .map(|tokens| {
                let mut counts: HashMap<usize, f64> = HashMap::new();
                for token in tokens {
                    *counts.entry(column[token.as_str()]).or_insert(0.0) += 1.0;
                }
                counts.into_iter().collect()
            })
            .collect();

        if self.weighting == Weighting::TfIdf {
            let n = documents.len() as f64;
            let mut df = vec![0usize; vocabulary.len()];
            for row in &rows {
                for &(col, _) in row {
                    df[col] += 1;
                }
            }
            let idf: Vec<f64> = df
                .iter()
                .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
                .collect();

            for row in &mut rows {
                for (col, weight) in row.iter_mut() {
                    let tf = if self.sublinear_tf {
                        1.0 + weight.ln()
                    } else {
                        *weight
                    };
                    *weight = tf * idf[*col];
                }
                if self.normalize {
                    let norm = row.iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
                    if norm > 0.0 {
                        for (_, weight) in row.iter_mut() {
                            *weight /= norm;
                        }
                    }
                }
            }
        }

        debug!(
            documents = documents.len(),
            terms = vocabulary.len(),
            weighting = ?self.weighting,
            "Vectorized documents"
        );

        let matrix = TermMatrix::new(vocabulary, rows)?;
        info!(
            documents = matrix.n_docs(),
            terms = matrix.n_terms(),
            "Built term-document matrix"
        );
        Ok(matrix)
    }
}
