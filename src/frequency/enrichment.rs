// Hypergeometric enrichment: which terms occur in a document more often than
// random draws from the corpus would explain.
//
// For a term with k occurrences in the selected sample, the p-value is
// P(X >= k) for X ~ Hypergeometric(N, K, n). What counts as population and
// sample depends on the null model:
//
//   TermOccurrences:  N = term occurrences in the corpus, K = occurrences of
//                     the term in the corpus, n = term occurrences in the
//                     document, k = occurrences of the term in the document
//   DocumentPresence: N = documents, K = documents containing the term,
//                     n = 1 (the selected document), k = 1

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use statrs::distribution::{DiscreteCDF, Hypergeometric};
use tracing::info;

use super::matrix::TermMatrix;
use super::tfidf::join_documents;
use super::traits::TermVectorizer;
use crate::specificity::contrast::{rank_ascending, Ranking, WordScore};

/// Population and sample definition for the enrichment test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullModel {
    /// Draw term occurrences; needs raw counts
    #[default]
    TermOccurrences,
    /// Draw whole documents; any non-zero weight means "present"
    ///
    /// This is the classic document-level test (population = documents,
    /// successes = document frequency, one draw), so a term's p-value is its
    /// document frequency over the corpus size.
    DocumentPresence,
}

impl FromStr for NullModel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "term-occurrences" => Ok(Self::TermOccurrences),
            "document-presence" => Ok(Self::DocumentPresence),
            other => anyhow::bail!(
                "Unknown enrichment null model {other:?} (expected term-occurrences or document-presence)"
            ),
        }
    }
}

impl fmt::Display for NullModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TermOccurrences => write!(f, "term-occurrences"),
            Self::DocumentPresence => write!(f, "document-presence"),
        }
    }
}

/// P(X >= observed) for X ~ Hypergeometric(population, successes, draws).
pub fn over_representation_p(
    population: u64,
    successes: u64,
    draws: u64,
    observed: u64,
) -> Result<f64> {
    if observed == 0 {
        return Ok(1.0);
    }
    let dist = Hypergeometric::new(population, successes, draws).map_err(|e| {
        anyhow::anyhow!(
            "Invalid hypergeometric parameters (population {population}, successes {successes}, draws {draws}): {e}"
        )
    })?;
    Ok(dist.sf(observed - 1))
}

fn as_count(value: f64) -> Result<u64> {
    if value.fract() != 0.0 {
        anyhow::bail!(
            "Term-occurrence enrichment needs raw counts, got weight {value}; use a count vectorizer"
        );
    }
    Ok(value as u64)
}

/// P-values for every term with a non-zero entry in `doc`, as
/// `(column, p_value)` in column order.
pub fn enrichment_p_values(
    matrix: &TermMatrix,
    doc: usize,
    null_model: NullModel,
) -> Result<Vec<(usize, f64)>> {
    match null_model {
        NullModel::TermOccurrences => {
            let totals = matrix
                .column_totals()
                .into_iter()
                .map(as_count)
                .collect::<Result<Vec<u64>>>()?;
            let population: u64 = totals.iter().sum();
            let draws = as_count(matrix.row_total(doc))?;

            matrix
                .row(doc)
                .iter()
                .map(|&(col, count)| {
                    let p = over_representation_p(population, totals[col], draws, as_count(count)?)?;
                    Ok((col, p))
                })
                .collect()
        }
        NullModel::DocumentPresence => {
            let df = matrix.document_frequencies();
            let population = matrix.n_docs() as u64;

            matrix
                .row(doc)
                .iter()
                .map(|&(col, _)| {
                    let p = over_representation_p(population, df[col] as u64, 1, 1)?;
                    Ok((col, p))
                })
                .collect()
        }
    }
}

/// Vectorize the corpus and rank every document's terms by enrichment
/// p-value, smallest first.
///
/// The `TermOccurrences` model needs a vectorizer that produces raw counts.
pub fn enrichment_words(
    token_lists: &[Vec<String>],
    vectorizer: &dyn TermVectorizer,
    null_model: NullModel,
) -> Result<Vec<Ranking>> {
    let matrix = vectorizer.fit_transform(&join_documents(token_lists))?;

    let rankings = (0..matrix.n_docs())
        .map(|doc| {
            let p_values = enrichment_p_values(&matrix, doc, null_model)
                .with_context(|| format!("Enrichment failed for document {doc}"))?;
            let scored = p_values
                .into_iter()
                .map(|(col, p)| WordScore::new(matrix.term(col), p))
                .collect();
            Ok(rank_ascending(scored))
        })
        .collect::<Result<Vec<Ranking>>>()?;

    info!(
        documents = rankings.len(),
        null_model = %null_model,
        "Ranked enriched words"
    );

    Ok(rankings)
}
