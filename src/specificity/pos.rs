// POS-filtered single-document ranking.
//
// Candidates are the document's nouns and adjectives (by tag prefix). Each
// candidate is embedded as a phrase and compared with the pooled embedding of
// the document; the candidate closest in meaning ranks first. There is only
// one group, so no contrast is involved.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use tracing::debug;

use super::contrast::{Ranking, WordScore};
use crate::embedding::space::embed_phrase;
use crate::embedding::traits::EmbeddingProvider;
use crate::embedding::vector::cosine_distance;
use crate::tagging::traits::PosTagger;

/// Which tags count as candidates and context, and how the document is
/// pooled.
#[derive(Debug, Clone, PartialEq)]
pub struct PosOptions {
    /// Tag prefixes of words eligible for ranking
    pub candidate_prefixes: Vec<char>,
    /// Tag prefixes of words kept for the filtered document embedding
    pub context_prefixes: Vec<char>,
    /// Embed the document from its context words only instead of all tokens
    pub pos_document_embedding: bool,
}

impl Default for PosOptions {
    fn default() -> Self {
        Self {
            candidate_prefixes: vec!['S', 'P'],
            context_prefixes: vec!['S', 'P'],
            pos_document_embedding: false,
        }
    }
}

fn tag_matches(tag: &str, prefixes: &[char]) -> bool {
    tag.chars().next().is_some_and(|c| prefixes.contains(&c))
}

/// Rank one document's candidate words by similarity to the document.
///
/// Scores are cosine similarities; the list is ordered by ascending cosine
/// distance, so the most similar candidate comes first. Candidates are
/// deduplicated and visited in lexicographic order, which decides ties.
pub fn find_specific_with_pos(
    tokens: &[String],
    tagger: &dyn PosTagger,
    provider: &dyn EmbeddingProvider,
    options: &PosOptions,
) -> Result<Ranking> {
    let tags = tagger.tag(tokens).context("Part-of-speech tagging failed")?;

    let context: Vec<&str> = tags
        .iter()
        .filter(|(_, tag)| tag_matches(tag, &options.context_prefixes))
        .map(|(token, _)| token.as_str())
        .collect();
    let candidates: BTreeSet<&str> = tags
        .iter()
        .filter(|(_, tag)| tag_matches(tag, &options.candidate_prefixes))
        .map(|(token, _)| token.as_str())
        .collect();

    let doc_text = if options.pos_document_embedding {
        context.join(" ")
    } else {
        tokens.join(" ")
    };
    let doc_vector = embed_phrase(provider, &doc_text)?;

    let mut scored: Vec<(f64, WordScore)> = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        let vector = embed_phrase(provider, candidate)?;
        let distance = cosine_distance(&doc_vector, &vector);
        scored.push((distance, WordScore::new(*candidate, 1.0 - distance)));
    }
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));

    debug!(
        tokens = tokens.len(),
        context = context.len(),
        candidates = candidates.len(),
        "Ranked POS-filtered candidates"
    );

    Ok(scored.into_iter().map(|(_, ws)| ws).collect())
}

/// Run `find_specific_with_pos` on every document.
pub fn embedding_pos_words(
    token_lists: &[Vec<String>],
    tagger: &dyn PosTagger,
    provider: &dyn EmbeddingProvider,
    options: &PosOptions,
) -> Result<Vec<Ranking>> {
    token_lists
        .iter()
        .enumerate()
        .map(|(i, tokens)| {
            find_specific_with_pos(tokens, tagger, provider, options)
                .with_context(|| format!("POS ranking failed for document {i}"))
        })
        .collect()
}
