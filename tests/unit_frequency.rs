// Unit tests for the frequency-based rankings.
//
// Tests the term-document matrix invariants, the vectorizer's analyzer
// options, TF-IDF ordering and the hypergeometric enrichment test.

use distinctive::frequency::enrichment::{
    enrichment_p_values, enrichment_words, over_representation_p, NullModel,
};
use distinctive::frequency::matrix::TermMatrix;
use distinctive::frequency::tfidf::tfidf_words;
use distinctive::frequency::traits::TermVectorizer;
use distinctive::frequency::vectorizer::{stop_word_language, FrequencyVectorizer};
use distinctive::specificity::contrast::Ranking;

fn docs(texts: &[&str]) -> Vec<Vec<String>> {
    texts
        .iter()
        .map(|t| t.split_whitespace().map(String::from).collect())
        .collect()
}

fn strings(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

// ============================================================
// TermMatrix: construction invariants
// ============================================================

#[test]
fn matrix_rejects_duplicate_vocabulary() {
    let result = TermMatrix::new(strings(&["a", "a"]), vec![vec![(0, 1.0)]]);
    assert!(result.is_err());
}

#[test]
fn matrix_rejects_out_of_range_column() {
    let result = TermMatrix::new(strings(&["a"]), vec![vec![(1, 1.0)]]);
    assert!(result.is_err());
}

#[test]
fn matrix_rejects_negative_weight() {
    let result = TermMatrix::new(strings(&["a"]), vec![vec![(0, -1.0)]]);
    assert!(result.is_err());
}

#[test]
fn matrix_drops_zeros_and_sorts_rows() {
    let m = TermMatrix::new(
        strings(&["a", "b", "c"]),
        vec![vec![(2, 1.0), (0, 3.0), (1, 0.0)], vec![(1, 2.0)]],
    )
    .unwrap();
    assert_eq!(m.row(0), &[(0, 3.0), (2, 1.0)]);
    assert_eq!(m.get(0, 1), 0.0);
    assert_eq!(m.column_totals(), vec![3.0, 2.0, 1.0]);
    assert_eq!(m.document_frequencies(), vec![1, 1, 1]);
    assert_eq!(m.row_total(0), 4.0);
}

// ============================================================
// FrequencyVectorizer: analyzer options
// ============================================================

#[test]
fn vocabulary_is_alphabetical() {
    let m = FrequencyVectorizer::counts()
        .fit_transform(&strings(&["zebra apple", "mango"]))
        .unwrap();
    assert_eq!(m.vocabulary(), &["apple", "mango", "zebra"]);
}

#[test]
fn documents_are_lowercased() {
    let m = FrequencyVectorizer::counts()
        .fit_transform(&strings(&["Cat cat CAT"]))
        .unwrap();
    assert_eq!(m.vocabulary(), &["cat"]);
    assert_eq!(m.row(0), &[(0, 3.0)]);
}

#[test]
fn stop_words_are_dropped() {
    let m = FrequencyVectorizer::counts()
        .with_stop_words("english")
        .unwrap()
        .fit_transform(&strings(&["the cat and the dog"]))
        .unwrap();
    assert_eq!(m.vocabulary(), &["cat", "dog"]);
}

#[test]
fn only_stop_words_is_an_error() {
    let result = FrequencyVectorizer::tfidf()
        .with_stop_words("english")
        .unwrap()
        .fit_transform(&strings(&["the and of", "the"]));
    assert!(result.is_err());
}

#[test]
fn token_pattern_selects_tokens() {
    let m = FrequencyVectorizer::counts()
        .with_token_pattern("[a-z]{3,}")
        .unwrap()
        .fit_transform(&strings(&["a cat, a dog!"]))
        .unwrap();
    assert_eq!(m.vocabulary(), &["cat", "dog"]);
}

#[test]
fn invalid_token_pattern_fails() {
    assert!(FrequencyVectorizer::tfidf().with_token_pattern("(").is_err());
}

#[test]
fn unknown_stop_word_language_fails() {
    assert!(stop_word_language("klingon").is_err());
    assert!(stop_word_language("English").is_ok());
}

#[test]
fn empty_document_set_is_an_error() {
    assert!(FrequencyVectorizer::tfidf().fit_transform(&[]).is_err());
}

#[test]
fn tfidf_rows_have_unit_norm() {
    let m = FrequencyVectorizer::tfidf()
        .fit_transform(&strings(&["a a b", "b c"]))
        .unwrap();
    for doc in 0..m.n_docs() {
        let norm: f64 = m.row(doc).iter().map(|&(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }
}

// ============================================================
// TF-IDF ranking
// ============================================================

#[test]
fn repeated_term_outranks_shared_term() {
    let rankings = tfidf_words(&docs(&["a a b", "b c"]), &FrequencyVectorizer::tfidf()).unwrap();
    assert_eq!(rankings.len(), 2);
    assert_eq!(rankings[0][0].word, "a");
    assert_eq!(rankings[0][1].word, "b");
    assert!(rankings[0][0].score > rankings[0][1].score);
}

#[test]
fn sublinear_tf_keeps_order_but_narrows_gap() {
    let corpus = docs(&["a a b", "b c"]);
    let plain = tfidf_words(&corpus, &FrequencyVectorizer::tfidf()).unwrap();

    let mut sublinear = FrequencyVectorizer::tfidf();
    sublinear.sublinear_tf = true;
    let damped = tfidf_words(&corpus, &sublinear).unwrap();

    assert_eq!(damped[0][0].word, "a");
    let gap = |r: &Ranking| r[0].score - r[1].score;
    assert!(gap(&damped[0]) < gap(&plain[0]));
}

// ============================================================
// Hypergeometric enrichment
// ============================================================

#[test]
fn p_value_for_certain_draw() {
    // Every success drawn from a population of successes
    let p = over_representation_p(5, 5, 3, 3).unwrap();
    assert!((p - 1.0).abs() < 1e-9);
}

#[test]
fn p_value_invalid_parameters_fail() {
    assert!(over_representation_p(3, 5, 1, 1).is_err());
}

#[test]
fn term_occurrence_p_values_per_term() {
    let m = FrequencyVectorizer::counts()
        .fit_transform(&strings(&["x x", "y y"]))
        .unwrap();
    // N = 4, K = 2, n = 2, k = 2: P = C(2,2) / C(4,2) = 1/6
    let p = enrichment_p_values(&m, 0, NullModel::TermOccurrences).unwrap();
    assert_eq!(p.len(), 1);
    assert_eq!(p[0].0, 0);
    assert!((p[0].1 - 1.0 / 6.0).abs() < 1e-9);
}

#[test]
fn concentrated_term_is_most_enriched() {
    let rankings = enrichment_words(
        &docs(&["rare rare rare common", "common common x", "common y"]),
        &FrequencyVectorizer::counts(),
        NullModel::TermOccurrences,
    )
    .unwrap();
    assert_eq!(rankings[0][0].word, "rare");
    assert!(rankings[0]
        .iter()
        .all(|w| w.score > -1e-12 && w.score < 1.0 + 1e-12));
}

#[test]
fn document_presence_accepts_tfidf_weights() {
    let rankings = enrichment_words(
        &docs(&["a b", "b c", "b"]),
        &FrequencyVectorizer::tfidf(),
        NullModel::DocumentPresence,
    )
    .unwrap();
    assert_eq!(rankings[0][0].word, "a");
    assert!((rankings[0][0].score - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn document_presence_is_document_frequency_over_corpus_size() {
    let corpus = docs(&["a a a b", "b c", "b", "c d"]);
    let counted = enrichment_words(
        &corpus,
        &FrequencyVectorizer::counts(),
        NullModel::DocumentPresence,
    )
    .unwrap();
    let weighted = enrichment_words(
        &corpus,
        &FrequencyVectorizer::tfidf(),
        NullModel::DocumentPresence,
    )
    .unwrap();

    // Repeats inside a document do not matter, only presence does
    let score = |r: &Ranking, w: &str| r.iter().find(|s| s.word == w).unwrap().score;
    assert!((score(&counted[0], "a") - 1.0 / 4.0).abs() < 1e-9);
    assert!((score(&counted[0], "b") - 3.0 / 4.0).abs() < 1e-9);
    assert!((score(&counted[3], "c") - 2.0 / 4.0).abs() < 1e-9);
    for (c, w) in counted.iter().zip(&weighted) {
        assert_eq!(c.len(), w.len());
        for s in c {
            assert!((s.score - score(w, &s.word)).abs() < 1e-12);
        }
    }
}

#[test]
fn p_value_grows_as_observed_count_shrinks() {
    let p: Vec<f64> = (0..=4)
        .rev()
        .map(|k| over_representation_p(20, 6, 5, k).unwrap())
        .collect();
    assert!(p.windows(2).all(|pair| pair[0] <= pair[1] + 1e-12));
    assert_eq!(p[4], 1.0);
}
