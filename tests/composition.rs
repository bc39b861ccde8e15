// Composition tests: verifying that the layers chain together correctly.
//
// These tests exercise the data flow the command line follows:
//   token file -> word vectors / lexicon -> strategy -> report
// using temporary files in place of real corpora and models.

use std::io::Write;

use distinctive::embedding::static_vectors::StaticWordVectors;
use distinctive::frequency::enrichment::{enrichment_words, NullModel};
use distinctive::frequency::tfidf::tfidf_words;
use distinctive::frequency::vectorizer::FrequencyVectorizer;
use distinctive::input::{load_labels, load_token_lists};
use distinctive::output::Report;
use distinctive::specificity::cluster::embedding_cluster_words;
use distinctive::specificity::corpus::embedding_corpus_words;
use distinctive::specificity::document::embedding_document_words;
use distinctive::specificity::pos::{embedding_pos_words, PosOptions};
use distinctive::tagging::lexicon::LexiconTagger;

fn temp_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

const VECTORS: &str = "\
5 3
cat 1.0 0.0 0.0
dog 0.9 0.1 0.0
rocket 0.0 1.0 0.0
orbit 0.0 0.9 0.1
launches 0.0 0.2 1.0
";

const CORPUS: &str = "\
cat dog dog
rocket orbit launches
cat rocket
";

const LEXICON: &str = "\
# token\ttag
cat\tSozei
dog\tSozei
rocket\tSometn
orbit\tSozem
launches\tVmpr3s
";

// ============================================================
// Chain: token file + vector file -> embedding strategies
// ============================================================

#[test]
fn corpus_strategy_from_files() {
    let vectors = temp_file(VECTORS);
    let corpus = temp_file(CORPUS);

    let provider = StaticWordVectors::load(vectors.path()).unwrap();
    let token_lists = load_token_lists(corpus.path()).unwrap();
    let rankings = embedding_corpus_words(&provider, &token_lists).unwrap();

    assert_eq!(rankings.len(), 3);
    let animal = |w: &str| w == "cat" || w == "dog";
    // Animal words lead the animal document and trail the space one
    assert!(rankings[0][..2].iter().all(|w| animal(&w.word)));
    assert!(rankings[1][3..].iter().all(|w| animal(&w.word)));
    assert!(rankings.iter().all(|r| r.len() == 5));
}

#[test]
fn document_strategy_from_json_tokens() {
    let vectors = temp_file(VECTORS);
    let corpus = temp_file(r#"[["cat", "dog"], ["rocket", "dog"], ["unseen"]]"#);

    let provider = StaticWordVectors::load(vectors.path()).unwrap();
    let token_lists = load_token_lists(corpus.path()).unwrap();
    let rankings = embedding_document_words(&provider, &token_lists).unwrap();

    assert_eq!(rankings.len(), 3);
    assert_eq!(rankings[0].len(), 2);
    // Out-of-vocabulary tokens embed as zero vectors: distance exactly 1
    assert_eq!(rankings[2].len(), 1);
    assert!((rankings[2][0].score - 1.0).abs() < 1e-12);
}

#[test]
fn cluster_strategy_with_label_file() {
    let vectors = temp_file(VECTORS);
    let corpus = temp_file(CORPUS);
    let labels = temp_file("[0, 1, -1]");

    let provider = StaticWordVectors::load(vectors.path()).unwrap();
    let token_lists = load_token_lists(corpus.path()).unwrap();
    let labels = load_labels(labels.path()).unwrap();
    let rankings = embedding_cluster_words(&provider, &token_lists, &labels).unwrap();

    let report = Report::from_clusters("cluster", rankings).truncate(2);
    let labels: Vec<&str> = report.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["cluster 0", "cluster 1"]);
    assert!(report.groups.iter().all(|g| g.words.len() == 2));
}

#[test]
fn pos_strategy_with_lexicon_file() {
    let vectors = temp_file(VECTORS);
    let corpus = temp_file(CORPUS);
    let lexicon = temp_file(LEXICON);

    let provider = StaticWordVectors::load(vectors.path()).unwrap();
    let tagger = LexiconTagger::load(lexicon.path(), "X").unwrap();
    let token_lists = load_token_lists(corpus.path()).unwrap();

    let rankings =
        embedding_pos_words(&token_lists, &tagger, &provider, &PosOptions::default()).unwrap();

    assert_eq!(rankings.len(), 3);
    // The verb is tagged V and never ranked
    assert!(rankings[1].iter().all(|w| w.word != "launches"));
    assert_eq!(rankings[1].len(), 2);
    // Similarities come first-highest
    assert!(rankings[0]
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score - 1e-12));
}

// ============================================================
// Chain: token file -> frequency rankings -> report
// ============================================================

#[test]
fn tfidf_report_serializes_to_json() {
    let corpus = temp_file(CORPUS);
    let token_lists = load_token_lists(corpus.path()).unwrap();

    let rankings = tfidf_words(&token_lists, &FrequencyVectorizer::tfidf()).unwrap();
    let report = Report::from_documents("tfidf", rankings).truncate(1);

    assert_eq!(report.groups[0].words[0].word, "dog");

    let json = serde_json::to_string(&report).unwrap();
    let back: Report = serde_json::from_str(&json).unwrap();
    assert_eq!(back.analysis, "tfidf");
    assert_eq!(back.groups.len(), 3);
    assert_eq!(back.groups[0].words[0].word, "dog");
    assert!((back.groups[0].words[0].score - report.groups[0].words[0].score).abs() < 1e-12);
}

#[test]
fn enrichment_report_from_counts() {
    let corpus = temp_file(CORPUS);
    let token_lists = load_token_lists(corpus.path()).unwrap();

    let vectorizer = FrequencyVectorizer::tfidf().as_counts();
    let rankings = enrichment_words(&token_lists, &vectorizer, NullModel::TermOccurrences).unwrap();
    let report = Report::from_documents("enrichment", rankings);

    assert_eq!(report.groups.len(), 3);
    assert_eq!(report.groups[0].words[0].word, "dog");
    assert!(report.groups[0].words[0].score < report.groups[0].words[1].score);
}
