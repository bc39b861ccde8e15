use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use distinctive::config::{Config, EmbedderBackend};
use distinctive::embedding::static_vectors::StaticWordVectors;
use distinctive::embedding::traits::EmbeddingProvider;
use distinctive::frequency::enrichment::{enrichment_words, NullModel};
use distinctive::frequency::tfidf::tfidf_words;
use distinctive::frequency::vectorizer::FrequencyVectorizer;
use distinctive::input::{load_labels, load_token_lists};
use distinctive::output::terminal::display_report;
use distinctive::output::Report;
use distinctive::specificity::{cluster, corpus, document, pos};
use distinctive::tagging::lexicon::LexiconTagger;

/// Distinctive: find the words that characterize each document, cluster or
/// corpus.
///
/// Input is a JSON array of token arrays, or a text file with one
/// whitespace-tokenized document per line.
#[derive(Parser)]
#[command(name = "distinctive", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every analysis.
#[derive(Args)]
struct CommonArgs {
    /// Token file (JSON or one document per line)
    input: PathBuf,

    /// Words shown per group (default: 10)
    #[arg(long, default_value = "10")]
    top: usize,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Words most specific to each document relative to the whole corpus
    Corpus {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Words most specific to each document among the documents sharing them
    Document {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Words most specific to each cluster of documents
    Cluster {
        #[command(flatten)]
        common: CommonArgs,

        /// One integer label per document; -1 marks unclustered documents
        #[arg(long)]
        labels: PathBuf,
    },

    /// Nouns and adjectives closest in meaning to their document
    Pos {
        #[command(flatten)]
        common: CommonArgs,

        /// Pool the document from its nouns and adjectives only
        #[arg(long)]
        pos_document_embedding: bool,
    },

    /// Highest TF-IDF terms per document
    Tfidf {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Terms over-represented in each document (hypergeometric test)
    Enrichment {
        #[command(flatten)]
        common: CommonArgs,

        /// Null model: term-occurrences or document-presence
        #[arg(long)]
        null: Option<NullModel>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("distinctive=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let (common, report) = match cli.command {
        Commands::Corpus { common } => {
            let token_lists = load_token_lists(&common.input)?;
            let embedder = build_embedder(&config)?;
            let rankings = with_spinner("Ranking corpus words", || {
                corpus::embedding_corpus_words(embedder.as_ref(), &token_lists)
            })?;
            (common, Report::from_documents("corpus", rankings))
        }

        Commands::Document { common } => {
            let token_lists = load_token_lists(&common.input)?;
            let embedder = build_embedder(&config)?;
            let rankings = with_spinner("Ranking document words", || {
                document::embedding_document_words(embedder.as_ref(), &token_lists)
            })?;
            (common, Report::from_documents("document", rankings))
        }

        Commands::Cluster { common, labels } => {
            let token_lists = load_token_lists(&common.input)?;
            let labels = load_labels(&labels)?;
            let embedder = build_embedder(&config)?;
            let rankings = with_spinner("Ranking cluster words", || {
                cluster::embedding_cluster_words(embedder.as_ref(), &token_lists, &labels)
            })?;
            (common, Report::from_clusters("cluster", rankings))
        }

        Commands::Pos {
            common,
            pos_document_embedding,
        } => {
            let token_lists = load_token_lists(&common.input)?;
            config.require_tagger()?;
            let tagger = load_tagger(&config)?;
            let embedder = build_embedder(&config)?;

            let mut options = config.pos.clone();
            options.pos_document_embedding |= pos_document_embedding;

            let rankings = with_spinner("Ranking nouns and adjectives", || {
                pos::embedding_pos_words(&token_lists, &tagger, embedder.as_ref(), &options)
            })?;
            (common, Report::from_documents("pos", rankings))
        }

        Commands::Tfidf { common } => {
            let token_lists = load_token_lists(&common.input)?;
            let vectorizer = build_vectorizer(&config)?;
            let rankings = tfidf_words(&token_lists, &vectorizer)?;
            (common, Report::from_documents("tfidf", rankings))
        }

        Commands::Enrichment { common, null } => {
            let token_lists = load_token_lists(&common.input)?;
            let null_model = null.unwrap_or(config.null_model);
            let vectorizer = match null_model {
                NullModel::TermOccurrences => build_vectorizer(&config)?.as_counts(),
                NullModel::DocumentPresence => build_vectorizer(&config)?,
            };
            let rankings = enrichment_words(&token_lists, &vectorizer, null_model)?;
            (common, Report::from_documents("enrichment", rankings))
        }
    };

    let report = report.truncate(common.top);
    if common.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_report(&report);
    }

    Ok(())
}

/// Build the configured embedding backend.
fn build_embedder(config: &Config) -> Result<Box<dyn EmbeddingProvider>> {
    config.require_embedder()?;

    match config.embedder {
        EmbedderBackend::Static => {
            let path = config
                .vectors_path
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DISTINCTIVE_VECTORS not set"))?;
            Ok(Box::new(StaticWordVectors::load(path)?))
        }
        EmbedderBackend::Onnx => load_onnx(&config.model_dir, config.embedding_dim),
    }
}

#[cfg(feature = "onnx")]
fn load_onnx(model_dir: &Path, dim: usize) -> Result<Box<dyn EmbeddingProvider>> {
    let embedder = distinctive::embedding::onnx::SentenceEmbedder::load(model_dir, dim)?;
    tracing::info!(dim = dim, "Loaded sentence embedding model");
    Ok(Box::new(embedder))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(_model_dir: &Path, _dim: usize) -> Result<Box<dyn EmbeddingProvider>> {
    anyhow::bail!("This build has no ONNX support; rebuild with the `onnx` feature")
}

fn load_tagger(config: &Config) -> Result<LexiconTagger> {
    let path = config
        .tagger_path
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DISTINCTIVE_TAGGER not set"))?;
    LexiconTagger::load(path, &config.tagger_fallback)
}

/// Build the frequency vectorizer from the analyzer settings in `config`.
fn build_vectorizer(config: &Config) -> Result<FrequencyVectorizer> {
    let mut vectorizer = FrequencyVectorizer::tfidf();
    if let Some(language) = &config.stop_words {
        vectorizer = vectorizer.with_stop_words(language)?;
    }
    if let Some(pattern) = &config.token_pattern {
        vectorizer = vectorizer.with_token_pattern(pattern)?;
    }
    Ok(vectorizer)
}

/// Run `work` behind a terminal spinner.
fn with_spinner<T>(message: &str, work: impl FnOnce() -> Result<T>) -> Result<T> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("  {spinner} {msg} ({elapsed})")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = work();
    pb.finish_and_clear();
    result
}
