use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::frequency::enrichment::NullModel;
use crate::specificity::pos::PosOptions;
use crate::tagging::lexicon::DEFAULT_FALLBACK_TAG;

/// Hidden size of all-MiniLM-L6-v2, the default ONNX model.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Which embedding backend to use.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbedderBackend {
    /// Static word vectors from a text file (default)
    Static,
    /// Local ONNX sentence transformer
    Onnx,
}

/// Central configuration loaded from environment variables.
///
/// The binary loads a .env file first via dotenvy, so everything here can
/// also live in .env.
#[derive(Debug, Clone)]
pub struct Config {
    pub embedder: EmbedderBackend,
    /// Word-vector text file for the static backend
    pub vectors_path: Option<PathBuf>,
    /// Directory holding model.onnx and tokenizer.json for the ONNX backend
    pub model_dir: PathBuf,
    /// Hidden size of the ONNX model
    pub embedding_dim: usize,
    /// Tab-separated tagger lexicon
    pub tagger_path: Option<PathBuf>,
    /// Tag given to tokens missing from the lexicon
    pub tagger_fallback: String,
    pub pos: PosOptions,
    pub null_model: NullModel,
    /// Stop-word language for the frequency vectorizer
    pub stop_words: Option<String>,
    /// Regex token pattern for the frequency vectorizer
    pub token_pattern: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing is required at load time; each command checks what it needs
    /// with the `require_*` methods.
    pub fn load() -> Result<Self> {
        let embedder = match env::var("DISTINCTIVE_EMBEDDER").as_deref() {
            Ok("onnx") => EmbedderBackend::Onnx,
            Ok("static") | Err(_) => EmbedderBackend::Static,
            Ok(other) => anyhow::bail!(
                "Unknown DISTINCTIVE_EMBEDDER {other:?} (expected static or onnx)"
            ),
        };

        let null_model = match env::var("DISTINCTIVE_ENRICHMENT_NULL") {
            Ok(value) => value.parse()?,
            Err(_) => NullModel::default(),
        };

        let embedding_dim = match env::var("DISTINCTIVE_EMBEDDING_DIM") {
            Ok(value) => value
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid DISTINCTIVE_EMBEDDING_DIM {value:?}: {e}"))?,
            Err(_) => DEFAULT_EMBEDDING_DIM,
        };

        let defaults = PosOptions::default();
        let pos = PosOptions {
            candidate_prefixes: env::var("DISTINCTIVE_CANDIDATE_TAGS")
                .map(|v| parse_prefixes(&v))
                .unwrap_or(defaults.candidate_prefixes),
            context_prefixes: env::var("DISTINCTIVE_CONTEXT_TAGS")
                .map(|v| parse_prefixes(&v))
                .unwrap_or(defaults.context_prefixes),
            pos_document_embedding: env::var("DISTINCTIVE_POS_DOCUMENT_EMBEDDING")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.pos_document_embedding),
        };

        Ok(Self {
            embedder,
            vectors_path: env::var("DISTINCTIVE_VECTORS").ok().map(PathBuf::from),
            model_dir: env::var("DISTINCTIVE_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_model_dir()),
            embedding_dim,
            tagger_path: env::var("DISTINCTIVE_TAGGER").ok().map(PathBuf::from),
            tagger_fallback: env::var("DISTINCTIVE_TAGGER_FALLBACK")
                .unwrap_or_else(|_| DEFAULT_FALLBACK_TAG.to_string()),
            pos,
            null_model,
            stop_words: env::var("DISTINCTIVE_STOP_WORDS").ok().filter(|s| !s.is_empty()),
            token_pattern: env::var("DISTINCTIVE_TOKEN_PATTERN").ok().filter(|s| !s.is_empty()),
        })
    }

    /// Check that the chosen embedding backend has what it needs.
    pub fn require_embedder(&self) -> Result<()> {
        match self.embedder {
            EmbedderBackend::Static => match &self.vectors_path {
                Some(path) if path.exists() => Ok(()),
                Some(path) => anyhow::bail!("Word-vector file not found: {}", path.display()),
                None => anyhow::bail!(
                    "DISTINCTIVE_VECTORS not set. Point it at a word2vec/fastText .vec file,\n\
                     or set DISTINCTIVE_EMBEDDER=onnx to use a local sentence-transformer model."
                ),
            },
            EmbedderBackend::Onnx => require_onnx_model(&self.model_dir),
        }
    }

    /// Check that a tagger lexicon is configured.
    pub fn require_tagger(&self) -> Result<()> {
        match &self.tagger_path {
            Some(path) if path.exists() => Ok(()),
            Some(path) => anyhow::bail!("Tagger lexicon not found: {}", path.display()),
            None => anyhow::bail!(
                "DISTINCTIVE_TAGGER not set. POS ranking needs a token<TAB>tag lexicon file."
            ),
        }
    }
}

/// Tag prefixes written as letters, optionally separated: "SP", "S,P", "S P".
fn parse_prefixes(value: &str) -> Vec<char> {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Default location for ONNX models: ~/.local/share/distinctive/models/ on Linux.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("distinctive")
        .join("models")
}

#[cfg(feature = "onnx")]
fn require_onnx_model(dir: &Path) -> Result<()> {
    if !crate::embedding::onnx::model_files_present(dir) {
        anyhow::bail!(
            "ONNX model files not found in {}\n\
             Expected model.onnx and tokenizer.json (set DISTINCTIVE_MODEL_DIR).",
            dir.display()
        );
    }
    Ok(())
}

#[cfg(not(feature = "onnx"))]
fn require_onnx_model(_dir: &Path) -> Result<()> {
    anyhow::bail!("DISTINCTIVE_EMBEDDER=onnx needs the `onnx` feature")
}
