// Sentence embeddings from a local ONNX transformer (all-MiniLM-L6-v2 by
// default).
//
// Text is tokenized, run through the model, and mean-pooled over the
// attention mask. A token sequence is embedded token by token, each token
// treated as a one-word text, so every token gets a context-free vector.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::debug;

use super::traits::EmbeddingProvider;

/// Check whether the model and tokenizer files exist in `dir`.
pub fn model_files_present(dir: &Path) -> bool {
    dir.join("model.onnx").exists() && dir.join("tokenizer.json").exists()
}

/// Sentence embedder backed by an ONNX session.
///
/// `Session::run` takes `&mut self`, so the session sits behind a Mutex to
/// keep the embedder `Sync`.
pub struct SentenceEmbedder {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    dim: usize,
}

impl SentenceEmbedder {
    /// Load `model.onnx` and `tokenizer.json` from `model_dir`.
    ///
    /// `dim` must match the model's hidden size.
    pub fn load(model_dir: &Path, dim: usize) -> Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            anyhow::bail!(
                "Embedding model not found: {}\nPlace an ONNX sentence-transformer export there or set DISTINCTIVE_MODEL_DIR.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Embedding tokenizer not found: {}",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| {
                format!(
                    "Failed to load embedding model from {}",
                    model_path.display()
                )
            })?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load embedding tokenizer: {}", e))?;

        debug!(dim = dim, "Loaded sentence embedding model from {}", model_dir.display());

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            dim,
        })
    }

    /// Embed a batch of texts, one mean-pooled vector per text.
    pub fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

        let seq_len = encodings.iter().map(|e| e.len()).max().unwrap_or(0);
        if seq_len == 0 {
            return Ok(vec![vec![0.0; self.dim]; texts.len()]);
        }

        let masks: Vec<&[u32]> = encodings.iter().map(|e| e.get_attention_mask()).collect();
        let padded = |values: &dyn Fn(usize) -> Vec<i64>| -> Vec<i64> {
            (0..encodings.len())
                .flat_map(|row| {
                    let mut v = values(row);
                    v.resize(seq_len, 0);
                    v
                })
                .collect()
        };
        let ids = padded(&|row| encodings[row].get_ids().iter().map(|&id| id.into()).collect());
        let attention = padded(&|row| masks[row].iter().map(|&m| m.into()).collect());
        let type_ids = vec![0i64; encodings.len() * seq_len];

        let shape = [encodings.len() as i64, seq_len as i64];
        let inputs = ort::inputs! {
            "input_ids" => Tensor::from_array((shape, ids)).context("Failed to build input_ids")?,
            "attention_mask" => Tensor::from_array((shape, attention)).context("Failed to build attention_mask")?,
            "token_type_ids" => Tensor::from_array((shape, type_ids)).context("Failed to build token_type_ids")?
        };

        let hidden = {
            let mut session = self
                .session
                .lock()
                .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;
            let outputs = session
                .run(inputs)
                .context("Embedding ONNX inference failed")?;
            let (_, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .context("Failed to extract embedding output tensor")?;
            data.to_vec()
        };

        let embeddings = mean_pool(&hidden, &masks, seq_len, self.dim)?;
        debug!(texts = texts.len(), dim = self.dim, "Computed sentence embeddings");
        Ok(embeddings)
    }
}

/// Average each row's token states over the positions its mask keeps.
///
/// `hidden` is row-major `[rows, seq_len, dim]`. A row whose mask is all zero
/// pools to the zero vector.
fn mean_pool(hidden: &[f32], masks: &[&[u32]], seq_len: usize, dim: usize) -> Result<Vec<Vec<f64>>> {
    let expected = masks.len() * seq_len * dim;
    if hidden.len() != expected {
        anyhow::bail!(
            "Embedding model output has {} values, expected {} ({} rows of {} tokens x {} dims)",
            hidden.len(),
            expected,
            masks.len(),
            seq_len,
            dim
        );
    }

    if seq_len == 0 || dim == 0 {
        return Ok(vec![vec![0.0; dim]; masks.len()]);
    }

    Ok(hidden
        .chunks_exact(seq_len * dim)
        .zip(masks)
        .map(|(states, mask)| {
            let kept: Vec<&[f32]> = states
                .chunks_exact(dim)
                .zip(mask.iter())
                .filter(|(_, &m)| m != 0)
                .map(|(state, _)| state)
                .collect();
            let mut pooled = vec![0.0; dim];
            if kept.is_empty() {
                return pooled;
            }
            for state in &kept {
                for (acc, &x) in pooled.iter_mut().zip(state.iter()) {
                    *acc += f64::from(x);
                }
            }
            let n = kept.len() as f64;
            pooled.iter_mut().for_each(|v| *v /= n);
            pooled
        })
        .collect())
}

impl EmbeddingProvider for SentenceEmbedder {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn embed_tokens(&self, tokens: &[String]) -> Result<Vec<Vec<f64>>> {
        self.embed_batch(tokens)
    }

    fn embed_text(&self, text: &str) -> Result<Vec<f64>> {
        let mut vectors = self.embed_batch(&[text.to_string()])?;
        vectors
            .pop()
            .ok_or_else(|| anyhow::anyhow!("Embedding model returned no vector"))
    }
}
