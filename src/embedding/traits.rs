// Embedding provider trait: swap-ready abstraction.
//
// The ranking strategies never know where vectors come from. The default
// implementation reads a static word-vector file, and a local ONNX sentence
// transformer is available behind the `onnx` feature.

use anyhow::Result;

/// Trait for turning tokens and free text into fixed-length vectors.
///
/// Every vector returned by one provider has length `dimension()`.
pub trait EmbeddingProvider: Send + Sync {
    /// Length of every vector this provider produces.
    fn dimension(&self) -> usize;

    /// Embed a token sequence, returning one vector per token in order.
    fn embed_tokens(&self, tokens: &[String]) -> Result<Vec<Vec<f64>>>;

    /// Embed an arbitrary standalone string (a phrase or a whole document).
    fn embed_text(&self, text: &str) -> Result<Vec<f64>>;
}
