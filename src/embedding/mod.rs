// Embedding layer: providers, vector math, and the corpus vector space.

pub mod traits;
pub mod vector;
pub mod space;
pub mod static_vectors;
#[cfg(feature = "onnx")]
pub mod onnx;
