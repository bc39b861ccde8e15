// Embedding-based specificity: leave-one-out contrast and the strategies
// built on it.

pub mod contrast;
pub mod corpus;
pub mod document;
pub mod cluster;
pub mod pos;
