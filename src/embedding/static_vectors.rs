// Static word vectors read from a word2vec / fastText text file.
//
// File format: an optional header line "<count> <dim>", then one word per
// line followed by its components, separated by spaces. Tokens that are not
// in the table embed as the zero vector, and a phrase embeds as the mean of
// its whitespace-separated tokens.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::traits::EmbeddingProvider;
use super::vector::mean_vector;

/// In-memory word-vector table.
pub struct StaticWordVectors {
    dim: usize,
    table: HashMap<String, Vec<f64>>,
}

impl StaticWordVectors {
    /// Build a table from explicit (word, vector) pairs.
    ///
    /// Every vector must have length `dim` and every word must be unique.
    pub fn from_pairs<I>(dim: usize, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        let mut table = HashMap::new();
        for (word, vector) in pairs {
            if vector.len() != dim {
                anyhow::bail!(
                    "Vector for {word:?} has dimension {}, expected {dim}",
                    vector.len()
                );
            }
            if table.insert(word.clone(), vector).is_some() {
                anyhow::bail!("Duplicate word {word:?} in word-vector table");
            }
        }
        Ok(Self { dim, table })
    }

    /// Load a word-vector text file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Word-vector file not found: {}\nSet DISTINCTIVE_VECTORS to a word2vec/fastText .vec file.",
                path.display()
            );
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open word-vector file {}", path.display()))?;
        let reader = BufReader::new(file);

        let mut dim: Option<usize> = None;
        let mut table: HashMap<String, Vec<f64>> = HashMap::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line
                .with_context(|| format!("Failed to read line {} of {}", line_no + 1, path.display()))?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split(' ');
            let word = fields.next().unwrap_or_default();
            let rest: Vec<&str> = fields.filter(|f| !f.is_empty()).collect();

            // "<count> <dim>" header
            if line_no == 0 && rest.len() == 1 {
                if let (Ok(_), Ok(declared)) = (word.parse::<usize>(), rest[0].parse::<usize>()) {
                    dim = Some(declared);
                    continue;
                }
            }

            let vector = rest
                .iter()
                .map(|f| f.parse::<f64>())
                .collect::<Result<Vec<f64>, _>>()
                .with_context(|| {
                    format!("Malformed vector on line {} of {}", line_no + 1, path.display())
                })?;

            match dim {
                Some(d) if d != vector.len() => anyhow::bail!(
                    "Line {} of {} has {} components, expected {}",
                    line_no + 1,
                    path.display(),
                    vector.len(),
                    d
                ),
                Some(_) => {}
                None => dim = Some(vector.len()),
            }

            if table.insert(word.to_string(), vector).is_some() {
                anyhow::bail!(
                    "Duplicate word {word:?} on line {} of {}",
                    line_no + 1,
                    path.display()
                );
            }
        }

        let Some(dim) = dim else {
            anyhow::bail!("Word-vector file {} is empty", path.display());
        };
        if dim == 0 {
            anyhow::bail!("Word-vector file {} declares zero dimensions", path.display());
        }

        info!(
            words = table.len(),
            dim = dim,
            "Loaded word vectors from {}",
            path.display()
        );

        Ok(Self { dim, table })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    fn lookup(&self, token: &str) -> Vec<f64> {
        match self.table.get(token) {
            Some(v) => v.clone(),
            None => {
                debug!(token = token, "Out-of-vocabulary token, using zero vector");
                vec![0.0; self.dim]
            }
        }
    }
}

impl EmbeddingProvider for StaticWordVectors {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn embed_tokens(&self, tokens: &[String]) -> Result<Vec<Vec<f64>>> {
        Ok(tokens.iter().map(|t| self.lookup(t)).collect())
    }

    fn embed_text(&self, text: &str) -> Result<Vec<f64>> {
        let vectors: Vec<Vec<f64>> = text.split_whitespace().map(|t| self.lookup(t)).collect();
        Ok(mean_vector(vectors.iter().map(Vec::as_slice), self.dim))
    }
}
