// Sparse term-document matrix.
//
// Rows are documents, columns are vocabulary terms. Each row keeps only its
// non-zero entries, sorted by column. Once built the matrix is read-only.

use std::collections::HashSet;

use anyhow::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct TermMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<(usize, f64)>>,
}

impl TermMatrix {
    /// Build a matrix from a vocabulary and one list of `(column, weight)`
    /// entries per document.
    ///
    /// Zero weights are dropped. Fails on duplicate vocabulary terms, columns
    /// outside the vocabulary, a column repeated within a row, or weights
    /// that are negative or not finite.
    pub fn new(vocabulary: Vec<String>, rows: Vec<Vec<(usize, f64)>>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(vocabulary.len());
        for term in &vocabulary {
            if !seen.insert(term.as_str()) {
                anyhow::bail!("Duplicate vocabulary term {term:?}");
            }
        }

        let mut clean_rows = Vec::with_capacity(rows.len());
        for (doc, mut row) in rows.into_iter().enumerate() {
            row.retain(|&(_, w)| w != 0.0);
            row.sort_by_key(|&(col, _)| col);

            for pair in row.windows(2) {
                if pair[0].0 == pair[1].0 {
                    anyhow::bail!("Column {} repeated in row {doc}", pair[0].0);
                }
            }
            for &(col, weight) in &row {
                if col >= vocabulary.len() {
                    anyhow::bail!(
                        "Column {col} in row {doc} is outside a vocabulary of {} terms",
                        vocabulary.len()
                    );
                }
                if !weight.is_finite() || weight < 0.0 {
                    anyhow::bail!("Invalid weight {weight} at row {doc}, column {col}");
                }
            }
            clean_rows.push(row);
        }

        Ok(Self {
            vocabulary,
            rows: clean_rows,
        })
    }

    pub fn n_docs(&self) -> usize {
        self.rows.len()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn term(&self, col: usize) -> &str {
        &self.vocabulary[col]
    }

    /// Non-zero `(column, weight)` entries of one document, sorted by column.
    pub fn row(&self, doc: usize) -> &[(usize, f64)] {
        &self.rows[doc]
    }

    pub fn get(&self, doc: usize, col: usize) -> f64 {
        let row = &self.rows[doc];
        match row.binary_search_by_key(&col, |&(c, _)| c) {
            Ok(pos) => row[pos].1,
            Err(_) => 0.0,
        }
    }

    /// Sum of every column over all documents.
    pub fn column_totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.n_terms()];
        for row in &self.rows {
            for &(col, weight) in row {
                totals[col] += weight;
            }
        }
        totals
    }

    /// Number of documents with a non-zero entry in each column.
    pub fn document_frequencies(&self) -> Vec<usize> {
        let mut df = vec![0usize; self.n_terms()];
        for row in &self.rows {
            for &(col, _) in row {
                df[col] += 1;
            }
        }
        df
    }

    /// Sum of one document's weights.
    pub fn row_total(&self, doc: usize) -> f64 {
        self.rows[doc].iter().map(|&(_, w)| w).sum()
    }
}
