// Vector math shared by every embedding-based strategy.
//
// Cosine distance is 1 - cosine similarity, so it lives in [0, 2]. A zero
// vector has no direction: its similarity to anything is defined as 0, which
// makes its distance to anything exactly 1.

/// Cosine similarity between two vectors, in [-1, 1].
///
/// Returns 0.0 when either vector has zero magnitude, when the vectors are
/// empty, or when their dimensions differ.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    // Dividing by each norm in turn keeps tiny vectors from underflowing the
    // product; rounding can still push the ratio a hair past 1.0
    (dot / mag_a / mag_b).clamp(-1.0, 1.0)
}

/// Cosine distance: `1 - cosine_similarity(a, b)`, in [0, 2].
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    1.0 - cosine_similarity(a, b)
}

/// Arithmetic mean of a set of vectors of length `dim`.
///
/// An empty set yields the zero vector. Components past `dim` are ignored.
pub fn mean_vector<'a, I>(vectors: I, dim: usize) -> Vec<f64>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut mean = vec![0.0_f64; dim];
    let mut n = 0usize;

    for v in vectors {
        for (acc, &val) in mean.iter_mut().zip(v.iter()) {
            *acc += val;
        }
        n += 1;
    }

    if n > 0 {
        let n = n as f64;
        for val in &mut mean {
            *val /= n;
        }
    }

    mean
}
