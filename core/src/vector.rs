//! Term-frequency weight vectors for the vector-space model.
//!
//! Document weights are max-normalized: `0.5 + 0.5 * tf / max_tf`, so the most
//! frequent term of a document always weighs 1.0. Query weights use the same
//! family without the normalization: `0.5 + 0.5 * tf`.

use std::collections::HashMap;

/// Sparse token -> weight vector. Absent tokens weigh 0.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TermVector {
    weights: HashMap<String, f64>,
}

fn term_counts(tokens: &[String]) -> HashMap<&str, u32> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for t in tokens {
        *counts.entry(t.as_str()).or_insert(0) += 1;
    }
    counts
}

impl TermVector {
    /// Weight vector of one document. `None` for a document without tokens.
    pub fn document(tokens: &[String]) -> Option<Self> {
        let counts = term_counts(tokens);
        let max_tf = *counts.values().max()?;
        let weights = counts
            .into_iter()
            .map(|(term, tf)| (term.to_string(), 0.5 + 0.5 * (tf as f64 / max_tf as f64)))
            .collect();
        Some(Self { weights })
    }

    /// Weight vector of a query. An empty query gives an empty vector.
    pub fn query(tokens: &[String]) -> Self {
        let weights = term_counts(tokens)
            .into_iter()
            .map(|(term, tf)| (term.to_string(), 0.5 + 0.5 * tf as f64))
            .collect();
        Self { weights }
    }

    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(t, w)| (t.as_str(), *w))
    }

    pub fn magnitude(&self) -> f64 {
        self.weights.values().map(|w| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &TermVector) -> f64 {
        // Iterate the shorter side.
        let (small, large) = if self.len() <= other.len() { (self, other) } else { (other, self) };
        small.iter().map(|(t, w)| w * large.weight(t)).sum()
    }

    /// Cosine similarity in [0, 1]; 0 when either vector has zero magnitude.
    pub fn cosine(&self, other: &TermVector) -> f64 {
        let denom = self.magnitude() * other.magnitude();
        if denom > 0.0 {
            self.dot(other) / denom
        } else {
            0.0
        }
    }
}
