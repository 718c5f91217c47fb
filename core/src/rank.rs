use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A document name with a model-specific score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranked<S> {
    pub doc: String,
    pub score: S,
}

impl<S> Ranked<S> {
    pub fn new(doc: impl Into<String>, score: S) -> Self {
        Self { doc: doc.into(), score }
    }
}

/// Stable sort by descending score. Ties keep input order.
///
/// Incomparable scores (NaN) are treated as equal so they never reorder neighbours.
pub fn rank<S: PartialOrd>(mut hits: Vec<Ranked<S>>) -> Vec<Ranked<S>> {
    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    hits
}

/// Drop entries whose score is not strictly positive.
pub fn positive<S: PartialOrd + Default>(hits: Vec<Ranked<S>>) -> Vec<Ranked<S>> {
    let zero = S::default();
    hits.into_iter().filter(|h| h.score > zero).collect()
}

pub fn top_k<S>(mut hits: Vec<Ranked<S>>, k: usize) -> Vec<Ranked<S>> {
    hits.truncate(k);
    hits
}
