//! The retrieval models.
//!
//! Each model is a plain function over a borrowed [`Corpus`]; [`Model`] names them
//! so callers can pick one explicitly and go through [`Corpus::search`].

use crate::corpus::Corpus;
use crate::rank::{self, Ranked};
use crate::tokenizer::tokenize;
use crate::vector::TermVector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Model {
    /// Exact inverted-index lookup of one token.
    Lookup,
    /// Number of query tokens present in the document.
    KeywordOverlap,
    /// Binary independence model as Jaccard similarity of token sets.
    Jaccard,
    /// Documents containing any raw term as a substring.
    NonOverlapped,
    /// Documents where a query token is a node of the proximity graph.
    Proximity,
    /// Cosine similarity of term-frequency vectors.
    Cosine,
    /// Query coverage of the document divided by its vocabulary size.
    BeliefNetwork,
    /// Query coverage weighted by corpus-wide frequency of the document's words.
    Inference,
}

impl Model {
    pub const ALL: [Model; 8] = [
        Model::Lookup,
        Model::KeywordOverlap,
        Model::Jaccard,
        Model::NonOverlapped,
        Model::Proximity,
        Model::Cosine,
        Model::BeliefNetwork,
        Model::Inference,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Model::Lookup => "lookup",
            Model::KeywordOverlap => "keyword-overlap",
            Model::Jaccard => "jaccard",
            Model::NonOverlapped => "non-overlapped",
            Model::Proximity => "proximity",
            Model::Cosine => "cosine",
            Model::BeliefNetwork => "belief-network",
            Model::Inference => "inference",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Model::Lookup => "Inverted index lookup",
            Model::KeywordOverlap => "Keyword matching",
            Model::Jaccard => "Binary Independence Model (BIM)",
            Model::NonOverlapped => "Non-Overlapped List Model",
            Model::Proximity => "Proximal Nodes Model",
            Model::Cosine => "Generalized Vector Model",
            Model::BeliefNetwork => "Belief Network",
            Model::Inference => "Inference Model",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lookup" | "exact" => Ok(Model::Lookup),
            "keyword-overlap" | "keywords" => Ok(Model::KeywordOverlap),
            "jaccard" | "bim" => Ok(Model::Jaccard),
            "non-overlapped" | "terms" => Ok(Model::NonOverlapped),
            "proximity" => Ok(Model::Proximity),
            "cosine" | "vector" => Ok(Model::Cosine),
            "belief-network" | "belief" => Ok(Model::BeliefNetwork),
            "inference" => Ok(Model::Inference),
            other => anyhow::bail!("unknown model '{other}'"),
        }
    }
}

/// Raw query text plus, for the non-overlapped model, an explicit term list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub terms: Vec<String>,
}

impl Query {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), terms: Vec::new() }
    }

    pub fn terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms: Vec<String> = terms.into_iter().map(Into::into).collect();
        Self { text: terms.join(" "), terms }
    }

    /// Explicit terms if any were given, otherwise the whitespace-split text.
    pub fn raw_terms(&self) -> Vec<&str> {
        if self.terms.is_empty() {
            self.text.split_whitespace().collect()
        } else {
            self.terms.iter().map(String::as_str).collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingHit {
    pub doc: String,
    pub positions: Vec<u32>,
}

/// Output of [`Corpus::search`], shaped by the model that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "hits", rename_all = "snake_case")]
pub enum SearchResults {
    /// `None` means the token occurs nowhere.
    Postings(Option<Vec<PostingHit>>),
    Counts(Vec<Ranked<usize>>),
    Scores(Vec<Ranked<f64>>),
    Documents(Vec<String>),
}

impl SearchResults {
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Postings(hits) => hits.as_ref().map_or(0, Vec::len),
            SearchResults::Counts(hits) => hits.len(),
            SearchResults::Scores(hits) => hits.len(),
            SearchResults::Documents(docs) => docs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hide ranked entries with a score of zero. Other shapes pass through.
    pub fn positive(self) -> Self {
        match self {
            SearchResults::Counts(hits) => SearchResults::Counts(rank::positive(hits)),
            SearchResults::Scores(hits) => SearchResults::Scores(rank::positive(hits)),
            other => other,
        }
    }

    pub fn top_k(self, k: usize) -> Self {
        match self {
            SearchResults::Postings(hits) => SearchResults::Postings(hits.map(|mut h| {
                h.truncate(k);
                h
            })),
            SearchResults::Counts(hits) => SearchResults::Counts(rank::top_k(hits, k)),
            SearchResults::Scores(hits) => SearchResults::Scores(rank::top_k(hits, k)),
            SearchResults::Documents(mut docs) => {
                docs.truncate(k);
                SearchResults::Documents(docs)
            }
        }
    }
}

/// Postings of a single-token query, or `None` when nothing matches.
///
/// A query that normalizes to zero or several tokens cannot match one posting list.
pub fn lookup(corpus: &Corpus, term: &str) -> Option<Vec<PostingHit>> {
    let tokens = tokenize(term);
    let [token] = tokens.as_slice() else {
        return None;
    };
    let postings = corpus.index().lookup(token)?;
    Some(
        postings
            .iter()
            .map(|p| PostingHit { doc: corpus.name(p.doc_id).to_string(), positions: p.positions.clone() })
            .collect(),
    )
}

/// Every document with the number of query tokens found in its token set,
/// zero-count documents included.
///
/// A token repeated in the query is counted once per repetition, not once per
/// distinct token, matching the menu program this model comes from.
pub fn keyword_overlap(corpus: &Corpus, query: &str) -> Vec<Ranked<usize>> {
    let query_tokens = tokenize(query);
    let hits = corpus
        .iter()
        .map(|(doc_id, doc)| {
            let set = corpus.token_set(doc_id);
            let matched = query_tokens.iter().filter(|t| set.contains(t.as_str())).count();
            Ranked::new(doc.name.as_str(), matched)
        })
        .collect();
    rank::rank(hits)
}

/// `|a ∩ b| / |a ∪ b|`, or 0 when both sets are empty.
pub fn jaccard_similarity<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

pub fn jaccard(corpus: &Corpus, query: &str) -> Vec<Ranked<f64>> {
    let query_set: HashSet<String> = tokenize(query).into_iter().collect();
    let hits = corpus
        .iter()
        .map(|(doc_id, doc)| Ranked::new(doc.name.as_str(), jaccard_similarity(corpus.token_set(doc_id), &query_set)))
        .collect();
    rank::rank(hits)
}

/// Documents whose raw text contains any of `terms`, in document order.
///
/// Matching is a case-sensitive substring test on the untokenized text, so `cat`
/// matches `category`. Empty terms match nothing.
pub fn non_overlapped<S: AsRef<str>>(corpus: &Corpus, terms: &[S]) -> Vec<String> {
    let terms: Vec<&str> = terms.iter().map(|t| t.as_ref()).filter(|t| !t.is_empty()).collect();
    corpus
        .documents()
        .iter()
        .filter(|doc| terms.iter().any(|t| doc.text.contains(t)))
        .map(|doc| doc.name.clone())
        .collect()
}

/// Documents in which breadth-first search from the query tokens reaches any node.
pub fn proximity(corpus: &Corpus, query: &str) -> Vec<String> {
    let query_tokens = tokenize(query);
    corpus
        .iter()
        .filter(|(doc_id, _)| !corpus.graph(*doc_id).reachable(query_tokens.iter()).is_empty())
        .map(|(_, doc)| doc.name.clone())
        .collect()
}

/// Cosine similarity of the query vector against every non-empty document.
pub fn cosine(corpus: &Corpus, query: &str) -> Vec<Ranked<f64>> {
    let query_vector = TermVector::query(&tokenize(query));
    let hits = corpus
        .vectors()
        .iter()
        .map(|(doc_id, v)| Ranked::new(corpus.name(*doc_id), query_vector.cosine(v)))
        .collect();
    rank::rank(hits)
}

/// Added to the inference model's denominators so none of them is zero.
pub const SMOOTHING: f64 = 0.0001;

/// Queries with at most this many tokens always go to the belief network.
pub const SHORT_QUERY_TOKENS: usize = 3;

/// `P(q|d) * 1/|d|`: share of distinct query tokens found in the document, divided
/// by the document's vocabulary size. An empty query or document scores 0.
pub fn belief_network(corpus: &Corpus, query: &str) -> Vec<Ranked<f64>> {
    let query_set: HashSet<String> = tokenize(query).into_iter().collect();
    let hits = corpus
        .iter()
        .map(|(doc_id, doc)| {
            let doc_set = corpus.token_set(doc_id);
            let score = if query_set.is_empty() || doc_set.is_empty() {
                0.0
            } else {
                let common = doc_set.intersection(&query_set).count() as f64;
                (common / query_set.len() as f64) / doc_set.len() as f64
            };
            Ranked::new(doc.name.as_str(), score)
        })
        .collect();
    rank::rank(hits)
}

/// `P(q|d) * P(d) / P(q)` with additive smoothing.
///
/// `P(d)` averages the corpus-wide frequency of the document's distinct tokens and
/// `P(q)` averages each query token's frequency within the query itself.
pub fn inference(corpus: &Corpus, query: &str) -> Vec<Ranked<f64>> {
    let query_tokens = tokenize(query);
    let query_set: HashSet<&str> = query_tokens.iter().map(String::as_str).collect();
    let q_len = query_set.len() as f64;
    // Summing each distinct token's query count gives the query length.
    let p_query = query_tokens.len() as f64 / (q_len + SMOOTHING);

    let hits = corpus
        .iter()
        .map(|(doc_id, doc)| {
            let doc_set = corpus.token_set(doc_id);
            let corpus_freq: u64 = doc_set.iter().map(|t| corpus.index().frequency(t) as u64).sum();
            let p_doc = corpus_freq as f64 / (doc_set.len() as f64 + SMOOTHING);
            let common = query_set.iter().filter(|t| doc_set.contains(**t)).count() as f64;
            let p_query_given_doc = common / (q_len + SMOOTHING);
            Ranked::new(doc.name.as_str(), p_query_given_doc * p_doc / (p_query + SMOOTHING))
        })
        .collect();
    rank::rank(hits)
}

/// Pick between the belief network and the inference model for `query`.
///
/// Short queries use the belief network. Longer ones use whichever model gives the
/// higher top score, preferring the belief network on a tie.
pub fn select_model(corpus: &Corpus, query: &str) -> Model {
    if tokenize(query).len() <= SHORT_QUERY_TOKENS {
        return Model::BeliefNetwork;
    }
    let top = |hits: Vec<Ranked<f64>>| hits.first().map_or(0.0, |h| h.score);
    if top(inference(corpus, query)) > top(belief_network(corpus, query)) {
        Model::Inference
    } else {
        Model::BeliefNetwork
    }
}
