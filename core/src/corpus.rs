use crate::graph::ProximityGraph;
use crate::index::{DocId, Document, InvertedIndex};
use crate::models::{self, Model, Query, SearchResults};
use crate::tokenizer::tokenize;
use crate::vector::TermVector;
use std::collections::HashSet;

/// Every structure the retrieval models read, built in one pass and then frozen.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    index: InvertedIndex,
    /// Only documents with at least one token have a vector.
    vectors: Vec<(DocId, TermVector)>,
    graphs: Vec<ProximityGraph>,
    token_sets: Vec<HashSet<String>>,
}

impl Corpus {
    /// Tokenize each document once and derive all per-document structures.
    pub fn build(documents: Vec<Document>) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(&d.text)).collect();

        let index = InvertedIndex::from_tokens(tokenized.iter().map(Vec::as_slice));
        let vectors: Vec<(DocId, TermVector)> = tokenized
            .iter()
            .enumerate()
            .filter_map(|(i, tokens)| TermVector::document(tokens).map(|v| (i as DocId, v)))
            .collect();
        let graphs = tokenized.iter().map(|t| ProximityGraph::build(t)).collect();
        let token_sets = tokenized.into_iter().map(|t| t.into_iter().collect()).collect();

        tracing::debug!(
            num_docs = documents.len(),
            num_terms = index.len(),
            num_vectors = vectors.len(),
            "corpus built"
        );
        Self { documents, index, vectors, graphs, token_sets }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn name(&self, doc_id: DocId) -> &str {
        &self.documents[doc_id as usize].name
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn vectors(&self) -> &[(DocId, TermVector)] {
        &self.vectors
    }

    pub fn graph(&self, doc_id: DocId) -> &ProximityGraph {
        &self.graphs[doc_id as usize]
    }

    pub fn token_set(&self, doc_id: DocId) -> &HashSet<String> {
        &self.token_sets[doc_id as usize]
    }

    /// Iterate `(DocId, &Document)` in input order.
    pub fn iter(&self) -> impl Iterator<Item = (DocId, &Document)> {
        self.documents.iter().enumerate().map(|(i, d)| (i as DocId, d))
    }

    /// Document with exactly this name.
    pub fn document(&self, name: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.name == name)
    }

    /// First document whose name equals `name` once both lose their extension.
    pub fn find_by_name(&self, name: &str) -> Option<&str> {
        let wanted = strip_extension(name);
        self.documents
            .iter()
            .map(|d| d.name.as_str())
            .find(|stored| strip_extension(stored) == wanted)
    }

    pub fn search(&self, model: Model, query: &Query) -> SearchResults {
        match model {
            Model::Lookup => SearchResults::Postings(models::lookup(self, &query.text)),
            Model::KeywordOverlap => SearchResults::Counts(models::keyword_overlap(self, &query.text)),
            Model::Jaccard => SearchResults::Scores(models::jaccard(self, &query.text)),
            Model::NonOverlapped => SearchResults::Documents(models::non_overlapped(self, &query.raw_terms())),
            Model::Proximity => SearchResults::Documents(models::proximity(self, &query.text)),
            Model::Cosine => SearchResults::Scores(models::cosine(self, &query.text)),
            Model::BeliefNetwork => SearchResults::Scores(models::belief_network(self, &query.text)),
            Model::Inference => SearchResults::Scores(models::inference(self, &query.text)),
        }
    }

    /// Let [`models::select_model`] choose the model, and return it with the results.
    pub fn search_auto(&self, query: &Query) -> (Model, SearchResults) {
        let model = models::select_model(self, &query.text);
        (model, self.search(model, query))
    }
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    }
}
