use crate::tokenizer::tokenize;
use std::collections::HashMap;

pub type DocId = u32;

/// A named document as handed over by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    /// Token offsets within the document, strictly increasing.
    pub positions: Vec<u32>,
}

/// Token -> postings, with postings in document processing order.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<Posting>>,
}

impl InvertedIndex {
    /// Tokenize and index `documents`; the slice index is the `DocId`.
    pub fn build(documents: &[Document]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(&d.text)).collect();
        Self::from_tokens(tokenized.iter().map(Vec::as_slice))
    }

    /// Index already tokenized documents, numbered in iteration order.
    pub fn from_tokens<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        for (doc_id, tokens) in documents.into_iter().enumerate() {
            let doc_id = doc_id as DocId;
            for (pos, token) in tokens.iter().enumerate() {
                let list = postings.entry(token.clone()).or_default();
                // Documents are processed one at a time, so an existing posting for
                // this document can only be the last one.
                match list.last_mut() {
                    Some(p) if p.doc_id == doc_id => p.positions.push(pos as u32),
                    _ => list.push(Posting { doc_id, positions: vec![pos as u32] }),
                }
            }
        }
        Self { postings }
    }

    pub fn lookup(&self, token: &str) -> Option<&[Posting]> {
        self.postings.get(token).map(Vec::as_slice)
    }

    /// Total occurrences of `token` across every document.
    pub fn frequency(&self, token: &str) -> u32 {
        self.lookup(token)
            .map_or(0, |postings| postings.iter().map(|p| p.positions.len() as u32).sum())
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }
}
