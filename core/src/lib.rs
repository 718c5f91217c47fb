pub mod corpus;
pub mod graph;
pub mod index;
pub mod loader;
pub mod models;
pub mod rank;
pub mod tokenizer;
pub mod vector;

pub use corpus::Corpus;
pub use index::{DocId, Document, InvertedIndex, Posting};
pub use models::{Model, PostingHit, Query, SearchResults};
pub use rank::Ranked;
