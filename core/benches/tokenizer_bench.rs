use criterion::{criterion_group, criterion_main, Criterion};
use docret_core::tokenizer::tokenize;
use docret_core::{Corpus, Document, Model, Query};

const SAMPLE: &str = "The quick brown fox jumps over the lazy dog. \
    Information retrieval ranks documents by their relevance to a query; \
    inverted indexes map every token to the documents it occurs in. ";

fn sample_documents() -> Vec<Document> {
    (0..200)
        .map(|i| Document::new(format!("doc{i}.txt"), SAMPLE.repeat(1 + i % 7)))
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    let text = SAMPLE.repeat(50);
    c.bench_function("tokenize_sample", |b| b.iter(|| tokenize(&text)));
}

fn bench_corpus(c: &mut Criterion) {
    let docs = sample_documents();
    c.bench_function("corpus_build", |b| b.iter(|| Corpus::build(docs.clone())));

    let corpus = Corpus::build(docs);
    let query = Query::text("relevance of the lazy fox");
    for model in [Model::KeywordOverlap, Model::Jaccard, Model::Proximity, Model::Cosine, Model::BeliefNetwork, Model::Inference] {
        c.bench_function(&format!("search_{model}"), |b| b.iter(|| corpus.search(model, &query)));
    }
}

criterion_group!(benches, bench_tokenize, bench_corpus);
criterion_main!(benches);
