use docret_core::models::{self, jaccard_similarity};
use docret_core::rank::{rank, Ranked};
use docret_core::tokenizer::tokenize;
use docret_core::vector::TermVector;
use docret_core::{Corpus, Document, InvertedIndex, Model, Query, SearchResults};
use std::collections::HashSet;

fn three_docs() -> Corpus {
    Corpus::build(vec![
        Document::new("D1", "the cat sat"),
        Document::new("D2", "the dog sat"),
        Document::new("D3", "completely unrelated text"),
    ])
}

fn set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

#[test]
fn postings_record_every_position() {
    let docs = vec![
        Document::new("a", "to be or not to be"),
        Document::new("b", "be quick"),
    ];
    let idx = InvertedIndex::build(&docs);
    let be = idx.lookup("be").unwrap();
    assert_eq!(be.len(), 2);
    assert_eq!((be[0].doc_id, be[0].positions.clone()), (0, vec![1, 5]));
    assert_eq!((be[1].doc_id, be[1].positions.clone()), (1, vec![0]));
    // Only tokens that actually occur are indexed.
    let mut terms: Vec<&str> = idx.terms().collect();
    terms.sort_unstable();
    assert_eq!(terms, vec!["be", "not", "or", "quick", "to"]);
}

#[test]
fn cosine_of_document_with_itself_is_one() {
    let c = Corpus::build(vec![Document::new("x", "red red green blue blue blue")]);
    let (_, v) = &c.vectors()[0];
    assert!((v.cosine(v) - 1.0).abs() < 1e-6);
}

#[test]
fn jaccard_is_symmetric_with_fixed_points() {
    let a = set("the cat sat");
    let b = set("the dog sat down");
    assert_eq!(jaccard_similarity(&a, &b), jaccard_similarity(&b, &a));
    assert_eq!(jaccard_similarity(&a, &a), 1.0);
    assert_eq!(jaccard_similarity(&a, &set("zebra yak")), 0.0);
    assert_eq!(jaccard_similarity(&set(""), &set("")), 0.0);
}

#[test]
fn keyword_overlap_ranks_by_match_count() {
    let hits = models::keyword_overlap(&three_docs(), "the cat");
    assert_eq!(
        hits,
        vec![Ranked::new("D1", 2), Ranked::new("D2", 1), Ranked::new("D3", 0)]
    );
}

#[test]
fn proximity_reaches_through_window_of_two() {
    let tokens = tokenize("a b c d");
    let c = Corpus::build(vec![Document::new("abcd", "a b c d")]);
    let seen = c.graph(0).reachable(["a"].iter());
    for t in ["a", "b", "c"] {
        assert!(seen.contains(t));
    }
    // Each node is visited once; the chain reaches the end too.
    assert_eq!(seen.len(), tokens.len());
    assert_eq!(models::proximity(&c, "a"), vec!["abcd"]);
    assert!(models::proximity(&c, "z").is_empty());
}

#[test]
fn lookup_of_absent_token_is_not_found() {
    let c = three_docs();
    assert_eq!(models::lookup(&c, "giraffe"), None);
    assert_eq!(c.search(Model::Lookup, &Query::text("giraffe")), SearchResults::Postings(None));
}

#[test]
fn ranker_is_stable_on_ties() {
    let hits = vec![Ranked::new("x", 2), Ranked::new("y", 2), Ranked::new("z", 1)];
    assert_eq!(rank(hits.clone()), hits);
}

#[test]
fn empty_query_yields_no_matches() {
    let c = three_docs();
    let q = Query::text("");
    assert!(c.search(Model::Lookup, &q).is_empty());
    assert!(c.search(Model::KeywordOverlap, &q).positive().is_empty());
    assert!(c.search(Model::Jaccard, &q).positive().is_empty());
    assert!(c.search(Model::NonOverlapped, &q).is_empty());
    assert!(c.search(Model::Proximity, &q).is_empty());
    assert!(c.search(Model::BeliefNetwork, &q).positive().is_empty());
    assert!(c.search(Model::Inference, &q).positive().is_empty());
    let cosine = c.search(Model::Cosine, &q);
    assert!(cosine.clone().positive().is_empty());
    if let SearchResults::Scores(hits) = cosine {
        assert!(hits.iter().all(|h| h.score == 0.0));
    }
}

#[test]
fn empty_collection_is_not_an_error() {
    let c = Corpus::build(Vec::new());
    for model in Model::ALL {
        assert!(c.search(model, &Query::text("anything")).is_empty());
    }
}

#[test]
fn belief_network_favours_small_vocabularies() {
    let c = Corpus::build(vec![
        Document::new("long", "cat and a great many other words here"),
        Document::new("short", "cat nap"),
        Document::new("none", "dog"),
    ]);
    let hits = models::belief_network(&c, "cat cat");
    let order: Vec<&str> = hits.iter().map(|h| h.doc.as_str()).collect();
    assert_eq!(order, vec!["short", "long", "none"]);
    assert!((hits[0].score - 0.5).abs() < 1e-12);
    assert!((hits[1].score - 1.0 / 8.0).abs() < 1e-12);
    assert_eq!(hits[2].score, 0.0);
}

#[test]
fn inference_requires_a_shared_token() {
    let c = three_docs();
    let hits = models::inference(&c, "the cat");
    assert_eq!(hits[0].doc, "D1");
    assert_eq!(hits[1].doc, "D2");
    assert!(hits[0].score > hits[1].score);
    assert_eq!(hits[2].doc, "D3");
    assert_eq!(hits[2].score, 0.0);
}

#[test]
fn auto_selection_depends_on_query_length() {
    let c = three_docs();
    assert_eq!(models::select_model(&c, "the cat sat"), Model::BeliefNetwork);
    assert_eq!(models::select_model(&c, "the cat sat on a mat"), Model::Inference);
    let (model, results) = c.search_auto(&Query::text("the cat sat on a mat"));
    assert_eq!(model, Model::Inference);
    assert_eq!(results, c.search(Model::Inference, &Query::text("the cat sat on a mat")));

    let empty = Corpus::build(Vec::new());
    assert_eq!(models::select_model(&empty, "one two three four"), Model::BeliefNetwork);
}

#[test]
fn cosine_ranks_closer_documents_first() {
    let c = Corpus::build(vec![
        Document::new("weather", "rain rain rain and wind"),
        Document::new("pets", "the cat and the dog"),
        Document::new("cats", "cat cat cat"),
        Document::new("blank", "   "),
    ]);
    let hits = models::cosine(&c, "cat");
    // The empty document has no vector and is not scored at all.
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].doc, "cats");
    assert!((hits[0].score - 1.0).abs() < 1e-6);
    assert_eq!(hits[1].doc, "pets");
    assert!(hits[1].score > 0.0 && hits[1].score < 1.0);
    assert_eq!(hits[2], Ranked::new("weather", 0.0));
}

#[test]
fn query_vector_keeps_raw_frequency_weighting() {
    // Repeating a query word changes its weight even though the document side is
    // max-normalized; this asymmetry is intentional.
    let q1 = TermVector::query(&tokenize("cat dog"));
    let q2 = TermVector::query(&tokenize("cat cat cat dog"));
    assert_eq!(q1.weight("cat"), 1.0);
    assert_eq!(q2.weight("cat"), 2.0);
    let doc = TermVector::document(&tokenize("cat dog")).unwrap();
    assert!((doc.cosine(&q1) - 1.0).abs() < 1e-9);
    assert!(doc.cosine(&q2) < 1.0);
}

#[test]
fn non_overlapped_uses_raw_substrings() {
    let c = Corpus::build(vec![
        Document::new("cats.txt", "A category list"),
        Document::new("dogs.txt", "dog house"),
        Document::new("none.txt", "nothing here"),
    ]);
    let q = Query::terms(["cat", "dog"]);
    assert_eq!(
        c.search(Model::NonOverlapped, &q),
        SearchResults::Documents(vec!["cats.txt".into(), "dogs.txt".into()])
    );
    // Token-based models do not match inside words.
    assert!(c.search(Model::Jaccard, &Query::text("cat")).positive().is_empty());
}

#[test]
fn results_serialize_with_kind_tag() {
    let results = three_docs().search(Model::Lookup, &Query::text("sat"));
    let json = serde_json::to_value(&results).unwrap();
    assert_eq!(json["kind"], "postings");
    assert_eq!(json["hits"][0]["doc"], "D1");
    assert_eq!(json["hits"][0]["positions"][0], 2);

    let missing = three_docs().search(Model::Lookup, &Query::text("zzz"));
    assert!(serde_json::to_value(&missing).unwrap()["hits"].is_null());
}
