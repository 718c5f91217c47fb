use anyhow::Result;
use docret_core::{Model, Query, SearchResults};
use std::io::Write;

const NO_RESULTS: &str = "No relevant documents found.";

/// Print `results` either as JSON or in the menu program's wording.
pub fn render<W: Write>(out: &mut W, model: Model, query: &Query, results: &SearchResults, json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "model": model,
            "query": query.text,
            "total_hits": results.len(),
            "results": results,
        });
        serde_json::to_writer_pretty(&mut *out, &value)?;
        writeln!(out)?;
        return Ok(());
    }

    match results {
        SearchResults::Postings(None) => writeln!(out, "No result found for \"{}\".", query.text)?,
        SearchResults::Postings(Some(hits)) => {
            writeln!(out, "Found the word \"{}\" in the following documents:", query.text)?;
            for hit in hits {
                let positions: Vec<String> = hit.positions.iter().map(u32::to_string).collect();
                writeln!(out, "Document: {}, Position(s): {}", hit.doc, positions.join(" "))?;
            }
        }
        SearchResults::Counts(hits) => {
            writeln!(out, "Ranked Documents based on keyword matching:")?;
            if hits.is_empty() {
                writeln!(out, "{NO_RESULTS}")?;
            }
            for hit in hits {
                if hit.score > 0 {
                    writeln!(out, "{} (Matched Keywords: {})", hit.doc, hit.score)?;
                } else {
                    writeln!(out, "{}: No matching keywords.", hit.doc)?;
                }
            }
        }
        SearchResults::Scores(hits) => {
            writeln!(out, "{} Results:", model.description())?;
            if hits.is_empty() {
                writeln!(out, "{NO_RESULTS}")?;
            }
            let label = match model {
                Model::Cosine => "Similarity",
                Model::BeliefNetwork | Model::Inference => "Relevance Probability",
                _ => "Score",
            };
            for hit in hits {
                writeln!(out, "File Name: {}, {label}: {:.4}", hit.doc, hit.score)?;
            }
        }
        SearchResults::Documents(docs) => {
            writeln!(out, "{} Results:", model.description())?;
            if docs.is_empty() {
                writeln!(out, "{NO_RESULTS}")?;
            }
            for doc in docs {
                writeln!(out, "File Name: {doc}")?;
            }
        }
    }
    Ok(())
}

/// Like [`render`], preceded by the model `auto` picked in plain-text mode.
pub fn render_selected<W: Write>(out: &mut W, model: Model, query: &Query, results: &SearchResults, json: bool) -> Result<()> {
    if !json {
        writeln!(out, "Selected Model: {}", model.description())?;
    }
    render(out, model, query, results, json)
}

pub fn render_name<W: Write>(out: &mut W, wanted: &str, found: Option<&str>, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, &serde_json::json!({ "query": wanted, "document": found }))?;
        writeln!(out)?;
        return Ok(());
    }
    match found {
        Some(name) => writeln!(out, "Document '{name}' found.")?,
        None => writeln!(out, "Document '{wanted}' not found.")?,
    }
    Ok(())
}
