use crate::output::{render, render_name, render_selected};
use anyhow::Result;
use docret_core::{Corpus, Model, Query};
use std::io::{BufRead, Write};

/// Menu entries after the models.
const AUTO_CHOICE: usize = Model::ALL.len() + 1;
const NAME_CHOICE: usize = Model::ALL.len() + 2;
const EXIT_CHOICE: usize = Model::ALL.len() + 3;

/// Menu loop over stdin-like input. Returns on "exit", the exit number, or EOF.
pub fn run<R: BufRead, W: Write>(corpus: &Corpus, input: &mut R, out: &mut W, json: bool) -> Result<()> {
    loop {
        print_menu(out)?;
        let Some(choice) = prompt(input, out, &format!("Enter your choice (1-{EXIT_CHOICE}): "))? else {
            return Ok(());
        };
        let choice = choice.trim();
        if choice.eq_ignore_ascii_case("exit") {
            return Ok(());
        }

        match choice.parse::<usize>() {
            Ok(n) if (1..=Model::ALL.len()).contains(&n) => {
                let model = Model::ALL[n - 1];
                let Some(query) = read_query(model, input, out)? else {
                    return Ok(());
                };
                tracing::debug!(%model, query = %query.text, "interactive search");
                let results = corpus.search(model, &query);
                let results = if model == Model::KeywordOverlap { results } else { results.positive() };
                render(out, model, &query, &results, json)?;
            }
            Ok(AUTO_CHOICE) => {
                let Some(line) = prompt(input, out, "Enter your query: ")? else {
                    return Ok(());
                };
                let query = Query::text(line.trim());
                let (model, results) = corpus.search_auto(&query);
                tracing::debug!(%model, query = %query.text, "interactive auto search");
                render_selected(out, model, &query, &results.positive(), json)?;
            }
            Ok(NAME_CHOICE) => {
                let Some(name) = prompt(input, out, "Enter document name: ")? else {
                    return Ok(());
                };
                let name = name.trim();
                render_name(out, name, corpus.find_by_name(name), json)?;
            }
            Ok(EXIT_CHOICE) => return Ok(()),
            _ => writeln!(out, "Invalid choice. Please enter a number between 1 and {EXIT_CHOICE}.")?,
        }
        writeln!(out)?;
    }
}

fn print_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "---------------- Available Models ----------------")?;
    for (i, model) in Model::ALL.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, model.description())?;
    }
    writeln!(out, "{AUTO_CHOICE}. Automatic model selection")?;
    writeln!(out, "{NAME_CHOICE}. Search by document name")?;
    writeln!(out, "{EXIT_CHOICE}. Exit")?;
    Ok(())
}

fn read_query<R: BufRead, W: Write>(model: Model, input: &mut R, out: &mut W) -> Result<Option<Query>> {
    if model != Model::NonOverlapped {
        let label = if model == Model::Lookup { "Enter a word: " } else { "Enter your query: " };
        return Ok(prompt(input, out, label)?.map(|line| Query::text(line.trim())));
    }

    writeln!(out, "Enter the query terms, one per line (empty line to finish):")?;
    let mut terms = Vec::new();
    while let Some(line) = prompt(input, out, "> ")? {
        // Terms are raw substrings; only the line ending is stripped.
        let term = line.trim_end_matches(['\r', '\n']);
        if term.is_empty() {
            break;
        }
        terms.push(term.to_string());
    }
    Ok(Some(Query::terms(terms)))
}

/// Print `label` and read one line. `None` on EOF.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
