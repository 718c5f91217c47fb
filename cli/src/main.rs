mod interactive;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docret_core::loader::{load_documents, LoaderOptions};
use docret_core::{Corpus, Model, Query};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "docret")]
#[command(about = "Search a folder of text documents with classic retrieval models", long_about = None)]
struct Cli {
    /// Folder holding the documents
    #[arg(long, global = true, default_value = ".")]
    docs: PathBuf,
    /// Only load files with this extension (empty = every file)
    #[arg(long, global = true, default_value = "txt")]
    ext: String,
    /// Descend into subfolders
    #[arg(long, global = true, default_value_t = false)]
    recursive: bool,
    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exact inverted-index lookup of a single word
    Lookup { term: String },
    /// Rank documents by how many query words they contain
    Keywords {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Also list documents without any match
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Rank documents by Jaccard similarity (binary independence model)
    Jaccard {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// List documents containing any of the raw terms as a substring
    Terms {
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,
    },
    /// List documents whose proximity graph contains a query word
    Proximity {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Rank documents by cosine similarity of term-frequency vectors
    Cosine {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Rank documents with the belief network (query coverage over vocabulary size)
    Belief {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Rank documents with the inference model (corpus-frequency weighted)
    Inference {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Pick the belief network or inference model for the query, then rank
    Auto {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Find a document by name, ignoring the extension
    Name { name: String },
    /// Menu-driven session on stdin
    Interactive,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let options = LoaderOptions { extension: cli.ext.clone(), recursive: cli.recursive };
    let documents = load_documents(&cli.docs, &options)?;
    if documents.is_empty() {
        tracing::warn!(docs = %cli.docs.display(), "no documents found");
    }
    let corpus = Corpus::build(documents);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Lookup { term } => search(&corpus, &mut out, Model::Lookup, Query::text(term), true, cli.json),
        Commands::Keywords { query, all } => {
            search(&corpus, &mut out, Model::KeywordOverlap, Query::text(query.join(" ")), all, cli.json)
        }
        Commands::Jaccard { query, all } => {
            search(&corpus, &mut out, Model::Jaccard, Query::text(query.join(" ")), all, cli.json)
        }
        Commands::Terms { terms } => search(&corpus, &mut out, Model::NonOverlapped, Query::terms(terms), true, cli.json),
        Commands::Proximity { query } => {
            search(&corpus, &mut out, Model::Proximity, Query::text(query.join(" ")), true, cli.json)
        }
        Commands::Cosine { query, all } => {
            search(&corpus, &mut out, Model::Cosine, Query::text(query.join(" ")), all, cli.json)
        }
        Commands::Belief { query, all } => {
            search(&corpus, &mut out, Model::BeliefNetwork, Query::text(query.join(" ")), all, cli.json)
        }
        Commands::Inference { query, all } => {
            search(&corpus, &mut out, Model::Inference, Query::text(query.join(" ")), all, cli.json)
        }
        Commands::Auto { query, all } => {
            let query = Query::text(query.join(" "));
            let (model, results) = corpus.search_auto(&query);
            tracing::info!(%model, total_hits = results.len(), "auto search complete");
            let results = if all { results } else { results.positive() };
            output::render_selected(&mut out, model, &query, &results, cli.json)
        }
        Commands::Name { name } => output::render_name(&mut out, &name, corpus.find_by_name(&name), cli.json),
        Commands::Interactive => {
            let stdin = io::stdin();
            interactive::run(&corpus, &mut stdin.lock(), &mut out, cli.json)
        }
    }
}

fn search<W: Write>(corpus: &Corpus, out: &mut W, model: Model, query: Query, all: bool, json: bool) -> Result<()> {
    let results = corpus.search(model, &query);
    tracing::info!(%model, total_hits = results.len(), "search complete");
    let results = if all { results } else { results.positive() };
    output::render(out, model, &query, &results, json)
}
