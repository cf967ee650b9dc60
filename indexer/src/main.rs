use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tfidf_core::report::{save_inverted_index, save_score_list, write_score_list};
use tfidf_core::tokenizer::normalize_word;
use tfidf_core::{build_from_collection, Collection, InvertedIndex, ScoreList};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::io::{self, Write};
use std::path::Path;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a word index over a document collection and run TF-IDF queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// Collection file listing whitespace-separated document names
    #[arg(long)]
    collection: Option<String>,
    /// Directory whose .txt files form the collection
    #[arg(long)]
    dir: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and write the sorted word/document report
    Build {
        #[command(flatten)]
        source: Source,
        /// Report path
        #[arg(long, default_value = "invertedIndex.txt")]
        output: String,
    },
    /// Rank documents for one or more words
    Query {
        #[command(flatten)]
        source: Source,
        /// Search word; repeat for a multi-word query
        #[arg(long = "word", required = true)]
        words: Vec<String>,
        /// Collection size used for IDF; defaults to the number of documents
        #[arg(long)]
        total_docs: Option<usize>,
        /// Write results here instead of stdout
        #[arg(long)]
        output: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print collection and tree statistics
    Stats {
        #[command(flatten)]
        source: Source,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { source, output } => {
            let index = load(&source)?;
            save_inverted_index(&index.tree, &output)?;
            tracing::info!(output = %output, "report written");
            Ok(())
        }
        Commands::Query { source, words, total_docs, output, format } => {
            let index = load(&source)?;
            let total = total_docs.unwrap_or_else(|| index.num_documents());
            let list = run_query(&index, &words, total);
            tracing::info!(hits = list.len(), total_docs = total, "query complete");
            emit(&list, output.as_deref(), format)
        }
        Commands::Stats { source } => {
            let index = load(&source)?;
            println!("documents: {}", index.num_documents());
            println!("words: {}", index.tree.len());
            println!("tree height: {}", index.tree.height());
            Ok(())
        }
    }
}

fn load(source: &Source) -> Result<InvertedIndex> {
    let collection = match (&source.collection, &source.dir) {
        (Some(manifest), _) => Collection::open(manifest)?,
        (None, Some(dir)) => scan_dir(Path::new(dir))?,
        (None, None) => bail!("either --collection or --dir is required"),
    };
    if collection.is_empty() {
        bail!("collection has no documents");
    }
    tracing::info!(num_docs = collection.len(), root = %collection.source.root.display(), "building index");
    build_from_collection(&collection)
}

/// `.txt` files under `dir`, named relative to it, in byte order.
fn scan_dir(dir: &Path) -> Result<Collection> {
    let mut files: Vec<String> = Vec::new();
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let p = entry.path();
        if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
            if let Some(rel) = p.strip_prefix(dir).ok().and_then(|r| r.to_str()) {
                files.push(rel.replace('\\', "/"));
            }
        }
    }
    files.sort();
    Ok(Collection::from_files(dir, files))
}

fn run_query(index: &InvertedIndex, words: &[String], total: usize) -> ScoreList {
    let words: Vec<String> = words.iter().map(|w| normalize_word(w)).filter(|w| !w.is_empty()).collect();
    match words.as_slice() {
        [word] => index.query(word, total),
        _ => index.query_multi(&words, total),
    }
}

fn emit(list: &ScoreList, output: Option<&str>, format: Format) -> Result<()> {
    match (format, output) {
        (Format::Text, Some(path)) => save_score_list(list, path),
        (Format::Text, None) => write_score_list(list, io::stdout().lock()),
        (Format::Json, Some(path)) => {
            std::fs::write(path, serde_json::to_string_pretty(list)?)?;
            Ok(())
        }
        (Format::Json, None) => {
            let mut out = io::stdout().lock();
            serde_json::to_writer_pretty(&mut out, list)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn dir_scan_picks_txt_files_sorted() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b.txt"), "sun").unwrap();
        fs::write(dir.path().join("a.txt"), "mars").unwrap();
        fs::write(dir.path().join("sub/c.txt"), "moon").unwrap();
        fs::write(dir.path().join("notes.md"), "skip me").unwrap();

        let collection = scan_dir(dir.path()).unwrap();
        assert_eq!(collection.filenames, vec!["a.txt", "b.txt", "sub/c.txt"]);
    }

    #[test]
    fn query_words_are_normalized() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "mars mars moon").unwrap();
        fs::write(dir.path().join("b.txt"), "mars sun").unwrap();
        let index = load(&Source { collection: None, dir: Some(dir.path().to_string_lossy().to_string()) }).unwrap();

        let single = run_query(&index, &["MARS?".to_string()], 4);
        let got: Vec<&str> = single.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(got, vec!["a.txt", "b.txt"]);
        assert_eq!(single.as_slice()[0].score, (2.0 / 3.0) * 2.0f64.log10());

        let multi = run_query(&index, &["Moon.".to_string(), "SUN".to_string()], 4);
        let got: Vec<&str> = multi.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(got, vec!["b.txt", "a.txt"]);
    }
}
