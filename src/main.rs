use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use movie_lookup::display::{render_hits, render_json, RenderOptions};
use movie_lookup::index::index_summary;
use movie_lookup::loader::load_catalog;
use movie_lookup::models::SearchHit;
use movie_lookup::progress::{create_spinner, finish_spinner, format_duration, log_phase, set_log_only};
use movie_lookup::scoring::DEFAULT_LIMIT;
use movie_lookup::TitleIndex;

const DEFAULT_QUERY: &str = "The Matrix";

#[derive(Parser)]
#[command(name = "movie-lookup")]
#[command(about = "Find the movie titles most similar to a free-text query")]
struct Args {
    /// Catalog source: CSV with a header (title, genres) or SQLite database
    #[arg(env = "MOVIE_LOOKUP_DATA")]
    data: PathBuf,

    /// Run a single lookup and exit
    #[arg(long, short)]
    query: Option<String>,

    /// Run one lookup per non-empty line of FILE
    #[arg(long, conflicts_with = "query")]
    batch: Option<PathBuf>,

    /// Number of results per lookup
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// Table to read from SQLite sources
    #[arg(long, default_value = "movies")]
    table: String,

    /// Worker threads for batch mode (0 = one per core)
    #[arg(long, default_value = "0")]
    workers: usize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Show similarity scores next to titles
    #[arg(long)]
    scores: bool,

    /// Hide spinners; print plain phase lines to stderr
    #[arg(long)]
    log_only: bool,
}

fn load_index(args: &Args) -> Result<TitleIndex> {
    let start = Instant::now();
    log_phase("load", &format!("Reading {}", args.data.display()));
    let spinner = create_spinner("Loading catalog");

    let rows = load_catalog(&args.data, &args.table)
        .with_context(|| format!("Failed to load catalog from {}", args.data.display()))?;
    spinner.set_message(format!("Indexing {} titles", rows.len()));
    let index = TitleIndex::build(rows).context("Failed to build title index")?;

    finish_spinner(
        &spinner,
        "load",
        format!(
            "Catalog ready in {}: {}",
            format_duration(start.elapsed()),
            index_summary(index.catalog(), index.space())
        ),
    );
    Ok(index)
}

fn print_hits(out: &mut impl Write, query: &str, hits: &[SearchHit], args: &Args) -> Result<()> {
    if args.json {
        writeln!(out, "{}", render_json(hits)?)?;
    } else {
        writeln!(out, "\nTop matches for '{}':", query)?;
        write!(out, "{}", render_hits(hits, RenderOptions { show_scores: args.scores }))?;
    }
    Ok(())
}

fn run_batch(index: &TitleIndex, path: &Path, args: &Args) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file {}", path.display()))?;
    let queries: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let start = Instant::now();
    let spinner = create_spinner(&format!("Searching {} queries", queries.len()));
    let results: Vec<Vec<SearchHit>> = queries
        .par_iter()
        .map(|q| index.search_top(q, args.limit))
        .collect();
    finish_spinner(
        &spinner,
        "batch",
        format!("Searched {} queries in {}", queries.len(), format_duration(start.elapsed())),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let entries: Vec<serde_json::Value> = queries
            .iter()
            .zip(results.iter())
            .map(|(q, hits)| serde_json::json!({ "query": q, "hits": hits }))
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        for (query, hits) in queries.iter().zip(results.iter()) {
            print_hits(&mut out, query, hits, args)?;
        }
    }
    Ok(())
}

fn run_interactive(index: &TitleIndex, args: &Args) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();

    loop {
        {
            let mut out = stdout.lock();
            write!(out, "\nEnter a movie title [{}]: ", DEFAULT_QUERY)?;
            out.flush()?;
        }

        let mut line = String::new();
        if input.read_line(&mut line).context("Failed to read query")? == 0 {
            break; // EOF
        }
        let query = match line.trim_end_matches(['\r', '\n']) {
            "" => DEFAULT_QUERY,
            ":q" | "quit" | "exit" => break,
            q => q,
        };

        let hits = index.search_top(query, args.limit);
        print_hits(&mut stdout.lock(), query, &hits, args)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    set_log_only(args.log_only);

    if args.workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.workers)
            .build_global()
            .context("Failed to set thread pool size")?;
    }

    let index = load_index(&args)?;

    if let Some(query) = args.query.as_deref() {
        let hits = index.search_top(query, args.limit);
        print_hits(&mut io::stdout().lock(), query, &hits, &args)?;
    } else if let Some(path) = args.batch.as_ref() {
        run_batch(&index, path, &args)?;
    } else {
        run_interactive(&index, &args)?;
    }

    Ok(())
}
