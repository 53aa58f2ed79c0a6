//! Report on the fitted vocabulary of a catalog.
//!
//! Usage: vocab-stats <movies.csv> [--table NAME] [--top N]

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use movie_lookup::loader::load_catalog;
use movie_lookup::progress::format_duration;
use movie_lookup::TitleIndex;

#[derive(Parser)]
#[command(name = "vocab-stats")]
#[command(about = "Show vocabulary size, common terms and unsearchable titles of a catalog")]
struct Args {
    #[arg(env = "MOVIE_LOOKUP_DATA")]
    data: PathBuf,

    #[arg(long, default_value = "movies")]
    table: String,

    /// How many of the most common terms to list
    #[arg(long, default_value = "20")]
    top: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let start = Instant::now();

    let rows = load_catalog(&args.data, &args.table)
        .with_context(|| format!("Failed to load catalog from {}", args.data.display()))?;
    let index = TitleIndex::build(rows).context("Failed to build title index")?;
    let space = index.space();

    let unigrams = space.terms().filter(|term| !term.contains(' ')).count();

    println!("{:=<60}", "");
    println!("Catalog: {}", args.data.display());
    println!("  Titles: {}", index.len());
    println!(
        "  Vocabulary: {} terms ({} unigrams, {} bigrams)",
        space.vocabulary_size(),
        unigrams,
        space.vocabulary_size() - unigrams
    );
    println!("  Built in: {}", format_duration(start.elapsed()));
    println!("{:=<60}", "");

    println!("\nMost common terms:");
    for (term, df) in space.most_common_terms(args.top) {
        let idf = space.idf(term).unwrap_or_default();
        println!("  {:<30} df={:<8} idf={:.4}", term, df, idf);
    }

    let empty = space.empty_rows();
    println!("\nTitles with no searchable terms: {}", empty.len());
    for &i in empty.iter().take(args.top) {
        let record = &index.catalog()[i];
        println!("  [{}] {:?} (clean: {:?})", i, record.title, record.clean_title());
    }
    if empty.len() > args.top {
        println!("  ... and {} more", empty.len() - args.top);
    }

    Ok(())
}
