//! Title index: the catalog plus its fitted feature space.
//!
//! Built once at startup and never mutated afterwards, so a single
//! `TitleIndex` can be shared by reference (or across threads) for any
//! number of lookups.

use crate::error::{CatalogError, SearchError};
use crate::models::{Catalog, RawMovie, SearchHit};
use crate::normalize::clean_title;
use crate::progress::log_phase;
use crate::scoring::{top_k, DEFAULT_LIMIT};
use crate::vectorizer::FeatureSpace;

/// Validate rows, derive clean titles and fit the feature space.
pub fn build_index(rows: Vec<RawMovie>) -> Result<(Catalog, FeatureSpace), CatalogError> {
    let catalog = Catalog::from_raw(rows)?;
    let space = FeatureSpace::fit(catalog.clean_titles())?;
    log_phase("index", &index_summary(&catalog, &space));
    Ok((catalog, space))
}

/// One-line description of a built index: record count and vocabulary size.
pub fn index_summary(catalog: &Catalog, space: &FeatureSpace) -> String {
    format!(
        "Indexed {} titles, {} terms ({} without searchable terms)",
        catalog.len(),
        space.vocabulary_size(),
        space.empty_rows().len()
    )
}

/// Look up the best `DEFAULT_LIMIT` titles for `query`.
/// `None` means the caller had no query at all; an empty string is a valid
/// query that matches nothing.
pub fn search(
    query: Option<&str>,
    catalog: &Catalog,
    space: &FeatureSpace,
) -> Result<Vec<SearchHit>, SearchError> {
    let query = query.ok_or(SearchError::EmptyQuery)?;
    Ok(search_top(query, catalog, space, DEFAULT_LIMIT))
}

/// Ranked hits for `query`, at most `limit` of them.
pub fn search_top(query: &str, catalog: &Catalog, space: &FeatureSpace, limit: usize) -> Vec<SearchHit> {
    let query_vec = space.transform(&clean_title(query));
    let scores = space.similarities(&query_vec);

    top_k(&scores, limit)
        .into_iter()
        .enumerate()
        .map(|(pos, (index, score))| {
            let record = &catalog[index];
            SearchHit {
                rank: pos + 1,
                index,
                movie_id: record.movie_id,
                title: record.title.clone(),
                genres: record.genres.clone(),
                score,
            }
        })
        .collect()
}

/// Owns a built catalog and feature space.
#[derive(Clone, Debug)]
pub struct TitleIndex {
    catalog: Catalog,
    space: FeatureSpace,
}

impl TitleIndex {
    pub fn build(rows: Vec<RawMovie>) -> Result<Self, CatalogError> {
        let (catalog, space) = build_index(rows)?;
        Ok(Self { catalog, space })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn space(&self) -> &FeatureSpace {
        &self.space
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        search_top(query, &self.catalog, &self.space, DEFAULT_LIMIT)
    }

    pub fn search_top(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        search_top(query, &self.catalog, &self.space, limit)
    }
}
