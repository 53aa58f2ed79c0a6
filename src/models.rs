//! Core data models for the title lookup.
//!
//! Raw rows as read from a source file, the normalized catalog records built
//! from them, and the ranked hits returned by a search.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::error::CatalogError;
use crate::normalize::clean_title;

// ============================================================================
// Source Rows
// ============================================================================

/// One row of the source data, before validation.
/// Extra columns in the source are ignored, including other id columns
/// such as `id` or `imdbId`. A `movieId` that is not an integer is dropped.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawMovie {
    #[serde(
        rename = "movieId",
        alias = "movie_id",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub movie_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
}

impl RawMovie {
    pub fn new(title: &str, genres: &str) -> Self {
        Self {
            movie_id: None,
            title: Some(title.to_string()),
            genres: Some(genres.to_string()),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// A catalog entry. `clean_title` is derived once when the record is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieRecord {
    pub movie_id: Option<i64>,
    pub title: String,
    pub genres: String,
    clean_title: String,
}

impl MovieRecord {
    pub fn new(movie_id: Option<i64>, title: String, genres: String) -> Self {
        let clean_title = clean_title(&title);
        Self {
            movie_id,
            title,
            genres,
            clean_title,
        }
    }

    pub fn clean_title(&self) -> &str {
        &self.clean_title
    }
}

/// Ordered, read-only list of records. A record's position is its identity.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    records: Vec<MovieRecord>,
}

impl Catalog {
    /// Validate raw rows and derive clean titles.
    /// Fails on an empty input or on any row without a title.
    pub fn from_raw(rows: Vec<RawMovie>) -> Result<Self, CatalogError> {
        if rows.is_empty() {
            return Err(CatalogError::Empty);
        }

        let records = rows
            .into_iter()
            .enumerate()
            .map(|(row, raw)| -> Result<MovieRecord, CatalogError> {
                let title = raw.title.ok_or(CatalogError::MissingTitle { row })?;
                Ok(MovieRecord::new(raw.movie_id, title, raw.genres.unwrap_or_default()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MovieRecord> {
        self.records.iter()
    }

    pub fn clean_titles(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.clean_title())
    }
}

impl Index<usize> for Catalog {
    type Output = MovieRecord;

    fn index(&self, index: usize) -> &MovieRecord {
        &self.records[index]
    }
}

// ============================================================================
// Search Results
// ============================================================================

/// One ranked search result.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchHit {
    pub rank: usize,  // 1-based
    pub index: usize, // position in the catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_id: Option<i64>,
    pub title: String,
    pub genres: String,
    pub score: f64,
}

impl SearchHit {
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.title, &self.genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_derives_clean_title() {
        let catalog = Catalog::from_raw(vec![
            RawMovie::new("Toy Story (1995)", "Animation|Children"),
            RawMovie::new("Heat (1995)", "Action|Crime|Thriller"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].title, "Toy Story (1995)");
        assert_eq!(catalog[0].clean_title(), "Toy Story 1995");
        assert_eq!(catalog[1].genres, "Action|Crime|Thriller");
    }

    #[test]
    fn test_from_raw_rejects_empty() {
        assert!(matches!(Catalog::from_raw(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_from_raw_rejects_missing_title() {
        let rows = vec![
            RawMovie::new("Heat", "Action"),
            RawMovie {
                movie_id: Some(7),
                title: None,
                genres: Some("Drama".to_string()),
            },
        ];
        assert!(matches!(
            Catalog::from_raw(rows),
            Err(CatalogError::MissingTitle { row: 1 })
        ));
    }

    #[test]
    fn test_missing_genres_become_empty() {
        let rows = vec![RawMovie {
            movie_id: None,
            title: Some("Heat".to_string()),
            genres: None,
        }];
        let catalog = Catalog::from_raw(rows).unwrap();
        assert_eq!(catalog[0].genres, "");
    }

    #[test]
    fn test_duplicates_are_kept() {
        let catalog = Catalog::from_raw(vec![
            RawMovie::new("Hamlet (1996)", "Drama"),
            RawMovie::new("Hamlet (1996)", "Drama"),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0], catalog[1]);
    }
}
