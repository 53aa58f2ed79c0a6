//! Movie title lookup library - shared modules for all binaries.

pub mod display;
pub mod error;
pub mod index;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod progress;
pub mod scoring;
pub mod vectorizer;

pub use error::{CatalogError, SearchError};
pub use index::{build_index, search, search_top, TitleIndex};
pub use models::{Catalog, MovieRecord, RawMovie, SearchHit};
pub use normalize::clean_title;
pub use vectorizer::FeatureSpace;
